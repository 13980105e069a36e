use serde::{Deserialize, Serialize};

use crate::data::{RawDataset, SymbolKey};
use crate::interaction::GestureTick;
use crate::layers::{LayerKind, LayerPhase, ToggleableLayer};

/// Opaque claim on one in-flight dataset load.
///
/// Tickets are handed out monotonically; a completion carrying a ticket
/// older than the newest issued one is discarded, so overlapping loads
/// resolve to the last *issued* request instead of the last to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadTicket {
    pub(crate) generation: u64,
    pub(crate) symbol: SymbolKey,
}

impl LoadTicket {
    #[must_use]
    pub fn symbol(self) -> SymbolKey {
        self.symbol
    }
}

/// Inbound chart events, one handler per kind.
///
/// Hosts can drive the engine through `ChartEngine::dispatch` with these, or
/// call the per-operation entry points directly; both paths share handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    /// The dataset selector changed; fetch and switch synchronously.
    DatasetSelected(SymbolKey),
    /// One of the five layer toggle controls changed.
    ToggleChanged {
        layer: ToggleableLayer,
        enabled: bool,
    },
    /// Pointer moved over the plot area, in plot-local pixel coordinates.
    PointerMoved { x: f64, y: f64 },
    /// Pointer left the plot area.
    PointerLeft,
    /// A pan/zoom gesture tick.
    ZoomTick(GestureTick),
    /// An asynchronous load finished; stale tickets are discarded.
    LoadCompleted {
        ticket: LoadTicket,
        dataset: RawDataset,
    },
}

/// One layer redraw decision produced by an event handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedrawCommand {
    pub layer: LayerKind,
    pub phase: LayerPhase,
}
