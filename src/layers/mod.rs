//! Per-layer reconciliation: each visual layer is a three-case state machine
//! over its toggle boolean (enter, update with an animated transition, exit).

pub mod bollinger;
pub mod candlestick;
pub mod crosshair;
pub mod dividends;
pub mod moving_average;
pub mod ohlc;
pub mod price_line;
pub mod volume;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Every visual layer the chart draws, toggleable or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    PriceLine,
    MovingAverage,
    Volume,
    Ohlc,
    Candlesticks,
    Bollinger,
    Dividends,
    Crosshair,
}

/// The five user-toggleable layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToggleableLayer {
    CloseLine,
    MovingAverage,
    Ohlc,
    Candlesticks,
    Bollinger,
}

impl ToggleableLayer {
    #[must_use]
    pub fn layer_kind(self) -> LayerKind {
        match self {
            Self::CloseLine => LayerKind::PriceLine,
            Self::MovingAverage => LayerKind::MovingAverage,
            Self::Ohlc => LayerKind::Ohlc,
            Self::Candlesticks => LayerKind::Candlesticks,
            Self::Bollinger => LayerKind::Bollinger,
        }
    }
}

/// Toggle booleans per layer; defaults false, mutated only by explicit
/// toggle calls, never inferred from data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayerToggles {
    pub close_line: bool,
    pub moving_average: bool,
    pub ohlc: bool,
    pub candlesticks: bool,
    pub bollinger: bool,
}

impl LayerToggles {
    #[must_use]
    pub fn is_enabled(self, layer: ToggleableLayer) -> bool {
        match layer {
            ToggleableLayer::CloseLine => self.close_line,
            ToggleableLayer::MovingAverage => self.moving_average,
            ToggleableLayer::Ohlc => self.ohlc,
            ToggleableLayer::Candlesticks => self.candlesticks,
            ToggleableLayer::Bollinger => self.bollinger,
        }
    }

    pub fn set_enabled(&mut self, layer: ToggleableLayer, enabled: bool) {
        match layer {
            ToggleableLayer::CloseLine => self.close_line = enabled,
            ToggleableLayer::MovingAverage => self.moving_average = enabled,
            ToggleableLayer::Ohlc => self.ohlc = enabled,
            ToggleableLayer::Candlesticks => self.candlesticks = enabled,
            ToggleableLayer::Bollinger => self.bollinger = enabled,
        }
    }
}

/// Fixed animation durations for fire-and-forget visual transitions.
///
/// Transitions are never awaited by subsequent logic; they only annotate
/// redraw outcomes so a backend can animate geometry changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// Layer geometry updates and the snap-to-identity zoom reset.
    pub update_ms: u64,
    /// Dividend marker repositioning and tooltip fade-out.
    pub marker_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            update_ms: 750,
            marker_ms: 200,
        }
    }
}

impl TransitionConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if self.update_ms == 0 || self.marker_ms == 0 {
            return Err(ChartError::InvalidData(
                "transition durations must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Outcome of one reconciliation pass over a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerPhase {
    /// Layer enabled with no prior instance: geometry constructed fresh.
    Entered,
    /// Layer enabled with a prior instance: geometry recomputed, animated
    /// from old to new over the carried duration.
    Updated { duration_ms: u64 },
    /// Layer disabled: geometry removed entirely, nothing retained.
    Removed,
    /// Nothing to do (already absent, or the dataset window is empty).
    Idle,
}

/// Retained geometry slot implementing the enter/update/exit contract.
///
/// `reconcile` drives the three-case machine: the builder runs only when the
/// layer is enabled, and may return `None` to signal an empty display window
/// (draws degrade to no-ops rather than failing).
#[derive(Debug, Clone)]
pub struct LayerSlot<G> {
    geometry: Option<G>,
}

impl<G> Default for LayerSlot<G> {
    fn default() -> Self {
        Self { geometry: None }
    }
}

impl<G> LayerSlot<G> {
    #[must_use]
    pub fn geometry(&self) -> Option<&G> {
        self.geometry.as_ref()
    }

    pub fn reconcile<F>(
        &mut self,
        enabled: bool,
        update_duration_ms: u64,
        build: F,
    ) -> ChartResult<LayerPhase>
    where
        F: FnOnce() -> ChartResult<Option<G>>,
    {
        if !enabled {
            return Ok(if self.geometry.take().is_some() {
                LayerPhase::Removed
            } else {
                LayerPhase::Idle
            });
        }

        let had_prior = self.geometry.is_some();
        match build()? {
            Some(geometry) => {
                self.geometry = Some(geometry);
                Ok(if had_prior {
                    LayerPhase::Updated {
                        duration_ms: update_duration_ms,
                    }
                } else {
                    LayerPhase::Entered
                })
            }
            None => {
                self.geometry = None;
                Ok(LayerPhase::Idle)
            }
        }
    }
}

/// Price-delta classification shared by volume coloring and candle bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceDirection {
    Up,
    Down,
}
