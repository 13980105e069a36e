//! Chart controller: owns dataset, scale, transform and toggle state, and
//! drives full-chart redraws through a rendering backend.

mod events;
mod frame_builder;

pub use events::{ChartEvent, LoadTicket, RedrawCommand};

use tracing::{debug, trace, warn};

use crate::core::dataset::ChartDataset;
use crate::core::indicators::IndicatorConfig;
use crate::core::locator;
use crate::core::types::{ChartLayout, PlotArea, Viewport};
use crate::core::windowing::DisplayWindow;
use crate::core::{PriceScale, TimeScale, VolumeScale};
use crate::data::{
    canonicalize_dividends, canonicalize_quotes, DataSource, RawDataset, SymbolKey,
};
use crate::error::ChartResult;
use crate::interaction::{
    CrosshairSnap, CrosshairState, GestureTick, InteractionState, ViewTransform, ZoomConfig,
};
use crate::layers::bollinger::{project_bollinger_bands, BollingerGeometry};
use crate::layers::candlestick::{project_candlesticks, CandlestickGeometry};
use crate::layers::crosshair::{
    primary_legend, project_crosshair, secondary_legend, CrosshairGeometry,
};
use crate::layers::dividends::{
    project_dividend_markers, tooltip_for_marker, DividendGeometry, DividendMarkerConfig,
    DividendTooltip,
};
use crate::layers::moving_average::{project_moving_average, MovingAverageGeometry};
use crate::layers::ohlc::{project_ohlc_bars, OhlcGeometry};
use crate::layers::price_line::{project_close_line, PriceLineGeometry};
use crate::layers::volume::{project_volume_bars, VolumeGeometry};
use crate::layers::{LayerKind, LayerPhase, LayerToggles, ToggleableLayer, TransitionConfig};
use crate::render::Renderer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    pub layout: ChartLayout,
    pub display_window: DisplayWindow,
    pub indicators: IndicatorConfig,
    pub zoom: ZoomConfig,
    pub transitions: TransitionConfig,
    pub markers: DividendMarkerConfig,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layout: ChartLayout::default(),
            display_window: DisplayWindow::default(),
            indicators: IndicatorConfig::default(),
            zoom: ZoomConfig::default(),
            transitions: TransitionConfig::default(),
            markers: DividendMarkerConfig::default(),
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_display_window(mut self, window: DisplayWindow) -> Self {
        self.display_window = window;
        self
    }

    #[must_use]
    pub fn with_indicators(mut self, indicators: IndicatorConfig) -> Self {
        self.indicators = indicators;
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: ZoomConfig) -> Self {
        self.zoom = zoom;
        self
    }

    fn validate(self) -> ChartResult<Self> {
        let _ = self.layout.validate()?;
        let _ = self.indicators.validate()?;
        let _ = self.zoom.validate()?;
        let _ = self.transitions.validate()?;
        let _ = self.markers.validate()?;
        Ok(self)
    }
}

/// The persisted base scales, rebuilt from scratch on every dataset load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScales {
    pub time: TimeScale,
    pub price: PriceScale,
    pub volume: VolumeScale,
}

impl ChartScales {
    /// Fits all three axes from the windowed series.
    ///
    /// An empty display window yields `None`: scale domains would be
    /// degenerate, so every draw downstream becomes a no-op instead.
    pub fn from_dataset(dataset: &ChartDataset, plot: PlotArea) -> ChartResult<Option<Self>> {
        if dataset.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            time: TimeScale::from_prices(&dataset.valid_prices, plot.width)?,
            price: PriceScale::from_prices(&dataset.valid_prices, plot.height)?,
            volume: VolumeScale::from_prices(&dataset.valid_prices, plot.height)?,
        }))
    }
}

/// Retained geometry per visual layer.
#[derive(Debug, Default)]
struct LayerSlots {
    price_line: crate::layers::LayerSlot<PriceLineGeometry>,
    moving_average: crate::layers::LayerSlot<MovingAverageGeometry>,
    volume: crate::layers::LayerSlot<VolumeGeometry>,
    ohlc: crate::layers::LayerSlot<OhlcGeometry>,
    candlesticks: crate::layers::LayerSlot<CandlestickGeometry>,
    bollinger: crate::layers::LayerSlot<BollingerGeometry>,
    dividends: crate::layers::LayerSlot<DividendGeometry>,
}

pub struct ChartEngine<R: Renderer> {
    renderer: R,
    config: ChartEngineConfig,
    plot: PlotArea,
    dataset: ChartDataset,
    scales: Option<ChartScales>,
    toggles: LayerToggles,
    interaction: InteractionState,
    slots: LayerSlots,
    crosshair_geometry: Option<CrosshairGeometry>,
    primary_legend: Vec<String>,
    secondary_legend: Vec<String>,
    tooltip: Option<DividendTooltip>,
    issued_generation: u64,
    applied_generation: u64,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let plot = config.layout.plot_area(config.viewport)?;

        Ok(Self {
            renderer,
            config,
            plot,
            dataset: ChartDataset::default(),
            scales: None,
            toggles: LayerToggles::default(),
            interaction: InteractionState::default(),
            slots: LayerSlots::default(),
            crosshair_geometry: None,
            primary_legend: Vec::new(),
            secondary_legend: Vec::new(),
            tooltip: None,
            issued_generation: 0,
            applied_generation: 0,
        })
    }

    // ------------------------------------------------------------------
    // Dataset loading

    /// Registers an in-flight load and returns its claim ticket.
    pub fn begin_load(&mut self, symbol: SymbolKey) -> LoadTicket {
        self.issued_generation += 1;
        debug!(
            symbol = symbol.as_str(),
            generation = self.issued_generation,
            "begin dataset load"
        );
        LoadTicket {
            generation: self.issued_generation,
            symbol,
        }
    }

    /// Installs a completed load unless a newer request was issued since.
    ///
    /// Returns the redraw commands of the dataset switch, or an empty set
    /// when the ticket is stale and the payload is discarded.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        dataset: RawDataset,
    ) -> ChartResult<Vec<RedrawCommand>> {
        if ticket.generation < self.issued_generation
            || ticket.generation <= self.applied_generation
        {
            warn!(
                symbol = ticket.symbol.as_str(),
                generation = ticket.generation,
                issued = self.issued_generation,
                "discarding stale dataset load"
            );
            return Ok(Vec::new());
        }

        self.applied_generation = ticket.generation;
        let full_prices = canonicalize_quotes(&dataset.quote);
        let dividends = canonicalize_dividends(&dataset.dividends);
        let dataset = ChartDataset::build(
            full_prices,
            dividends,
            self.config.display_window,
            self.config.indicators,
        );
        self.install_dataset(dataset)
    }

    /// Fetches and installs a dataset in one step.
    pub fn load_from(
        &mut self,
        source: &mut dyn DataSource,
        symbol: SymbolKey,
    ) -> ChartResult<Vec<RedrawCommand>> {
        let ticket = self.begin_load(symbol);
        let dataset = source.fetch(symbol)?;
        self.complete_load(ticket, dataset)
    }

    /// Installs an already-built dataset, bypassing the source boundary.
    /// Useful for hosts with their own ingestion pipeline and for tests.
    pub fn set_dataset(&mut self, dataset: ChartDataset) -> ChartResult<Vec<RedrawCommand>> {
        self.install_dataset(dataset)
    }

    fn install_dataset(&mut self, dataset: ChartDataset) -> ChartResult<Vec<RedrawCommand>> {
        self.dataset = dataset;
        self.scales = ChartScales::from_dataset(&self.dataset, self.plot)?;

        // The transform must be identity before the new dataset's layers are
        // drawn so no zoom bleeds across datasets.
        self.interaction.reset_transform();
        self.interaction.set_crosshair_snap(None);
        self.crosshair_geometry = None;
        self.primary_legend.clear();
        self.secondary_legend.clear();
        self.tooltip = None;

        debug!(
            windowed = self.dataset.valid_prices.len(),
            dividends = self.dataset.dividends.len(),
            "installed dataset"
        );

        let commands = self.reconcile_layers()?;
        self.render()?;
        Ok(commands)
    }

    // ------------------------------------------------------------------
    // Layer toggles

    pub fn toggle_close(&mut self, enabled: bool) -> ChartResult<Vec<RedrawCommand>> {
        self.toggle(ToggleableLayer::CloseLine, enabled)
    }

    pub fn toggle_moving_average(&mut self, enabled: bool) -> ChartResult<Vec<RedrawCommand>> {
        self.toggle(ToggleableLayer::MovingAverage, enabled)
    }

    pub fn toggle_ohlc(&mut self, enabled: bool) -> ChartResult<Vec<RedrawCommand>> {
        self.toggle(ToggleableLayer::Ohlc, enabled)
    }

    pub fn toggle_candlesticks(&mut self, enabled: bool) -> ChartResult<Vec<RedrawCommand>> {
        self.toggle(ToggleableLayer::Candlesticks, enabled)
    }

    pub fn toggle_bollinger_bands(&mut self, enabled: bool) -> ChartResult<Vec<RedrawCommand>> {
        self.toggle(ToggleableLayer::Bollinger, enabled)
    }

    /// Applies one toggle change and redraws.
    ///
    /// Enabling a layer snaps the view transform back to identity first so
    /// the layer is never rendered under a stale zoom; disabling leaves the
    /// current transform in place.
    pub fn toggle(
        &mut self,
        layer: ToggleableLayer,
        enabled: bool,
    ) -> ChartResult<Vec<RedrawCommand>> {
        self.toggles.set_enabled(layer, enabled);
        trace!(?layer, enabled, "layer toggle");

        if enabled {
            self.interaction.reset_transform();
        }

        let commands = self.reconcile_layers()?;
        self.refresh_crosshair()?;
        self.render()?;
        Ok(commands)
    }

    // ------------------------------------------------------------------
    // Pointer and zoom

    /// Handles pointer movement over the plot area.
    ///
    /// Coordinates are clamped to the drawn extent before the nearest-date
    /// lookup, honoring the locator's bounds precondition.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        let (x, y) = self.plot.clamp_point(x, y);
        self.interaction.on_pointer_move(x, y);
        self.refresh_crosshair()?;
        self.refresh_dividend_hover();
        self.render()
    }

    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        self.interaction.on_pointer_leave();
        self.crosshair_geometry = None;
        self.primary_legend.clear();
        self.secondary_legend.clear();
        // Tooltip fade-out is fire-and-forget; state drops immediately.
        self.tooltip = None;
        self.render()
    }

    /// Applies one pan/zoom gesture tick.
    ///
    /// Rescaled axes are derived from fresh copies of the base scale domain;
    /// the persisted base scales are never mutated, so a later dataset
    /// switch can rebuild them from scratch.
    pub fn zoom_tick(&mut self, tick: GestureTick) -> ChartResult<Vec<RedrawCommand>> {
        if !tick.should_apply() {
            return Ok(Vec::new());
        }

        let clamped = tick.transform.validate()?.clamped(self.config.zoom, self.plot);
        trace!(k = clamped.k, tx = clamped.translate_x, "zoom tick");
        self.interaction.set_transform(clamped);

        let commands = self.reconcile_layers()?;
        self.refresh_crosshair()?;
        self.render()?;
        Ok(commands)
    }

    // ------------------------------------------------------------------
    // Event loop entry point

    /// Dispatches one inbound event to its handler.
    pub fn dispatch(
        &mut self,
        event: ChartEvent,
        source: &mut dyn DataSource,
    ) -> ChartResult<Vec<RedrawCommand>> {
        match event {
            ChartEvent::DatasetSelected(symbol) => self.load_from(source, symbol),
            ChartEvent::ToggleChanged { layer, enabled } => self.toggle(layer, enabled),
            ChartEvent::PointerMoved { x, y } => {
                self.pointer_move(x, y)?;
                Ok(Vec::new())
            }
            ChartEvent::PointerLeft => {
                self.pointer_leave()?;
                Ok(Vec::new())
            }
            ChartEvent::ZoomTick(tick) => self.zoom_tick(tick),
            ChartEvent::LoadCompleted { ticket, dataset } => self.complete_load(ticket, dataset),
        }
    }

    // ------------------------------------------------------------------
    // Rendering

    /// Builds the current frame and hands it to the backend.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)
    }

    // ------------------------------------------------------------------
    // Accessors

    #[must_use]
    pub fn plot(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn dataset(&self) -> &ChartDataset {
        &self.dataset
    }

    #[must_use]
    pub fn scales(&self) -> Option<ChartScales> {
        self.scales
    }

    #[must_use]
    pub fn toggles(&self) -> LayerToggles {
        self.toggles
    }

    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.interaction.transform()
    }

    #[must_use]
    pub fn crosshair_state(&self) -> CrosshairState {
        self.interaction.crosshair()
    }

    #[must_use]
    pub fn crosshair_geometry(&self) -> Option<CrosshairGeometry> {
        self.crosshair_geometry
    }

    #[must_use]
    pub fn primary_legend(&self) -> &[String] {
        &self.primary_legend
    }

    #[must_use]
    pub fn secondary_legend(&self) -> &[String] {
        &self.secondary_legend
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&DividendTooltip> {
        self.tooltip.as_ref()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn indicator_config(&self) -> IndicatorConfig {
        self.config.indicators
    }

    #[must_use]
    pub fn marker_config(&self) -> DividendMarkerConfig {
        self.config.markers
    }

    // ------------------------------------------------------------------
    // Internal plumbing

    /// The scales layers are drawn against this tick: base scales, or
    /// transient rescaled copies while a transform is active.
    fn active_scales(&self) -> ChartResult<Option<ChartScales>> {
        let Some(base) = self.scales else {
            return Ok(None);
        };

        let transform = self.interaction.transform();
        if transform.is_identity() {
            return Ok(Some(base));
        }

        Ok(Some(ChartScales {
            time: transform.rescale_time(base.time)?,
            price: transform.rescale_price(base.price)?,
            // The volume overlay keeps its own vertical band; only the x
            // placement of bars follows the zoom.
            volume: base.volume,
        }))
    }

    /// Runs the enter/update/exit machine for every layer against the
    /// active scales and collects the non-idle outcomes.
    fn reconcile_layers(&mut self) -> ChartResult<Vec<RedrawCommand>> {
        let active = self.active_scales()?;

        let dataset = &self.dataset;
        let slots = &mut self.slots;
        let toggles = self.toggles;
        let transitions = self.config.transitions;
        let markers = self.config.markers;
        let plot = self.plot;

        let mut commands = Vec::new();
        let mut push = |layer: LayerKind, phase: LayerPhase| {
            if phase != LayerPhase::Idle {
                commands.push(RedrawCommand { layer, phase });
            }
        };

        // No scales means an empty display window: every layer reconciles as
        // disabled so retained geometry is cleared and draws become no-ops.
        let Some(scales) = active else {
            push(
                LayerKind::PriceLine,
                slots
                    .price_line
                    .reconcile(false, transitions.update_ms, || Ok(None))?,
            );
            push(
                LayerKind::MovingAverage,
                slots
                    .moving_average
                    .reconcile(false, transitions.update_ms, || Ok(None))?,
            );
            push(
                LayerKind::Volume,
                slots
                    .volume
                    .reconcile(false, transitions.update_ms, || Ok(None))?,
            );
            push(
                LayerKind::Ohlc,
                slots.ohlc.reconcile(false, transitions.update_ms, || Ok(None))?,
            );
            push(
                LayerKind::Candlesticks,
                slots
                    .candlesticks
                    .reconcile(false, transitions.update_ms, || Ok(None))?,
            );
            push(
                LayerKind::Bollinger,
                slots
                    .bollinger
                    .reconcile(false, transitions.update_ms, || Ok(None))?,
            );
            push(
                LayerKind::Dividends,
                slots
                    .dividends
                    .reconcile(false, transitions.marker_ms, || Ok(None))?,
            );
            return Ok(commands);
        };

        push(
            LayerKind::PriceLine,
            slots
                .price_line
                .reconcile(toggles.close_line, transitions.update_ms, || {
                    project_close_line(&dataset.valid_prices, scales.time, scales.price)
                })?,
        );

        push(
            LayerKind::MovingAverage,
            slots
                .moving_average
                .reconcile(toggles.moving_average, transitions.update_ms, || {
                    project_moving_average(&dataset.moving_average, scales.time, scales.price)
                })?,
        );

        push(
            LayerKind::Volume,
            slots.volume.reconcile(true, transitions.update_ms, || {
                project_volume_bars(
                    &dataset.valid_prices,
                    scales.time,
                    scales.volume,
                    plot.height,
                )
            })?,
        );

        push(
            LayerKind::Ohlc,
            slots.ohlc.reconcile(toggles.ohlc, transitions.update_ms, || {
                project_ohlc_bars(&dataset.valid_prices, scales.time, scales.price)
            })?,
        );

        push(
            LayerKind::Candlesticks,
            slots
                .candlesticks
                .reconcile(toggles.candlesticks, transitions.update_ms, || {
                    project_candlesticks(&dataset.valid_prices, scales.time, scales.price)
                })?,
        );

        push(
            LayerKind::Bollinger,
            slots
                .bollinger
                .reconcile(toggles.bollinger, transitions.update_ms, || {
                    project_bollinger_bands(&dataset.bollinger, scales.time, scales.price)
                })?,
        );

        push(
            LayerKind::Dividends,
            slots.dividends.reconcile(true, transitions.marker_ms, || {
                project_dividend_markers(&dataset.dividends, scales.time, plot.height, markers)
            })?,
        );

        Ok(commands)
    }

    /// Re-snaps the crosshair and rebuilds legends from the pointer position.
    fn refresh_crosshair(&mut self) -> ChartResult<()> {
        if !self.interaction.crosshair().visible {
            return Ok(());
        }

        let Some(scales) = self.active_scales()? else {
            return Ok(());
        };
        if self.dataset.is_empty() {
            return Ok(());
        }

        let pointer = self.interaction.crosshair();
        let target = scales.time.pixel_to_time(pointer.x)?;
        // The rescaled domain is a subset of the base domain, but guard the
        // locator's lower bound anyway.
        let floor = self.dataset.valid_prices[0].time;
        let target = target.max(floor);

        let Some(point) = locator::nearest_point(&self.dataset.valid_prices, target) else {
            return Ok(());
        };
        let point = *point;

        let snap = CrosshairSnap {
            x: scales.time.time_to_pixel(point.time)?,
            y: scales.price.price_to_pixel(point.close)?,
            time: point.time,
            close: point.close,
        };
        self.interaction.set_crosshair_snap(Some(snap));
        self.crosshair_geometry = Some(project_crosshair(
            &point,
            scales.time,
            scales.price,
            self.plot,
        )?);
        self.primary_legend = primary_legend(&point);
        self.secondary_legend =
            secondary_legend(&self.dataset, self.config.indicators, point.time);

        Ok(())
    }

    /// Shows the tooltip when the pointer rests on a dividend marker.
    fn refresh_dividend_hover(&mut self) {
        let pointer = self.interaction.crosshair();
        if !pointer.visible {
            self.tooltip = None;
            return;
        }

        let half = self.config.markers.marker_size_px / 2.0;
        let hovered = self.slots.dividends.geometry().and_then(|geometry| {
            geometry.markers.iter().copied().find(|marker| {
                (pointer.x - marker.x).abs() <= half && (pointer.y - marker.y).abs() <= half
            })
        });

        self.tooltip = hovered
            .map(|marker| tooltip_for_marker(marker, pointer.x, pointer.y, self.config.markers));
    }
}
