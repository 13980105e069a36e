use serde::{Deserialize, Serialize};

use crate::core::{PlotArea, PriceScale, TimeScale};
use crate::error::{ChartError, ChartResult};

/// Zoom gesture limits: scale extent and the pan/zoom box.
///
/// The translate extent is always the plot box `[[0, 0], [width, height]]`;
/// content cannot be panned or zoomed outside of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 10.0,
        }
    }
}

impl ZoomConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.min_scale.is_finite()
            || !self.max_scale.is_finite()
            || self.min_scale <= 0.0
            || self.min_scale > self.max_scale
        {
            return Err(ChartError::InvalidData(
                "zoom scale extent must be finite, positive and ascending".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Cumulative pan/zoom state: `pixel' = k * pixel + translate`.
///
/// Applied to fresh copies of the base scale domains each gesture tick; the
/// persisted base scale is never mutated through a transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub k: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            k: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    #[must_use]
    pub fn new(k: f64, translate_x: f64, translate_y: f64) -> Self {
        Self {
            k,
            translate_x,
            translate_y,
        }
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self.k == 1.0 && self.translate_x == 0.0 && self.translate_y == 0.0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.k.is_finite()
            || self.k <= 0.0
            || !self.translate_x.is_finite()
            || !self.translate_y.is_finite()
        {
            return Err(ChartError::InvalidData(
                "view transform must be finite with k > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Clamps the scale factor to the zoom extent and the translation so the
    /// transformed content stays inside the plot box.
    #[must_use]
    pub fn clamped(self, config: ZoomConfig, plot: PlotArea) -> Self {
        let k = self.k.clamp(config.min_scale, config.max_scale);
        // With translate extent equal to the plot box, valid translations
        // lie in [(1 - k) * size, 0] on each axis.
        let translate_x = self.translate_x.clamp((1.0 - k) * plot.width, 0.0);
        let translate_y = self.translate_y.clamp((1.0 - k) * plot.height, 0.0);
        Self {
            k,
            translate_x,
            translate_y,
        }
    }

    /// Inverse x mapping from transformed pixels back to base pixels.
    #[must_use]
    pub fn invert_x(self, pixel: f64) -> f64 {
        (pixel - self.translate_x) / self.k
    }

    /// Inverse y mapping from transformed pixels back to base pixels.
    #[must_use]
    pub fn invert_y(self, pixel: f64) -> f64 {
        (pixel - self.translate_y) / self.k
    }

    /// Derives a transient rescaled time axis for one render tick.
    ///
    /// The new domain is the base domain seen through the inverse transform
    /// of the pixel range; the base scale itself is left untouched.
    pub fn rescale_time(self, base: TimeScale) -> ChartResult<TimeScale> {
        let _ = self.validate()?;
        let start = base.pixel_to_time(self.invert_x(0.0))?;
        let end = base.pixel_to_time(self.invert_x(base.width()))?;
        base.with_domain(start, end)
    }

    /// Derives a transient rescaled price axis for one render tick.
    pub fn rescale_price(self, base: PriceScale) -> ChartResult<PriceScale> {
        let _ = self.validate()?;
        // The price range runs [height, 0], so the bottom edge maps the
        // domain start and the top edge the domain end.
        let start = base.pixel_to_price(self.invert_y(base.height()))?;
        let end = base.pixel_to_price(self.invert_y(0.0))?;
        base.with_domain(start, end)
    }
}

/// One inbound zoom/pan gesture tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureTick {
    pub transform: ViewTransform,
    /// `true` when a real input event produced this tick (as opposed to a
    /// programmatic transform replay).
    pub user_sourced: bool,
}

impl GestureTick {
    /// Programmatic identity replays are skipped; everything else redraws.
    #[must_use]
    pub fn should_apply(self) -> bool {
        self.user_sourced || !self.transform.is_identity()
    }
}

/// Public crosshair state exposed to host applications.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrosshairState {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub snapped_x: Option<f64>,
    pub snapped_y: Option<f64>,
    pub snapped_time: Option<f64>,
    pub snapped_close: Option<f64>,
}

impl Default for CrosshairState {
    fn default() -> Self {
        Self {
            visible: false,
            x: 0.0,
            y: 0.0,
            snapped_x: None,
            snapped_y: None,
            snapped_time: None,
            snapped_close: None,
        }
    }
}

/// Deterministic snap candidate used to drive crosshair visuals and legends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrosshairSnap {
    pub x: f64,
    pub y: f64,
    pub time: f64,
    pub close: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    transform: ViewTransform,
    crosshair: CrosshairState,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            transform: ViewTransform::identity(),
            crosshair: CrosshairState::default(),
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn transform(self) -> ViewTransform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: ViewTransform) {
        self.transform = transform;
    }

    /// Resets the cumulative transform to identity (snap-to-identity).
    pub fn reset_transform(&mut self) {
        self.transform = ViewTransform::identity();
    }

    #[must_use]
    pub fn crosshair(self) -> CrosshairState {
        self.crosshair
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.crosshair.visible = true;
        self.crosshair.x = x;
        self.crosshair.y = y;
    }

    pub fn on_pointer_leave(&mut self) {
        self.crosshair.visible = false;
        self.crosshair.snapped_x = None;
        self.crosshair.snapped_y = None;
        self.crosshair.snapped_time = None;
        self.crosshair.snapped_close = None;
    }

    pub fn set_crosshair_snap(&mut self, snap: Option<CrosshairSnap>) {
        match snap {
            Some(snap) => {
                self.crosshair.snapped_x = Some(snap.x);
                self.crosshair.snapped_y = Some(snap.y);
                self.crosshair.snapped_time = Some(snap.time);
                self.crosshair.snapped_close = Some(snap.close);
            }
            None => {
                self.crosshair.snapped_x = None;
                self.crosshair.snapped_y = None;
                self.crosshair.snapped_time = None;
                self.crosshair.snapped_close = None;
            }
        }
    }
}
