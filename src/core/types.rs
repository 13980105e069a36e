use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Fixed margins around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 50.0,
            bottom: 50.0,
            left: 20.0,
        }
    }
}

impl Margins {
    #[must_use]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }
}

/// Responsive sizing policy mapping a viewport to the drawable plot area.
///
/// Viewports at or below `breakpoint_px` use the mobile layout (full width,
/// half height); wider viewports use three quarters of the width and the
/// full height. Margins are subtracted in both layouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub margins: Margins,
    pub breakpoint_px: u32,
    pub mobile_height_ratio: f64,
    pub desktop_width_ratio: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            breakpoint_px: 768,
            mobile_height_ratio: 0.5,
            desktop_width_ratio: 0.75,
        }
    }
}

impl ChartLayout {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.mobile_height_ratio.is_finite()
            || !self.desktop_width_ratio.is_finite()
            || self.mobile_height_ratio <= 0.0
            || self.desktop_width_ratio <= 0.0
        {
            return Err(ChartError::InvalidData(
                "layout ratios must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Computes the plot area for a viewport.
    pub fn plot_area(self, viewport: Viewport) -> ChartResult<PlotArea> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let vw = f64::from(viewport.width);
        let vh = f64::from(viewport.height);

        let (width, height) = if viewport.width <= self.breakpoint_px {
            (
                vw - self.margins.horizontal(),
                self.mobile_height_ratio * vh - self.margins.vertical(),
            )
        } else {
            (
                self.desktop_width_ratio * vw - self.margins.horizontal(),
                vh - self.margins.vertical(),
            )
        };

        if width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        Ok(PlotArea { width, height })
    }
}

/// Drawable plot region in pixels, margins already excluded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Clamps a pointer coordinate to the drawn extent.
    #[must_use]
    pub fn clamp_point(self, x: f64, y: f64) -> (f64, f64) {
        (x.clamp(0.0, self.width), y.clamp(0.0, self.height))
    }
}

/// One daily OHLCV sample. Identity is the sample time; times are unique and
/// strictly increasing within one symbol's series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PricePoint {
    /// Builds a validated price point from raw floating values.
    ///
    /// Invariants:
    /// - all prices are finite and > 0
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(
        time: f64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> ChartResult<Self> {
        if !time.is_finite() {
            return Err(ChartError::InvalidData("time must be finite".to_owned()));
        }

        for (field, value) in [("open", open), ("high", high), ("low", low), ("close", close)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "price field `{field}` must be finite and > 0"
                )));
            }
        }

        if low > high {
            return Err(ChartError::InvalidData("low must be <= high".to_owned()));
        }

        if open < low || open > high || close < low || close > high {
            return Err(ChartError::InvalidData(
                "open/close must be within low/high range".to_owned(),
            ));
        }

        Ok(Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Converts strongly-typed temporal/decimal input into a validated price point.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> ChartResult<Self> {
        Self::new(
            datetime_to_unix_seconds(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
            volume,
        )
    }
}

/// Sparse dividend payout event, independent of price sample identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividendEvent {
    pub time: f64,
    pub amount: f64,
}

impl DividendEvent {
    pub fn new(time: f64, amount: f64) -> ChartResult<Self> {
        if !time.is_finite() {
            return Err(ChartError::InvalidData(
                "dividend time must be finite".to_owned(),
            ));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ChartError::InvalidData(
                "dividend amount must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self { time, amount })
    }

    pub fn from_decimal_time(time: DateTime<Utc>, amount: Decimal) -> ChartResult<Self> {
        Self::new(
            datetime_to_unix_seconds(time),
            decimal_to_f64(amount, "amount")?,
        )
    }
}
