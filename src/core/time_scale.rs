use serde::{Deserialize, Serialize};

use crate::core::types::PricePoint;
use crate::core::{LinearScale};
use crate::error::{ChartError, ChartResult};

/// Time axis mapping `[min date, max date]` of the windowed series onto
/// `[0, plot width]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    domain_start: f64,
    domain_end: f64,
    width: f64,
}

impl TimeScale {
    pub fn new(domain_start: f64, domain_end: f64, width: f64) -> ChartResult<Self> {
        let normalized = normalize_domain(domain_start, domain_end)?;
        if !width.is_finite() || width <= 0.0 {
            return Err(ChartError::InvalidData(
                "time scale width must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: normalized.0,
            domain_end: normalized.1,
            width,
        })
    }

    /// Fits the domain from a windowed price series.
    ///
    /// Callers guard against zero-length display windows; an empty series is
    /// rejected here rather than producing a degenerate mapping.
    pub fn from_prices(prices: &[PricePoint], width: f64) -> ChartResult<Self> {
        let first = prices.first().ok_or_else(|| {
            ChartError::InvalidData("time scale cannot be built from empty data".to_owned())
        })?;

        let mut min = first.time;
        let mut max = first.time;
        for point in prices {
            min = min.min(point.time);
            max = max.max(point.time);
        }

        Self::new(min, max, width)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns a copy with a replaced domain, keeping the pixel range.
    ///
    /// Used by the view-transform controller to derive transient rescaled
    /// mappings without mutating the persisted base scale.
    pub fn with_domain(self, domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        Self::new(domain_start, domain_end, self.width)
    }

    pub fn time_to_pixel(self, time: f64) -> ChartResult<f64> {
        self.linear()?.apply(time)
    }

    pub fn pixel_to_time(self, pixel: f64) -> ChartResult<f64> {
        self.linear()?.invert(pixel)
    }

    fn linear(self) -> ChartResult<LinearScale> {
        LinearScale::new(self.domain_start, self.domain_end, 0.0, self.width)
    }
}

fn normalize_domain(start: f64, end: f64) -> ChartResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ChartError::InvalidData(
            "scale domain must be finite".to_owned(),
        ));
    }

    // A single-sample window still gets a usable one-second span.
    if start == end {
        return Ok((start - 0.5, end + 0.5));
    }

    Ok((start.min(end), start.max(end)))
}
