use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::core::types::PricePoint;
use crate::error::{ChartError, ChartResult};

/// Fixed close-domain padding, in price units, below the minimum close.
pub const PRICE_PADDING_BELOW: f64 = 5.0;
/// Fixed close-domain padding, in price units, above the maximum close.
pub const PRICE_PADDING_ABOVE: f64 = 4.0;

/// Fraction of the plot height occupied by the volume overlay, measured up
/// from the bottom edge.
pub const VOLUME_OVERLAY_RATIO: f64 = 0.25;

/// Price axis mapping `[min close - 5, max close + 4]` onto `[plot height, 0]`.
///
/// The pixel range is inverted: higher prices map to smaller y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScale {
    domain_start: f64,
    domain_end: f64,
    height: f64,
}

impl PriceScale {
    pub fn new(domain_start: f64, domain_end: f64, height: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start >= domain_end {
            return Err(ChartError::InvalidData(
                "price scale domain must be finite and ascending".to_owned(),
            ));
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(ChartError::InvalidData(
                "price scale height must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            height,
        })
    }

    /// Fits the domain from windowed closes with the fixed padding constants.
    pub fn from_prices(prices: &[PricePoint], height: f64) -> ChartResult<Self> {
        let first = prices.first().ok_or_else(|| {
            ChartError::InvalidData("price scale cannot be built from empty data".to_owned())
        })?;

        let mut min = first.close;
        let mut max = first.close;
        for point in prices {
            min = min.min(point.close);
            max = max.max(point.close);
        }

        Self::new(min - PRICE_PADDING_BELOW, max + PRICE_PADDING_ABOVE, height)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns a copy with a replaced domain, keeping the inverted pixel range.
    pub fn with_domain(self, domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        Self::new(domain_start, domain_end, self.height)
    }

    pub fn price_to_pixel(self, price: f64) -> ChartResult<f64> {
        self.linear()?.apply(price)
    }

    pub fn pixel_to_price(self, pixel: f64) -> ChartResult<f64> {
        self.linear()?.invert(pixel)
    }

    fn linear(self) -> ChartResult<LinearScale> {
        LinearScale::new(self.domain_start, self.domain_end, self.height, 0.0)
    }
}

/// Volume overlay axis occupying the bottom quarter of the plot.
///
/// Maps `[min volume, max volume]` onto `[height, height * 3/4]` so the
/// tallest bar reaches one quarter of the way up the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeScale {
    domain_start: f64,
    domain_end: f64,
    height: f64,
}

impl VolumeScale {
    pub fn from_prices(prices: &[PricePoint], height: f64) -> ChartResult<Self> {
        let first = prices.first().ok_or_else(|| {
            ChartError::InvalidData("volume scale cannot be built from empty data".to_owned())
        })?;

        if !height.is_finite() || height <= 0.0 {
            return Err(ChartError::InvalidData(
                "volume scale height must be finite and > 0".to_owned(),
            ));
        }

        let mut min = first.volume;
        let mut max = first.volume;
        for point in prices {
            min = min.min(point.volume);
            max = max.max(point.volume);
        }

        let (domain_start, domain_end) = if min == max {
            // Flat-volume series still maps to the overlay band.
            (min as f64 - 0.5, max as f64 + 0.5)
        } else {
            (min as f64, max as f64)
        };

        Ok(Self {
            domain_start,
            domain_end,
            height,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn volume_to_pixel(self, volume: u64) -> ChartResult<f64> {
        LinearScale::new(
            self.domain_start,
            self.domain_end,
            self.height,
            self.height * (1.0 - VOLUME_OVERLAY_RATIO),
        )?
        .apply(volume as f64)
    }
}
