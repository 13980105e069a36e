use serde::{Deserialize, Serialize};

use crate::core::types::PricePoint;
use crate::core::{PriceScale, TimeScale};
use crate::error::ChartResult;
use crate::layers::PriceDirection;

/// Horizontal length of the open/close ticks in pixels.
pub const OHLC_TICK_WIDTH: f64 = 5.0;

/// One projected OHLC glyph: vertical high-low stem, open tick to the left,
/// close tick to the right. Keyed by sample time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcGlyph {
    pub key_time: f64,
    pub x: f64,
    pub stem_top: f64,
    pub stem_bottom: f64,
    pub open_y: f64,
    pub close_y: f64,
    pub direction: PriceDirection,
}

impl OhlcGlyph {
    /// Left edge of the open tick (`x - tick width`).
    #[must_use]
    pub fn open_tick_start(self) -> f64 {
        self.x - OHLC_TICK_WIDTH
    }

    /// Right edge of the close tick (`x + tick width`).
    #[must_use]
    pub fn close_tick_end(self) -> f64 {
        self.x + OHLC_TICK_WIDTH
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcGeometry {
    pub glyphs: Vec<OhlcGlyph>,
}

/// Projects windowed samples into OHLC bar glyphs.
///
/// A glyph is `Up` when close is strictly greater than open; equal
/// open/close classifies down.
pub fn project_ohlc_bars(
    prices: &[PricePoint],
    time_scale: TimeScale,
    price_scale: PriceScale,
) -> ChartResult<Option<OhlcGeometry>> {
    if prices.is_empty() {
        return Ok(None);
    }

    let mut glyphs = Vec::with_capacity(prices.len());
    for point in prices {
        let direction = if point.close > point.open {
            PriceDirection::Up
        } else {
            PriceDirection::Down
        };

        glyphs.push(OhlcGlyph {
            key_time: point.time,
            x: time_scale.time_to_pixel(point.time)?,
            stem_top: price_scale.price_to_pixel(point.high)?,
            stem_bottom: price_scale.price_to_pixel(point.low)?,
            open_y: price_scale.price_to_pixel(point.open)?,
            close_y: price_scale.price_to_pixel(point.close)?,
            direction,
        });
    }

    Ok(Some(OhlcGeometry { glyphs }))
}
