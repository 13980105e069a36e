use serde::{Deserialize, Serialize};

use crate::core::types::PricePoint;
use crate::core::{PriceScale, TimeScale};
use crate::error::ChartResult;
use crate::layers::PriceDirection;

/// Fixed candle body width in pixels.
pub const CANDLE_BODY_WIDTH: f64 = 5.0;

/// Projected candle geometry in pixel coordinates, keyed by sample time.
///
/// The body's top edge sits at the pixel of the higher of open/close (the
/// y axis is inverted, so the higher price has the smaller pixel y).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGlyph {
    pub key_time: f64,
    pub center_x: f64,
    pub body_left: f64,
    pub body_right: f64,
    pub body_top: f64,
    pub body_height: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub direction: PriceDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickGeometry {
    pub glyphs: Vec<CandleGlyph>,
}

/// Projects windowed samples into candlestick glyphs.
pub fn project_candlesticks(
    prices: &[PricePoint],
    time_scale: TimeScale,
    price_scale: PriceScale,
) -> ChartResult<Option<CandlestickGeometry>> {
    if prices.is_empty() {
        return Ok(None);
    }

    let half = CANDLE_BODY_WIDTH / 2.0;
    let mut glyphs = Vec::with_capacity(prices.len());
    for point in prices {
        let center_x = time_scale.time_to_pixel(point.time)?;
        let open_y = price_scale.price_to_pixel(point.open)?;
        let close_y = price_scale.price_to_pixel(point.close)?;

        let direction = if point.close > point.open {
            PriceDirection::Up
        } else {
            PriceDirection::Down
        };

        glyphs.push(CandleGlyph {
            key_time: point.time,
            center_x,
            body_left: center_x - half,
            body_right: center_x + half,
            body_top: open_y.min(close_y),
            body_height: (open_y - close_y).abs(),
            wick_top: price_scale.price_to_pixel(point.high)?,
            wick_bottom: price_scale.price_to_pixel(point.low)?,
            direction,
        });
    }

    Ok(Some(CandlestickGeometry { glyphs }))
}
