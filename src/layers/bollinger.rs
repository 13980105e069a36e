use serde::{Deserialize, Serialize};

use crate::core::indicators::BollingerPoint;
use crate::core::{PriceScale, TimeScale};
use crate::error::ChartResult;

/// Projected Bollinger overlay: middle/upper/lower polylines plus the filled
/// band-area polygon spanning upper to lower across the whole series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerGeometry {
    pub middle: Vec<(f64, f64)>,
    pub upper: Vec<(f64, f64)>,
    pub lower: Vec<(f64, f64)>,
    /// Closed outline: upper band left-to-right, then lower band reversed.
    pub band_area: Vec<(f64, f64)>,
}

pub fn project_bollinger_bands(
    points: &[BollingerPoint],
    time_scale: TimeScale,
    price_scale: PriceScale,
) -> ChartResult<Option<BollingerGeometry>> {
    if points.len() < 2 {
        return Ok(None);
    }

    let mut middle = Vec::with_capacity(points.len());
    let mut upper = Vec::with_capacity(points.len());
    let mut lower = Vec::with_capacity(points.len());

    for point in points {
        let x = time_scale.time_to_pixel(point.time)?;
        middle.push((x, price_scale.price_to_pixel(point.average)?));
        upper.push((x, price_scale.price_to_pixel(point.upper_band)?));
        lower.push((x, price_scale.price_to_pixel(point.lower_band)?));
    }

    let mut band_area = Vec::with_capacity(upper.len() + lower.len());
    band_area.extend(upper.iter().copied());
    band_area.extend(lower.iter().rev().copied());

    Ok(Some(BollingerGeometry {
        middle,
        upper,
        lower,
        band_area,
    }))
}
