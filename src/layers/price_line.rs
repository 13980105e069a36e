use serde::{Deserialize, Serialize};

use crate::core::types::PricePoint;
use crate::core::{PriceScale, TimeScale};
use crate::error::ChartResult;

/// Projected close-price polyline in pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLineGeometry {
    pub path: Vec<(f64, f64)>,
}

/// Projects the windowed closes into a polyline.
///
/// Deterministic and side-effect free so rendering and tests consume the
/// exact same geometry. Returns `None` for series too short to draw.
pub fn project_close_line(
    prices: &[PricePoint],
    time_scale: TimeScale,
    price_scale: PriceScale,
) -> ChartResult<Option<PriceLineGeometry>> {
    if prices.len() < 2 {
        return Ok(None);
    }

    let mut path = Vec::with_capacity(prices.len());
    for point in prices {
        let x = time_scale.time_to_pixel(point.time)?;
        let y = price_scale.price_to_pixel(point.close)?;
        path.push((x, y));
    }

    Ok(Some(PriceLineGeometry { path }))
}
