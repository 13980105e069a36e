use serde::{Deserialize, Serialize};

use crate::core::indicators::MovingAveragePoint;
use crate::core::{PriceScale, TimeScale};
use crate::error::ChartResult;

/// Projected moving-average polyline. Backends draw it smoothed with a
/// basis-style curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageGeometry {
    pub path: Vec<(f64, f64)>,
}

pub fn project_moving_average(
    points: &[MovingAveragePoint],
    time_scale: TimeScale,
    price_scale: PriceScale,
) -> ChartResult<Option<MovingAverageGeometry>> {
    if points.len() < 2 {
        return Ok(None);
    }

    let mut path = Vec::with_capacity(points.len());
    for point in points {
        let x = time_scale.time_to_pixel(point.time)?;
        let y = price_scale.price_to_pixel(point.average)?;
        path.push((x, y));
    }

    Ok(Some(MovingAverageGeometry { path }))
}
