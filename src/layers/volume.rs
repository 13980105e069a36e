use serde::{Deserialize, Serialize};

use crate::core::types::PricePoint;
use crate::core::{TimeScale, VolumeScale};
use crate::error::ChartResult;
use crate::layers::PriceDirection;

/// Fixed volume bar width in pixels.
pub const VOLUME_BAR_WIDTH: f64 = 1.0;

/// One projected volume bar, keyed by its sample time so re-binds across
/// scale changes keep stable identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeBar {
    pub key_time: f64,
    pub x: f64,
    pub y_top: f64,
    pub y_bottom: f64,
    pub direction: PriceDirection,
}

/// Projected volume histogram across the display window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeGeometry {
    pub bars: Vec<VolumeBar>,
}

/// Projects windowed samples into volume bars on the overlay scale.
///
/// A bar is classified `Down` when the previous sample's close is greater
/// than its own close; the first bar has no prior point and is always `Up`.
pub fn project_volume_bars(
    prices: &[PricePoint],
    time_scale: TimeScale,
    volume_scale: VolumeScale,
    plot_height: f64,
) -> ChartResult<Option<VolumeGeometry>> {
    if prices.is_empty() {
        return Ok(None);
    }

    let mut bars = Vec::with_capacity(prices.len());
    for (index, point) in prices.iter().enumerate() {
        let direction = if index > 0 && prices[index - 1].close > point.close {
            PriceDirection::Down
        } else {
            PriceDirection::Up
        };

        bars.push(VolumeBar {
            key_time: point.time,
            x: time_scale.time_to_pixel(point.time)?,
            y_top: volume_scale.volume_to_pixel(point.volume)?,
            y_bottom: plot_height,
            direction,
        });
    }

    Ok(Some(VolumeGeometry { bars }))
}
