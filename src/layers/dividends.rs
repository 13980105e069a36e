use serde::{Deserialize, Serialize};

use crate::core::primitives::unix_seconds_to_datetime;
use crate::core::types::DividendEvent;
use crate::core::TimeScale;
use crate::error::{ChartError, ChartResult};

/// Placement and tooltip tuning for dividend markers.
///
/// Markers sit at a fixed vertical offset above the plot bottom, not tied to
/// any price; the tooltip anchors relative to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividendMarkerConfig {
    pub marker_size_px: f64,
    pub vertical_offset_px: f64,
    pub tooltip_offset_x_px: f64,
    pub tooltip_offset_y_px: f64,
    pub marker_opacity: f64,
}

impl Default for DividendMarkerConfig {
    fn default() -> Self {
        Self {
            // Square with roughly 300 square pixels of area.
            marker_size_px: 17.32,
            vertical_offset_px: 80.0,
            tooltip_offset_x_px: -80.0,
            tooltip_offset_y_px: -50.0,
            marker_opacity: 0.8,
        }
    }
}

impl DividendMarkerConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.marker_size_px.is_finite() || self.marker_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "marker size must be finite and > 0".to_owned(),
            ));
        }
        if !self.vertical_offset_px.is_finite() || self.vertical_offset_px < 0.0 {
            return Err(ChartError::InvalidData(
                "marker vertical offset must be finite and >= 0".to_owned(),
            ));
        }
        if !self.marker_opacity.is_finite() || !(0.0..=1.0).contains(&self.marker_opacity) {
            return Err(ChartError::InvalidData(
                "marker opacity must be in [0, 1]".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// One square "D" marker, keyed by event time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividendMarker {
    pub key_time: f64,
    pub x: f64,
    pub y: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendGeometry {
    pub markers: Vec<DividendMarker>,
}

/// Hover tooltip content and anchor for one marker.
///
/// Appears on pointer-enter; the engine fades it out over the marker
/// transition duration on pointer-leave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendTooltip {
    pub x: f64,
    pub y: f64,
    pub amount_line: String,
    pub date_line: String,
}

/// Projects windowed dividend events into markers at `height - offset`.
pub fn project_dividend_markers(
    dividends: &[DividendEvent],
    time_scale: TimeScale,
    plot_height: f64,
    config: DividendMarkerConfig,
) -> ChartResult<Option<DividendGeometry>> {
    if dividends.is_empty() {
        return Ok(None);
    }

    let config = config.validate()?;
    let y = plot_height - config.vertical_offset_px;

    let mut markers = Vec::with_capacity(dividends.len());
    for event in dividends {
        markers.push(DividendMarker {
            key_time: event.time,
            x: time_scale.time_to_pixel(event.time)?,
            y,
            amount: event.amount,
        });
    }

    Ok(Some(DividendGeometry { markers }))
}

/// Builds the hover tooltip for a marker, anchored relative to the pointer.
#[must_use]
pub fn tooltip_for_marker(
    marker: DividendMarker,
    pointer_x: f64,
    pointer_y: f64,
    config: DividendMarkerConfig,
) -> DividendTooltip {
    let date_line = match unix_seconds_to_datetime(marker.key_time) {
        Some(date) => format!("Date: {}", date.format("%Y-%m-%d")),
        None => "Date: unknown".to_owned(),
    };

    DividendTooltip {
        x: pointer_x + config.tooltip_offset_x_px,
        y: pointer_y + config.tooltip_offset_y_px,
        amount_line: format!("Dividends: {}", marker.amount),
        date_line,
    }
}
