//! Crosshair glyph geometry and the value legends it drives.

use serde::{Deserialize, Serialize};

use crate::core::dataset::ChartDataset;
use crate::core::indicators::IndicatorConfig;
use crate::core::primitives::unix_seconds_to_datetime;
use crate::core::types::{PlotArea, PricePoint};
use crate::core::{PriceScale, TimeScale};
use crate::error::ChartResult;

/// Crosshair focus glyph: circle at the located point, with guide lines
/// spanning to the right and bottom plot edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrosshairGeometry {
    pub x: f64,
    pub y: f64,
    /// Right end of the horizontal guide (the plot's right edge).
    pub guide_x_end: f64,
    /// Bottom end of the vertical guide (the plot's bottom edge).
    pub guide_y_end: f64,
}

/// Positions the crosshair at a located point under the active scales.
pub fn project_crosshair(
    point: &PricePoint,
    time_scale: TimeScale,
    price_scale: PriceScale,
    plot: PlotArea,
) -> ChartResult<CrosshairGeometry> {
    Ok(CrosshairGeometry {
        x: time_scale.time_to_pixel(point.time)?,
        y: price_scale.price_to_pixel(point.close)?,
        guide_x_end: plot.width,
        guide_y_end: plot.height,
    })
}

/// Primary legend: one line per field of the located point, fully replacing
/// prior content on every pointer move.
#[must_use]
pub fn primary_legend(point: &PricePoint) -> Vec<String> {
    let date = match unix_seconds_to_datetime(point.time) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => "unknown".to_owned(),
    };

    vec![
        format!("date: {date}"),
        format!("high: {:.2}", point.high),
        format!("low: {:.2}", point.low),
        format!("open: {:.2}", point.open),
        format!("close: {:.2}", point.close),
        format!("volume: {}", point.volume),
    ]
}

/// Secondary legend: indicator values for the located point's exact date.
///
/// Lookups are equality matches, not nearest; a missing match simply omits
/// that legend line.
#[must_use]
pub fn secondary_legend(
    dataset: &ChartDataset,
    config: IndicatorConfig,
    time: f64,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);

    if let Some(point) = dataset.moving_average_at(time) {
        lines.push(format!(
            "Moving Average ({}): {:.2}",
            config.moving_average_label_span(),
            point.average
        ));
    }

    if let Some(point) = dataset.bollinger_at(time) {
        lines.push(format!(
            "Bollinger Bands ({}, {:.1}, MA): {:.2} - {:.2} - {:.2}",
            config.bollinger_label_span(),
            config.band_multiplier,
            point.lower_band,
            point.average,
            point.upper_band
        ));
    }

    lines
}
