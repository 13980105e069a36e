//! Windowed statistical indicators derived from a price series.
//!
//! Both indicators use a trailing window `[max(0, i - window), i]` inclusive,
//! so the effective subset ramps from length 1 at the start of the series up
//! to `window + 1` samples. The ramp is intentional: legend values and band
//! geometry depend on it.

use serde::{Deserialize, Serialize};

use crate::core::types::PricePoint;
use crate::error::{ChartError, ChartResult};

/// Indicator windows and band sizing.
///
/// The window fields hold the trailing look-back distance, so the effective
/// subset length is `window + 1` once the ramp completes. Display labels use
/// the subset length (50 and 20 for the defaults).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub moving_average_window: usize,
    pub bollinger_window: usize,
    pub band_multiplier: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            moving_average_window: 49,
            bollinger_window: 19,
            band_multiplier: 2.0,
        }
    }
}

impl IndicatorConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.band_multiplier.is_finite() || self.band_multiplier <= 0.0 {
            return Err(ChartError::InvalidData(
                "band multiplier must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Subset length shown in the moving-average legend label.
    #[must_use]
    pub fn moving_average_label_span(self) -> usize {
        self.moving_average_window + 1
    }

    /// Subset length shown in the Bollinger legend label.
    #[must_use]
    pub fn bollinger_label_span(self) -> usize {
        self.bollinger_window + 1
    }
}

/// One trailing-mean sample; same date set and order as the input series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingAveragePoint {
    pub time: f64,
    pub average: f64,
}

/// One Bollinger sample: trailing mean, population standard deviation, and
/// the bands at `mean +/- multiplier * sd`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerPoint {
    pub time: f64,
    pub average: f64,
    pub standard_deviation: f64,
    pub upper_band: f64,
    pub lower_band: f64,
}

/// Computes the trailing simple moving average of closes.
///
/// Produces one output point per input point with the same time. An empty
/// series yields empty output; there are no error cases.
#[must_use]
pub fn moving_average(prices: &[PricePoint], window: usize) -> Vec<MovingAveragePoint> {
    prices
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let subset = trailing_subset(prices, index, window);
            MovingAveragePoint {
                time: point.time,
                average: mean_close(subset),
            }
        })
        .collect()
}

/// Computes Bollinger bands over the trailing window.
///
/// The variance is the population variance (divided by the subset length,
/// not length - 1). A length-1 subset therefore has zero deviation and both
/// bands collapse onto the average.
#[must_use]
pub fn bollinger_bands(
    prices: &[PricePoint],
    window: usize,
    multiplier: f64,
) -> Vec<BollingerPoint> {
    prices
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let subset = trailing_subset(prices, index, window);
            let average = mean_close(subset);

            let sum_squared_difference: f64 = subset
                .iter()
                .map(|sample| {
                    let difference = sample.close - average;
                    difference * difference
                })
                .sum();
            let variance = sum_squared_difference / subset.len() as f64;
            let standard_deviation = variance.sqrt();

            BollingerPoint {
                time: point.time,
                average,
                standard_deviation,
                upper_band: average + standard_deviation * multiplier,
                lower_band: average - standard_deviation * multiplier,
            }
        })
        .collect()
}

fn trailing_subset(prices: &[PricePoint], index: usize, window: usize) -> &[PricePoint] {
    let start = index.saturating_sub(window);
    &prices[start..=index]
}

fn mean_close(subset: &[PricePoint]) -> f64 {
    let sum: f64 = subset.iter().map(|point| point.close).sum();
    sum / subset.len() as f64
}
