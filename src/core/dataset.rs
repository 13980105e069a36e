use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use tracing::debug;

use crate::core::indicators::{
    self, BollingerPoint, IndicatorConfig, MovingAveragePoint,
};
use crate::core::types::{DividendEvent, PricePoint};
use crate::core::windowing::{self, DisplayWindow};

/// The working unit: windowed prices and dividends plus indicator series
/// derived from the unfiltered source.
///
/// `moving_average` and `bollinger` share index alignment with `full_prices`,
/// so every display-window point has an exact-date indicator match. Exact
/// lookups go through time-keyed indexes instead of linear scans.
#[derive(Debug, Clone, Default)]
pub struct ChartDataset {
    pub valid_prices: Vec<PricePoint>,
    pub full_prices: Vec<PricePoint>,
    pub dividends: Vec<DividendEvent>,
    pub moving_average: Vec<MovingAveragePoint>,
    pub bollinger: Vec<BollingerPoint>,
    moving_average_index: IndexMap<OrderedFloat<f64>, usize>,
    bollinger_index: IndexMap<OrderedFloat<f64>, usize>,
}

impl ChartDataset {
    /// Windows the series and computes indicator data.
    ///
    /// `full_prices` must already be filtered to valid records and sorted
    /// ascending by time.
    #[must_use]
    pub fn build(
        full_prices: Vec<PricePoint>,
        dividends: Vec<DividendEvent>,
        window: DisplayWindow,
        config: IndicatorConfig,
    ) -> Self {
        let valid_prices = windowing::prices_in_window(&full_prices, window);
        let dividends = windowing::dividends_in_window(&dividends, window);

        let moving_average =
            indicators::moving_average(&full_prices, config.moving_average_window);
        let bollinger = indicators::bollinger_bands(
            &full_prices,
            config.bollinger_window,
            config.band_multiplier,
        );

        let moving_average_index = moving_average
            .iter()
            .enumerate()
            .map(|(index, point)| (OrderedFloat(point.time), index))
            .collect();
        let bollinger_index = bollinger
            .iter()
            .enumerate()
            .map(|(index, point)| (OrderedFloat(point.time), index))
            .collect();

        debug!(
            windowed = valid_prices.len(),
            full = full_prices.len(),
            dividends = dividends.len(),
            "built chart dataset"
        );

        Self {
            valid_prices,
            full_prices,
            dividends,
            moving_average,
            bollinger,
            moving_average_index,
            bollinger_index,
        }
    }

    /// `true` when the display window holds no samples; all layer draws are
    /// no-ops in that case.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.valid_prices.is_empty()
    }

    /// Exact-date moving-average lookup (equality, not nearest).
    #[must_use]
    pub fn moving_average_at(&self, time: f64) -> Option<&MovingAveragePoint> {
        self.moving_average_index
            .get(&OrderedFloat(time))
            .map(|&index| &self.moving_average[index])
    }

    /// Exact-date Bollinger lookup (equality, not nearest).
    #[must_use]
    pub fn bollinger_at(&self, time: f64) -> Option<&BollingerPoint> {
        self.bollinger_index
            .get(&OrderedFloat(time))
            .map(|&index| &self.bollinger[index])
    }
}
