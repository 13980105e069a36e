use serde::{Deserialize, Serialize};

use crate::core::types::{DividendEvent, PricePoint};
use crate::error::{ChartError, ChartResult};

/// 2018-05-31T00:00:00Z.
const DEFAULT_WINDOW_START: f64 = 1_527_724_800.0;
/// 2019-01-01T00:00:00Z.
const DEFAULT_WINDOW_END: f64 = 1_546_300_800.0;

/// Half-open calendar range `[start, end)` restricting what is shown on
/// screen. Indicator series are still seeded from the unfiltered data so
/// trailing windows are warm before the display window begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayWindow {
    pub start: f64,
    pub end: f64,
}

impl Default for DisplayWindow {
    /// The fixed range the bundled datasets are windowed to:
    /// 2018-05-31 through the end of 2018.
    fn default() -> Self {
        Self {
            start: DEFAULT_WINDOW_START,
            end: DEFAULT_WINDOW_END,
        }
    }
}

impl DisplayWindow {
    pub fn new(start: f64, end: f64) -> ChartResult<Self> {
        if !start.is_finite() || !end.is_finite() || start >= end {
            return Err(ChartError::InvalidData(
                "display window must be finite and ascending".to_owned(),
            ));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn contains(self, time: f64) -> bool {
        time >= self.start && time < self.end
    }
}

/// Returns the price samples inside the display window, order preserved.
#[must_use]
pub fn prices_in_window(prices: &[PricePoint], window: DisplayWindow) -> Vec<PricePoint> {
    prices
        .iter()
        .copied()
        .filter(|point| window.contains(point.time))
        .collect()
}

/// Returns the dividend events inside the display window, order preserved.
#[must_use]
pub fn dividends_in_window(dividends: &[DividendEvent], window: DisplayWindow) -> Vec<DividendEvent> {
    dividends
        .iter()
        .copied()
        .filter(|event| window.contains(event.time))
        .collect()
}
