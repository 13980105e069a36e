use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Converts a logical unix-seconds time back into a calendar datetime.
///
/// Sub-millisecond fractions are truncated, which is exact for the
/// second-resolution timestamps used by daily price series.
#[must_use]
pub fn unix_seconds_to_datetime(time: f64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis((time * 1000.0) as i64)
}
