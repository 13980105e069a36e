//! Nearest-date lookup driving crosshair tracking.

use crate::core::types::PricePoint;

/// Finds the series point nearest to a target time.
///
/// `prices` must be sorted ascending by time. The insertion index is the
/// leftmost position with `time >= target`, searched from index 1, and the
/// candidates either side of it are compared by absolute time distance.
/// Exact ties resolve to the earlier point.
///
/// Callers clamp pointer coordinates to the plot extent first; a target
/// before the first sample's time is a precondition violation, not a
/// recoverable case.
#[must_use]
pub fn nearest_point(prices: &[PricePoint], target_time: f64) -> Option<&PricePoint> {
    let first = prices.first()?;
    debug_assert!(
        target_time >= first.time,
        "locator target precedes the series start"
    );

    if prices.len() == 1 {
        return Some(first);
    }

    let insertion = prices[1..].partition_point(|point| point.time < target_time) + 1;
    let before = &prices[insertion - 1];
    let Some(after) = prices.get(insertion) else {
        return Some(before);
    };

    // Strictly-greater comparison: equidistant targets keep the earlier point.
    if target_time - before.time > after.time - target_time {
        Some(after)
    } else {
        Some(before)
    }
}
