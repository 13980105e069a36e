use stockchart::core::{nearest_point, PricePoint};

fn series(times: &[f64]) -> Vec<PricePoint> {
    times
        .iter()
        .map(|&time| PricePoint::new(time, 10.0, 11.0, 9.0, 10.0, 100).expect("valid sample"))
        .collect()
}

#[test]
fn exact_hit_returns_that_point() {
    let prices = series(&[0.0, 100.0, 200.0, 300.0]);
    let found = nearest_point(&prices, 200.0).expect("found");
    assert_eq!(found.time, 200.0);
}

#[test]
fn target_below_midpoint_snaps_to_earlier_point() {
    let prices = series(&[0.0, 100.0]);
    let found = nearest_point(&prices, 49.0).expect("found");
    assert_eq!(found.time, 0.0);
}

#[test]
fn target_above_midpoint_snaps_to_later_point() {
    let prices = series(&[0.0, 100.0]);
    let found = nearest_point(&prices, 51.0).expect("found");
    assert_eq!(found.time, 100.0);
}

#[test]
fn equidistant_target_keeps_earlier_point() {
    let prices = series(&[0.0, 100.0, 200.0]);
    let found = nearest_point(&prices, 150.0).expect("found");
    assert_eq!(found.time, 100.0);
}

#[test]
fn target_past_series_end_returns_last_point() {
    let prices = series(&[0.0, 100.0, 200.0]);
    let found = nearest_point(&prices, 5_000.0).expect("found");
    assert_eq!(found.time, 200.0);
}

#[test]
fn target_at_series_start_returns_first_point() {
    let prices = series(&[0.0, 100.0, 200.0]);
    let found = nearest_point(&prices, 0.0).expect("found");
    assert_eq!(found.time, 0.0);
}

#[test]
fn single_point_series_always_returns_it() {
    let prices = series(&[500.0]);
    let found = nearest_point(&prices, 500.0).expect("found");
    assert_eq!(found.time, 500.0);
}

#[test]
fn empty_series_returns_none() {
    assert!(nearest_point(&[], 100.0).is_none());
}

#[test]
fn irregular_gaps_resolve_by_absolute_distance() {
    // Weekend-style gap: 100 then 400.
    let prices = series(&[0.0, 100.0, 400.0]);

    let found = nearest_point(&prices, 240.0).expect("found");
    assert_eq!(found.time, 100.0);

    let found = nearest_point(&prices, 260.0).expect("found");
    assert_eq!(found.time, 400.0);
}
