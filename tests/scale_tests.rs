use stockchart::core::{
    ChartLayout, LinearScale, PricePoint, PriceScale, TimeScale, Viewport, VolumeScale,
};

fn sample(time: f64, close: f64, volume: u64) -> PricePoint {
    PricePoint::new(time, close, close + 1.0, close - 1.0, close, volume).expect("valid sample")
}

#[test]
fn linear_scale_round_trip_within_tolerance() {
    let scale = LinearScale::new(10.0, 110.0, 0.0, 1000.0).expect("valid scale");

    let original = 42.5;
    let px = scale.apply(original).expect("to pixel");
    let recovered = scale.invert(px).expect("from pixel");

    assert!((recovered - original).abs() <= 1e-9);
}

#[test]
fn linear_scale_supports_inverted_range() {
    let scale = LinearScale::new(0.0, 100.0, 600.0, 0.0).expect("valid scale");

    assert_eq!(scale.apply(0.0).expect("bottom"), 600.0);
    assert_eq!(scale.apply(100.0).expect("top"), 0.0);
    assert!((scale.invert(300.0).expect("mid") - 50.0).abs() <= 1e-9);
}

#[test]
fn linear_scale_rejects_degenerate_domain() {
    assert!(LinearScale::new(5.0, 5.0, 0.0, 100.0).is_err());
    assert!(LinearScale::new(0.0, 1.0, 10.0, 10.0).is_err());
}

#[test]
fn time_scale_fits_series_extent() {
    let prices = vec![sample(100.0, 20.0, 1), sample(300.0, 21.0, 2), sample(200.0, 22.0, 3)];
    let scale = TimeScale::from_prices(&prices, 800.0).expect("time fit");

    assert_eq!(scale.domain(), (100.0, 300.0));
    assert_eq!(scale.time_to_pixel(100.0).expect("left"), 0.0);
    assert_eq!(scale.time_to_pixel(300.0).expect("right"), 800.0);
}

#[test]
fn time_scale_single_sample_gets_usable_span() {
    let prices = vec![sample(1000.0, 20.0, 5)];
    let scale = TimeScale::from_prices(&prices, 800.0).expect("time fit");

    let (start, end) = scale.domain();
    assert!(start < 1000.0);
    assert!(end > 1000.0);
    assert!((scale.time_to_pixel(1000.0).expect("center") - 400.0).abs() <= 1e-9);
}

#[test]
fn time_scale_rejects_empty_series() {
    assert!(TimeScale::from_prices(&[], 800.0).is_err());
}

#[test]
fn price_scale_applies_fixed_close_padding() {
    let prices = vec![sample(0.0, 20.0, 1), sample(1.0, 30.0, 2)];
    let scale = PriceScale::from_prices(&prices, 500.0).expect("price fit");

    assert_eq!(scale.domain(), (15.0, 34.0));
}

#[test]
fn price_scale_uses_inverted_pixel_range() {
    let prices = vec![sample(0.0, 20.0, 1), sample(1.0, 30.0, 2)];
    let scale = PriceScale::from_prices(&prices, 500.0).expect("price fit");

    assert_eq!(scale.price_to_pixel(34.0).expect("top"), 0.0);
    assert_eq!(scale.price_to_pixel(15.0).expect("bottom"), 500.0);
}

#[test]
fn price_scale_round_trip_after_domain_swap() {
    let scale = PriceScale::new(10.0, 110.0, 600.0).expect("valid scale");
    let narrowed = scale.with_domain(40.0, 60.0).expect("narrowed");

    let px = narrowed.price_to_pixel(50.0).expect("to pixel");
    let recovered = narrowed.pixel_to_price(px).expect("from pixel");
    assert!((recovered - 50.0).abs() <= 1e-9);
    // The original scale is a value copy and keeps its domain.
    assert_eq!(scale.domain(), (10.0, 110.0));
}

#[test]
fn volume_scale_occupies_bottom_quarter() {
    let prices = vec![sample(0.0, 20.0, 100), sample(1.0, 21.0, 500)];
    let scale = VolumeScale::from_prices(&prices, 400.0).expect("volume fit");

    assert_eq!(scale.volume_to_pixel(100).expect("min"), 400.0);
    assert_eq!(scale.volume_to_pixel(500).expect("max"), 300.0);
}

#[test]
fn volume_scale_flat_series_stays_in_band() {
    let prices = vec![sample(0.0, 20.0, 250), sample(1.0, 21.0, 250)];
    let scale = VolumeScale::from_prices(&prices, 400.0).expect("volume fit");

    let y = scale.volume_to_pixel(250).expect("flat");
    assert!((300.0..=400.0).contains(&y));
}

#[test]
fn desktop_layout_takes_three_quarters_width() {
    let layout = ChartLayout::default();
    let plot = layout.plot_area(Viewport::new(1000, 600)).expect("plot");

    // 0.75 * 1000 - (50 + 20) horizontal margins, full height minus vertical.
    assert!((plot.width - 680.0).abs() <= 1e-9);
    assert!((plot.height - 500.0).abs() <= 1e-9);
}

#[test]
fn mobile_layout_takes_half_height() {
    let layout = ChartLayout::default();
    let plot = layout.plot_area(Viewport::new(600, 800)).expect("plot");

    assert!((plot.width - 530.0).abs() <= 1e-9);
    assert!((plot.height - 300.0).abs() <= 1e-9);
}

#[test]
fn breakpoint_boundary_uses_mobile_layout() {
    let layout = ChartLayout::default();
    let at_breakpoint = layout.plot_area(Viewport::new(768, 800)).expect("plot");
    let above_breakpoint = layout.plot_area(Viewport::new(769, 800)).expect("plot");

    assert!((at_breakpoint.height - 300.0).abs() <= 1e-9);
    assert!((above_breakpoint.height - 700.0).abs() <= 1e-9);
}

#[test]
fn invalid_viewport_is_rejected() {
    let layout = ChartLayout::default();
    assert!(layout.plot_area(Viewport::new(0, 600)).is_err());
    // Margins larger than the drawable size also fail.
    assert!(layout.plot_area(Viewport::new(60, 60)).is_err());
}
