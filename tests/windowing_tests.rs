use approx::assert_relative_eq;
use stockchart::core::dataset::ChartDataset;
use stockchart::core::windowing::{dividends_in_window, prices_in_window};
use stockchart::core::{DisplayWindow, DividendEvent, IndicatorConfig, PricePoint};

fn sample(time: f64, close: f64) -> PricePoint {
    PricePoint::new(time, close, close + 1.0, close - 1.0, close, 100).expect("valid sample")
}

#[test]
fn window_is_half_open() {
    let window = DisplayWindow::new(100.0, 300.0).expect("valid window");

    assert!(window.contains(100.0));
    assert!(window.contains(299.0));
    assert!(!window.contains(300.0));
    assert!(!window.contains(99.0));
}

#[test]
fn window_rejects_descending_bounds() {
    assert!(DisplayWindow::new(300.0, 100.0).is_err());
    assert!(DisplayWindow::new(100.0, 100.0).is_err());
}

#[test]
fn default_window_covers_late_2018() {
    let window = DisplayWindow::default();

    // 2018-05-31 inclusive through 2019-01-01 exclusive.
    assert!(window.contains(1_527_724_800.0));
    assert!(window.contains(1_540_000_000.0));
    assert!(!window.contains(1_546_300_800.0));
}

#[test]
fn windowing_preserves_order_and_drops_outsiders() {
    let prices = vec![
        sample(50.0, 10.0),
        sample(150.0, 11.0),
        sample(250.0, 12.0),
        sample(350.0, 13.0),
    ];
    let window = DisplayWindow::new(100.0, 300.0).expect("valid window");

    let windowed = prices_in_window(&prices, window);
    let times: Vec<f64> = windowed.iter().map(|point| point.time).collect();
    assert_eq!(times, vec![150.0, 250.0]);
}

#[test]
fn dividends_are_windowed_independently() {
    let dividends = vec![
        DividendEvent::new(50.0, 0.4).expect("valid"),
        DividendEvent::new(200.0, 0.5).expect("valid"),
    ];
    let window = DisplayWindow::new(100.0, 300.0).expect("valid window");

    let windowed = dividends_in_window(&dividends, window);
    assert_eq!(windowed.len(), 1);
    assert_relative_eq!(windowed[0].amount, 0.5);
}

#[test]
fn dataset_indicators_are_seeded_from_unfiltered_data() {
    // Display window starts at t=2; the trailing mean at t=2 still sees the
    // out-of-window samples before it.
    let prices = vec![
        sample(0.0, 10.0),
        sample(1.0, 12.0),
        sample(2.0, 11.0),
        sample(3.0, 13.0),
    ];
    let window = DisplayWindow::new(2.0, 10.0).expect("valid window");
    let config = IndicatorConfig {
        moving_average_window: 1,
        bollinger_window: 1,
        band_multiplier: 2.0,
    };

    let dataset = ChartDataset::build(prices, Vec::new(), window, config);

    assert_eq!(dataset.valid_prices.len(), 2);
    assert_eq!(dataset.moving_average.len(), 4);

    let at_window_start = dataset.moving_average_at(2.0).expect("exact match");
    assert_relative_eq!(at_window_start.average, 11.5);
}

#[test]
fn dataset_lookup_is_exact_date_equality() {
    let prices = vec![sample(0.0, 10.0), sample(1.0, 12.0)];
    let window = DisplayWindow::new(0.0, 10.0).expect("valid window");

    let dataset = ChartDataset::build(prices, Vec::new(), window, IndicatorConfig::default());

    assert!(dataset.moving_average_at(1.0).is_some());
    assert!(dataset.moving_average_at(0.5).is_none());
    assert!(dataset.bollinger_at(1.0).is_some());
    assert!(dataset.bollinger_at(7.0).is_none());
}

#[test]
fn empty_window_yields_empty_dataset() {
    let prices = vec![sample(0.0, 10.0), sample(1.0, 12.0)];
    let window = DisplayWindow::new(100.0, 200.0).expect("valid window");

    let dataset = ChartDataset::build(prices, Vec::new(), window, IndicatorConfig::default());

    assert!(dataset.is_empty());
    // Indicator series still cover the full input.
    assert_eq!(dataset.moving_average.len(), 2);
}
