use approx::assert_relative_eq;
use stockchart::core::dataset::ChartDataset;
use stockchart::core::{
    DisplayWindow, DividendEvent, IndicatorConfig, PlotArea, PricePoint, PriceScale, TimeScale,
};
use stockchart::layers::crosshair::{primary_legend, project_crosshair, secondary_legend};
use stockchart::layers::dividends::{
    project_dividend_markers, tooltip_for_marker, DividendMarkerConfig,
};

fn sample(time: f64, close: f64) -> PricePoint {
    PricePoint::new(time, close, close + 1.0, close - 1.0, close, 1234).expect("valid sample")
}

#[test]
fn crosshair_guides_reach_plot_edges() {
    let prices = vec![sample(0.0, 20.0), sample(100.0, 30.0)];
    let time = TimeScale::from_prices(&prices, 800.0).expect("time scale");
    let price = PriceScale::from_prices(&prices, 400.0).expect("price scale");
    let plot = PlotArea {
        width: 800.0,
        height: 400.0,
    };

    let geometry = project_crosshair(&prices[1], time, price, plot).expect("projection");

    assert_relative_eq!(geometry.x, 800.0);
    assert_relative_eq!(geometry.guide_x_end, 800.0);
    assert_relative_eq!(geometry.guide_y_end, 400.0);
}

#[test]
fn primary_legend_lists_all_sample_fields_in_order() {
    // 2018-06-01T00:00:00Z.
    let point = sample(1_527_811_200.0, 141.579);
    let legend = primary_legend(&point);

    assert_eq!(
        legend,
        vec![
            "date: 2018-06-01".to_owned(),
            "high: 142.58".to_owned(),
            "low: 140.58".to_owned(),
            "open: 141.58".to_owned(),
            "close: 141.58".to_owned(),
            "volume: 1234".to_owned(),
        ]
    );
}

#[test]
fn secondary_legend_reports_both_indicators_on_exact_match() {
    let prices = vec![sample(0.0, 10.0), sample(1.0, 12.0)];
    let window = DisplayWindow::new(0.0, 10.0).expect("window");
    let config = IndicatorConfig {
        moving_average_window: 1,
        bollinger_window: 1,
        band_multiplier: 2.0,
    };
    let dataset = ChartDataset::build(prices, Vec::new(), window, config);

    let legend = secondary_legend(&dataset, config, 1.0);

    assert_eq!(
        legend,
        vec![
            "Moving Average (2): 11.00".to_owned(),
            "Bollinger Bands (2, 2.0, MA): 9.00 - 11.00 - 13.00".to_owned(),
        ]
    );
}

#[test]
fn secondary_legend_omits_lines_with_no_exact_match() {
    let prices = vec![sample(0.0, 10.0), sample(1.0, 12.0)];
    let window = DisplayWindow::new(0.0, 10.0).expect("window");
    let config = IndicatorConfig::default();
    let dataset = ChartDataset::build(prices, Vec::new(), window, config);

    // No indicator point carries this date.
    assert!(secondary_legend(&dataset, config, 0.5).is_empty());
}

#[test]
fn dividend_markers_float_above_plot_bottom() {
    let prices = vec![sample(0.0, 20.0), sample(100.0, 30.0)];
    let time = TimeScale::from_prices(&prices, 800.0).expect("time scale");
    let dividends = vec![DividendEvent::new(50.0, 0.45).expect("valid dividend")];

    let geometry = project_dividend_markers(
        &dividends,
        time,
        400.0,
        DividendMarkerConfig::default(),
    )
    .expect("projection")
    .expect("geometry");

    assert_eq!(geometry.markers.len(), 1);
    assert_relative_eq!(geometry.markers[0].y, 320.0);
    assert_relative_eq!(geometry.markers[0].x, 400.0);
}

#[test]
fn no_dividends_yields_no_marker_geometry() {
    let prices = vec![sample(0.0, 20.0), sample(100.0, 30.0)];
    let time = TimeScale::from_prices(&prices, 800.0).expect("time scale");

    let geometry = project_dividend_markers(&[], time, 400.0, DividendMarkerConfig::default())
        .expect("projection");
    assert!(geometry.is_none());
}

#[test]
fn dividend_tooltip_anchors_relative_to_pointer() {
    let prices = vec![sample(0.0, 20.0), sample(100.0, 30.0)];
    let time = TimeScale::from_prices(&prices, 800.0).expect("time scale");
    // 2018-06-22T00:00:00Z.
    let dividends = vec![DividendEvent::new(1_529_625_600.0, 0.45).expect("valid dividend")];
    let config = DividendMarkerConfig::default();

    let geometry = project_dividend_markers(&dividends, time, 400.0, config)
        .expect("projection")
        .expect("geometry");
    let tooltip = tooltip_for_marker(geometry.markers[0], 500.0, 300.0, config);

    assert_relative_eq!(tooltip.x, 420.0);
    assert_relative_eq!(tooltip.y, 250.0);
    assert_eq!(tooltip.amount_line, "Dividends: 0.45");
    assert_eq!(tooltip.date_line, "Date: 2018-06-22");
}
