use approx::assert_relative_eq;
use stockchart::core::indicators::bollinger_bands;
use stockchart::core::{PricePoint, PriceScale, TimeScale, VolumeScale};
use stockchart::layers::candlestick::{project_candlesticks, CANDLE_BODY_WIDTH};
use stockchart::layers::ohlc::{project_ohlc_bars, OHLC_TICK_WIDTH};
use stockchart::layers::price_line::project_close_line;
use stockchart::layers::volume::project_volume_bars;
use stockchart::layers::bollinger::project_bollinger_bands;
use stockchart::layers::PriceDirection;

const PLOT_HEIGHT: f64 = 400.0;

fn scales(prices: &[PricePoint]) -> (TimeScale, PriceScale, VolumeScale) {
    (
        TimeScale::from_prices(prices, 800.0).expect("time scale"),
        PriceScale::from_prices(prices, PLOT_HEIGHT).expect("price scale"),
        VolumeScale::from_prices(prices, PLOT_HEIGHT).expect("volume scale"),
    )
}

fn ohlcv(time: f64, open: f64, high: f64, low: f64, close: f64, volume: u64) -> PricePoint {
    PricePoint::new(time, open, high, low, close, volume).expect("valid sample")
}

#[test]
fn close_line_needs_two_points() {
    let prices = vec![ohlcv(0.0, 20.0, 21.0, 19.0, 20.0, 100)];
    let (time, price, _) = scales(&prices);

    let geometry = project_close_line(&prices, time, price).expect("projection");
    assert!(geometry.is_none());
}

#[test]
fn close_line_follows_closes() {
    let prices = vec![
        ohlcv(0.0, 20.0, 21.0, 19.0, 20.0, 100),
        ohlcv(100.0, 20.0, 26.0, 19.0, 25.0, 200),
    ];
    let (time, price, _) = scales(&prices);

    let geometry = project_close_line(&prices, time, price)
        .expect("projection")
        .expect("geometry");

    assert_eq!(geometry.path.len(), 2);
    assert_relative_eq!(geometry.path[0].0, 0.0);
    assert_relative_eq!(geometry.path[1].0, 800.0);
    assert_relative_eq!(geometry.path[0].1, price.price_to_pixel(20.0).expect("y"));
}

#[test]
fn volume_bars_sit_on_plot_bottom() {
    let prices = vec![
        ohlcv(0.0, 20.0, 21.0, 19.0, 20.0, 100),
        ohlcv(100.0, 20.0, 26.0, 19.0, 25.0, 500),
    ];
    let (time, _, volume) = scales(&prices);

    let geometry = project_volume_bars(&prices, time, volume, PLOT_HEIGHT)
        .expect("projection")
        .expect("geometry");

    for bar in &geometry.bars {
        assert_relative_eq!(bar.y_bottom, PLOT_HEIGHT);
    }
    // The largest volume reaches the top of the overlay band.
    assert_relative_eq!(geometry.bars[1].y_top, PLOT_HEIGHT * 0.75);
}

#[test]
fn volume_direction_compares_against_previous_close() {
    let prices = vec![
        ohlcv(0.0, 20.0, 21.0, 19.0, 20.0, 100),
        ohlcv(100.0, 20.0, 21.0, 17.0, 18.0, 200),
        ohlcv(200.0, 18.0, 19.0, 17.0, 18.0, 300),
        ohlcv(300.0, 18.0, 22.0, 17.0, 21.0, 400),
    ];
    let (time, _, volume) = scales(&prices);

    let geometry = project_volume_bars(&prices, time, volume, PLOT_HEIGHT)
        .expect("projection")
        .expect("geometry");

    // First bar has no prior close; flat closes keep Up.
    assert_eq!(geometry.bars[0].direction, PriceDirection::Up);
    assert_eq!(geometry.bars[1].direction, PriceDirection::Down);
    assert_eq!(geometry.bars[2].direction, PriceDirection::Up);
    assert_eq!(geometry.bars[3].direction, PriceDirection::Up);
}

#[test]
fn ohlc_ticks_extend_sideways_from_stem() {
    let prices = vec![
        ohlcv(0.0, 20.0, 22.0, 19.0, 21.0, 100),
        ohlcv(100.0, 21.0, 23.0, 20.0, 22.0, 200),
    ];
    let (time, price, _) = scales(&prices);

    let geometry = project_ohlc_bars(&prices, time, price)
        .expect("projection")
        .expect("geometry");
    let glyph = geometry.glyphs[0];

    assert_relative_eq!(glyph.open_tick_start(), glyph.x - OHLC_TICK_WIDTH);
    assert_relative_eq!(glyph.close_tick_end(), glyph.x + OHLC_TICK_WIDTH);
    assert_relative_eq!(glyph.stem_top, price.price_to_pixel(22.0).expect("high"));
    assert_relative_eq!(glyph.stem_bottom, price.price_to_pixel(19.0).expect("low"));
    assert_eq!(glyph.direction, PriceDirection::Up);
}

#[test]
fn ohlc_equal_open_close_classifies_down() {
    let prices = vec![
        ohlcv(0.0, 20.0, 22.0, 19.0, 20.0, 100),
        ohlcv(100.0, 21.0, 23.0, 20.0, 22.0, 200),
    ];
    let (time, price, _) = scales(&prices);

    let geometry = project_ohlc_bars(&prices, time, price)
        .expect("projection")
        .expect("geometry");
    assert_eq!(geometry.glyphs[0].direction, PriceDirection::Down);
}

#[test]
fn candle_body_spans_open_to_close() {
    let prices = vec![
        ohlcv(0.0, 20.0, 25.0, 19.0, 24.0, 100),
        ohlcv(100.0, 24.0, 26.0, 21.0, 22.0, 200),
    ];
    let (time, price, _) = scales(&prices);

    let geometry = project_candlesticks(&prices, time, price)
        .expect("projection")
        .expect("geometry");

    let up = geometry.glyphs[0];
    assert_eq!(up.direction, PriceDirection::Up);
    assert_relative_eq!(up.body_top, price.price_to_pixel(24.0).expect("close y"));
    assert_relative_eq!(
        up.body_height,
        price.price_to_pixel(20.0).expect("open y") - price.price_to_pixel(24.0).expect("close y")
    );
    assert_relative_eq!(up.body_right - up.body_left, CANDLE_BODY_WIDTH);
    assert_relative_eq!(up.wick_top, price.price_to_pixel(25.0).expect("high y"));
    assert_relative_eq!(up.wick_bottom, price.price_to_pixel(19.0).expect("low y"));

    let down = geometry.glyphs[1];
    assert_eq!(down.direction, PriceDirection::Down);
    assert_relative_eq!(down.body_top, price.price_to_pixel(24.0).expect("open y"));
}

#[test]
fn doji_candle_has_flat_body() {
    let prices = vec![
        ohlcv(0.0, 20.0, 22.0, 19.0, 20.0, 100),
        ohlcv(100.0, 21.0, 23.0, 20.0, 22.0, 200),
    ];
    let (time, price, _) = scales(&prices);

    let geometry = project_candlesticks(&prices, time, price)
        .expect("projection")
        .expect("geometry");

    assert_relative_eq!(geometry.glyphs[0].body_height, 0.0);
    assert_eq!(geometry.glyphs[0].direction, PriceDirection::Down);
}

#[test]
fn bollinger_band_area_walks_upper_then_lower_reversed() {
    let prices = vec![
        ohlcv(0.0, 20.0, 21.0, 19.0, 20.0, 100),
        ohlcv(100.0, 20.0, 23.0, 19.0, 22.0, 200),
        ohlcv(200.0, 22.0, 25.0, 21.0, 24.0, 300),
    ];
    let (time, price, _) = scales(&prices);
    let bands = bollinger_bands(&prices, 1, 2.0);

    let geometry = project_bollinger_bands(&bands, time, price)
        .expect("projection")
        .expect("geometry");

    assert_eq!(geometry.band_area.len(), 6);
    assert_eq!(geometry.band_area[0], geometry.upper[0]);
    assert_eq!(geometry.band_area[2], geometry.upper[2]);
    assert_eq!(geometry.band_area[3], geometry.lower[2]);
    assert_eq!(geometry.band_area[5], geometry.lower[0]);
}

#[test]
fn bollinger_projection_needs_two_points() {
    let prices = vec![ohlcv(0.0, 20.0, 21.0, 19.0, 20.0, 100)];
    let (time, price, _) = scales(&prices);
    let bands = bollinger_bands(&prices, 19, 2.0);

    let geometry = project_bollinger_bands(&bands, time, price).expect("projection");
    assert!(geometry.is_none());
}
