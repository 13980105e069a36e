//! Assembles the retained layer geometry into backend-neutral draw commands.

use crate::error::ChartResult;
use crate::layers::candlestick::CANDLE_BODY_WIDTH;
use crate::layers::ohlc::OHLC_TICK_WIDTH;
use crate::layers::volume::VOLUME_BAR_WIDTH;
use crate::layers::PriceDirection;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, PolygonPrimitive, PolylinePrimitive, RectPrimitive,
    RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::ChartEngine;

// Fixed palette, normalized from the CSS colors of the reference styling.
const CLOSE_LINE_COLOR: Color = Color::rgb(70.0 / 255.0, 130.0 / 255.0, 180.0 / 255.0);
const MOVING_AVERAGE_COLOR: Color = Color::rgb(1.0, 137.0 / 255.0, 0.0);
const UP_COLOR: Color = Color::rgb(3.0 / 255.0, 166.0 / 255.0, 120.0 / 255.0);
const DOWN_COLOR: Color = Color::rgb(192.0 / 255.0, 57.0 / 255.0, 43.0 / 255.0);
const BAND_COLOR: Color = Color::rgb(169.0 / 255.0, 169.0 / 255.0, 169.0 / 255.0);
const BAND_FILL: Color = Color::rgba(169.0 / 255.0, 169.0 / 255.0, 169.0 / 255.0, 0.2);
const DIVIDEND_COLOR: Color = Color::rgb(0.0, 206.0 / 255.0, 209.0 / 255.0);
const CROSSHAIR_COLOR: Color = Color::rgb(103.0 / 255.0, 128.0 / 255.0, 159.0 / 255.0);
const AXIS_COLOR: Color = Color::rgb(0.3, 0.3, 0.3);
const TEXT_COLOR: Color = Color::rgb(0.0, 0.0, 0.0);

const AXIS_TICK_COUNT: usize = 10;
const AXIS_TICK_LENGTH: f64 = 6.0;
const STROKE_WIDTH: f64 = 1.5;
const CROSSHAIR_RADIUS: f64 = 4.5;
const LEGEND_FONT_PX: f64 = 12.0;
const LEGEND_LINE_HEIGHT: f64 = 20.0;
const LEGEND_BASELINE: f64 = 9.0;
const SECONDARY_LEGEND_X: f64 = 150.0;

impl<R: Renderer> ChartEngine<R> {
    /// Builds one complete frame from the current retained state.
    ///
    /// An empty display window yields a frame with no draw commands; the
    /// frame itself is still handed to the backend so it can clear.
    pub(super) fn build_frame(&self) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.plot);

        let Some(scales) = self.active_scales()? else {
            return Ok(frame);
        };

        self.push_axes(&mut frame, scales)?;
        self.push_volume(&mut frame);
        self.push_price_line(&mut frame);
        self.push_moving_average(&mut frame);
        self.push_ohlc(&mut frame);
        self.push_candlesticks(&mut frame);
        self.push_bollinger(&mut frame);
        self.push_dividends(&mut frame);
        self.push_crosshair(&mut frame);
        self.push_legends(&mut frame);
        self.push_tooltip(&mut frame);

        Ok(frame)
    }

    /// Bottom time axis and right price axis, with evenly spaced ticks over
    /// the active (possibly rescaled) domains.
    fn push_axes(&self, frame: &mut RenderFrame, scales: super::ChartScales) -> ChartResult<()> {
        let plot = self.plot;

        frame.lines.push(LinePrimitive::new(
            0.0, plot.height, plot.width, plot.height, 1.0, AXIS_COLOR,
        ));
        frame.lines.push(LinePrimitive::new(
            plot.width, 0.0, plot.width, plot.height, 1.0, AXIS_COLOR,
        ));

        let (time_start, time_end) = scales.time.domain();
        let (price_start, price_end) = scales.price.domain();

        for step in 0..=AXIS_TICK_COUNT {
            let fraction = step as f64 / AXIS_TICK_COUNT as f64;

            let time = time_start + (time_end - time_start) * fraction;
            let x = scales.time.time_to_pixel(time)?;
            frame.lines.push(LinePrimitive::new(
                x,
                plot.height,
                x,
                plot.height + AXIS_TICK_LENGTH,
                1.0,
                AXIS_COLOR,
            ));
            if let Some(date) = crate::core::primitives::unix_seconds_to_datetime(time) {
                frame.texts.push(TextPrimitive::new(
                    date.format("%b %d").to_string(),
                    x,
                    plot.height + AXIS_TICK_LENGTH + LEGEND_FONT_PX,
                    LEGEND_FONT_PX,
                    TEXT_COLOR,
                    TextHAlign::Center,
                ));
            }

            let price = price_start + (price_end - price_start) * fraction;
            let y = scales.price.price_to_pixel(price)?;
            frame.lines.push(LinePrimitive::new(
                plot.width,
                y,
                plot.width + AXIS_TICK_LENGTH,
                y,
                1.0,
                AXIS_COLOR,
            ));
            frame.texts.push(TextPrimitive::new(
                format!("{price:.2}"),
                plot.width + AXIS_TICK_LENGTH + 2.0,
                y + LEGEND_FONT_PX / 3.0,
                LEGEND_FONT_PX,
                TEXT_COLOR,
                TextHAlign::Left,
            ));
        }

        Ok(())
    }

    fn push_volume(&self, frame: &mut RenderFrame) {
        let Some(geometry) = self.slots.volume.geometry() else {
            return;
        };
        for bar in &geometry.bars {
            frame.rects.push(RectPrimitive::new(
                bar.x,
                bar.y_top,
                VOLUME_BAR_WIDTH,
                bar.y_bottom - bar.y_top,
                direction_color(bar.direction),
            ));
        }
    }

    fn push_price_line(&self, frame: &mut RenderFrame) {
        if let Some(geometry) = self.slots.price_line.geometry() {
            frame.polylines.push(PolylinePrimitive::new(
                geometry.path.clone(),
                STROKE_WIDTH,
                CLOSE_LINE_COLOR,
            ));
        }
    }

    fn push_moving_average(&self, frame: &mut RenderFrame) {
        if let Some(geometry) = self.slots.moving_average.geometry() {
            frame.polylines.push(
                PolylinePrimitive::new(geometry.path.clone(), STROKE_WIDTH, MOVING_AVERAGE_COLOR)
                    .smoothed(),
            );
        }
    }

    /// OHLC glyph: vertical stem plus open tick left and close tick right.
    fn push_ohlc(&self, frame: &mut RenderFrame) {
        let Some(geometry) = self.slots.ohlc.geometry() else {
            return;
        };
        for glyph in &geometry.glyphs {
            let color = direction_color(glyph.direction);
            frame.lines.push(LinePrimitive::new(
                glyph.x,
                glyph.stem_top,
                glyph.x,
                glyph.stem_bottom,
                STROKE_WIDTH,
                color,
            ));
            frame.lines.push(LinePrimitive::new(
                glyph.open_tick_start(),
                glyph.open_y,
                glyph.x,
                glyph.open_y,
                STROKE_WIDTH,
                color,
            ));
            frame.lines.push(LinePrimitive::new(
                glyph.x,
                glyph.close_y,
                glyph.close_tick_end(),
                glyph.close_y,
                STROKE_WIDTH,
                color,
            ));
        }
    }

    /// Candle glyph: full-range wick behind a fixed-width body.
    fn push_candlesticks(&self, frame: &mut RenderFrame) {
        let Some(geometry) = self.slots.candlesticks.geometry() else {
            return;
        };
        for glyph in &geometry.glyphs {
            let color = direction_color(glyph.direction);
            frame.lines.push(LinePrimitive::new(
                glyph.center_x,
                glyph.wick_top,
                glyph.center_x,
                glyph.wick_bottom,
                1.0,
                color,
            ));
            frame.rects.push(RectPrimitive::new(
                glyph.body_left,
                glyph.body_top,
                CANDLE_BODY_WIDTH,
                glyph.body_height,
                color,
            ));
        }
    }

    /// Band area polygon underneath, then the three band strokes. The upper
    /// band stays un-smoothed; middle and lower render with curve smoothing.
    fn push_bollinger(&self, frame: &mut RenderFrame) {
        let Some(geometry) = self.slots.bollinger.geometry() else {
            return;
        };
        if geometry.band_area.len() >= 3 {
            frame
                .polygons
                .push(PolygonPrimitive::new(geometry.band_area.clone(), BAND_FILL));
        }
        frame.polylines.push(PolylinePrimitive::new(
            geometry.upper.clone(),
            STROKE_WIDTH,
            BAND_COLOR,
        ));
        frame.polylines.push(
            PolylinePrimitive::new(geometry.middle.clone(), STROKE_WIDTH, BAND_COLOR).smoothed(),
        );
        frame.polylines.push(
            PolylinePrimitive::new(geometry.lower.clone(), STROKE_WIDTH, BAND_COLOR).smoothed(),
        );
    }

    /// Square markers with a centered "D" label each.
    fn push_dividends(&self, frame: &mut RenderFrame) {
        let Some(geometry) = self.slots.dividends.geometry() else {
            return;
        };
        let size = self.config.markers.marker_size_px;
        let fill = Color::rgba(
            DIVIDEND_COLOR.red,
            DIVIDEND_COLOR.green,
            DIVIDEND_COLOR.blue,
            self.config.markers.marker_opacity,
        );
        for marker in &geometry.markers {
            frame.rects.push(RectPrimitive::new(
                marker.x - size / 2.0,
                marker.y - size / 2.0,
                size,
                size,
                fill,
            ));
            frame.texts.push(TextPrimitive::new(
                "D",
                marker.x,
                marker.y + LEGEND_FONT_PX / 3.0,
                LEGEND_FONT_PX,
                TEXT_COLOR,
                TextHAlign::Center,
            ));
        }
    }

    /// Focus circle plus dashed guides to the right and bottom plot edges.
    fn push_crosshair(&self, frame: &mut RenderFrame) {
        let Some(geometry) = self.crosshair_geometry else {
            return;
        };
        if !self.interaction.crosshair().visible {
            return;
        }

        frame.circles.push(CirclePrimitive::new(
            geometry.x,
            geometry.y,
            CROSSHAIR_RADIUS,
            CROSSHAIR_COLOR,
        ));
        frame.lines.push(
            LinePrimitive::new(
                geometry.x,
                geometry.y,
                geometry.guide_x_end,
                geometry.y,
                1.0,
                CROSSHAIR_COLOR,
            )
            .dashed(),
        );
        frame.lines.push(
            LinePrimitive::new(
                geometry.x,
                geometry.y,
                geometry.x,
                geometry.guide_y_end,
                1.0,
                CROSSHAIR_COLOR,
            )
            .dashed(),
        );
    }

    /// Primary legend in the top-left corner, secondary indicator legend in
    /// its own column to the right.
    fn push_legends(&self, frame: &mut RenderFrame) {
        for (index, line) in self.primary_legend.iter().enumerate() {
            frame.texts.push(TextPrimitive::new(
                line.clone(),
                15.0,
                index as f64 * LEGEND_LINE_HEIGHT + LEGEND_BASELINE,
                LEGEND_FONT_PX,
                TEXT_COLOR,
                TextHAlign::Left,
            ));
        }
        for (index, line) in self.secondary_legend.iter().enumerate() {
            frame.texts.push(TextPrimitive::new(
                line.clone(),
                SECONDARY_LEGEND_X,
                index as f64 * LEGEND_LINE_HEIGHT + LEGEND_BASELINE,
                LEGEND_FONT_PX,
                TEXT_COLOR,
                TextHAlign::Left,
            ));
        }
    }

    fn push_tooltip(&self, frame: &mut RenderFrame) {
        let Some(tooltip) = &self.tooltip else {
            return;
        };
        frame.texts.push(TextPrimitive::new(
            tooltip.amount_line.clone(),
            tooltip.x,
            tooltip.y,
            LEGEND_FONT_PX,
            TEXT_COLOR,
            TextHAlign::Left,
        ));
        frame.texts.push(TextPrimitive::new(
            tooltip.date_line.clone(),
            tooltip.x,
            tooltip.y + LEGEND_LINE_HEIGHT * 0.75,
            LEGEND_FONT_PX,
            TEXT_COLOR,
            TextHAlign::Left,
        ));
    }
}

fn direction_color(direction: PriceDirection) -> Color {
    match direction {
        PriceDirection::Up => UP_COLOR,
        PriceDirection::Down => DOWN_COLOR,
    }
}
