//! Static Chart Renderer
//! Renders chart descriptions to PNG files with plotters.
//!
//! Layout follows the dashboard: caption on top, axis captions on both
//! axes, bar values annotated above each bar.

use super::builder::{BarChart, ChartError, Histogram};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::path::Path;

const BAR_FILL: RGBColor = RGBColor(173, 216, 230);
const HISTOGRAM_FILL: RGBColor = RGBColor(255, 165, 0);
const FONT: &str = "sans-serif";

type DrawResult = Result<(), Box<dyn Error>>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a bar chart to `path` as PNG.
    pub fn save_bar_chart(
        chart: &BarChart,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), ChartError> {
        let buffer = Self::render_rgb(size, |root| Self::draw_bar_chart(root, chart))?;
        Self::write_png(&buffer, path, size)
    }

    /// Render a histogram to `path` as PNG.
    pub fn save_histogram(
        histogram: &Histogram,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), ChartError> {
        let buffer = Self::render_rgb(size, |root| Self::draw_histogram(root, histogram))?;
        Self::write_png(&buffer, path, size)
    }

    /// Draw into an in-memory RGB buffer.
    fn render_rgb<F>(size: (u32, u32), draw: F) -> Result<Vec<u8>, ChartError>
    where
        F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> DrawResult,
    {
        let (width, height) = size;
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| ChartError::Render(e.to_string()))?;
            draw(&root).map_err(|e| ChartError::Render(e.to_string()))?;
            root.present()
                .map_err(|e| ChartError::Render(e.to_string()))?;
        }
        Ok(buffer)
    }

    fn write_png(buffer: &[u8], path: &Path, size: (u32, u32)) -> Result<(), ChartError> {
        image::save_buffer(path, buffer, size.0, size.1, image::ColorType::Rgb8)
            .map_err(|e| ChartError::Image(e.to_string()))
    }

    fn draw_bar_chart(
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        chart: &BarChart,
    ) -> DrawResult {
        let n = chart.bars.len();
        let y_max = Self::padded_max(chart.max_value());

        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.labels.title, (FONT, 24))
            .margin(15)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d((0..n).into_segmented(), 0.0..y_max)?;

        let categories: Vec<&str> = chart.bars.iter().map(|b| b.category.as_str()).collect();
        ctx.configure_mesh()
            .disable_x_mesh()
            .x_desc(&chart.labels.x_label)
            .y_desc(&chart.labels.y_label)
            .x_labels(n)
            .x_label_formatter(&|seg: &SegmentValue<usize>| match seg {
                SegmentValue::CenterOf(i) => {
                    categories.get(*i).map(|c| c.to_string()).unwrap_or_default()
                }
                _ => String::new(),
            })
            .axis_desc_style((FONT, 16))
            .draw()?;

        ctx.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
            let mut rect = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), bar.value),
                ],
                BAR_FILL.filled(),
            );
            rect.set_margin(0, 0, 8, 8);
            rect
        }))?;

        let annotation_style = TextStyle::from((FONT, 14).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        ctx.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
            Text::new(
                bar.annotation(),
                (SegmentValue::CenterOf(i), bar.value),
                annotation_style.clone(),
            )
        }))?;

        Ok(())
    }

    fn draw_histogram(
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        histogram: &Histogram,
    ) -> DrawResult {
        let (Some(first), Some(last)) = (histogram.bins.first(), histogram.bins.last()) else {
            return Ok(());
        };
        let y_max = Self::padded_max(histogram.max_count() as f64);

        let mut ctx = ChartBuilder::on(root)
            .caption(&histogram.labels.title, (FONT, 24))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(first.lower..last.upper, 0.0..y_max)?;

        ctx.configure_mesh()
            .x_desc(&histogram.labels.x_label)
            .y_desc(&histogram.labels.y_label)
            .axis_desc_style((FONT, 16))
            .draw()?;

        ctx.draw_series(histogram.bins.iter().map(|bin| {
            Rectangle::new(
                [(bin.lower, 0.0), (bin.upper, bin.count as f64)],
                HISTOGRAM_FILL.filled(),
            )
        }))?;
        ctx.draw_series(histogram.bins.iter().map(|bin| {
            Rectangle::new(
                [(bin.lower, 0.0), (bin.upper, bin.count as f64)],
                BLACK.stroke_width(1),
            )
        }))?;

        Ok(())
    }

    /// Leave room above the tallest bar for its annotation.
    fn padded_max(max: f64) -> f64 {
        if max > 0.0 {
            max * 1.15
        } else {
            1.0
        }
    }
}
