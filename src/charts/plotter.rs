//! Chart Plotter Module
//! Draws chart descriptions interactively using egui_plot.

use super::builder::{BarChart, Histogram};
use super::map::MapView;
use egui::{Align2, Color32, RichText};
use egui_plot::{Bar, BarChart as PlotBarChart, Legend, Plot, PlotPoint, PlotPoints, Points, Text};

/// Bar fill (matplotlib "lightblue")
pub const BAR_COLOR: Color32 = Color32::from_rgb(173, 216, 230);
/// Histogram fill (matplotlib "orange")
pub const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(255, 165, 0);
pub const EDGE_COLOR: Color32 = Color32::BLACK;

const CHART_HEIGHT: f32 = 320.0;
const MAP_HEIGHT: f32 = 480.0;
const BAR_WIDTH: f64 = 0.6;

/// Draws the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Bar chart with the value written above every bar.
    pub fn draw_bar_chart(ui: &mut egui::Ui, chart: &BarChart) {
        ui.label(RichText::new(&chart.labels.title).size(15.0).strong());

        let categories: Vec<String> = chart.bars.iter().map(|b| b.category.clone()).collect();
        let headroom = chart.max_value() * 0.12;
        let text_color = ui.visuals().text_color();

        Plot::new(format!("bar_{}", chart.labels.title))
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(chart.labels.x_label.clone())
            .y_axis_label(chart.labels.y_label.clone())
            .include_y(0.0)
            .include_y(chart.max_value() + headroom)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                    return String::new();
                }
                categories.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = chart
                    .bars
                    .iter()
                    .enumerate()
                    .map(|(i, bar)| {
                        Bar::new(i as f64, bar.value)
                            .width(BAR_WIDTH)
                            .name(&bar.category)
                            .fill(BAR_COLOR)
                            .stroke(egui::Stroke::new(1.0, BAR_COLOR.gamma_multiply(0.7)))
                    })
                    .collect();
                plot_ui.bar_chart(PlotBarChart::new(bars).color(BAR_COLOR));

                for (i, bar) in chart.bars.iter().enumerate() {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(i as f64, bar.value + headroom * 0.15),
                            RichText::new(bar.annotation()).size(11.0),
                        )
                        .anchor(Align2::CENTER_BOTTOM)
                        .color(text_color),
                    );
                }
            });
    }

    /// Histogram drawn as touching bars, one per bin.
    pub fn draw_histogram(ui: &mut egui::Ui, histogram: &Histogram) {
        ui.label(RichText::new(&histogram.labels.title).size(15.0).strong());

        Plot::new(format!("hist_{}", histogram.labels.title))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(histogram.labels.x_label.clone())
            .y_axis_label(histogram.labels.y_label.clone())
            .include_y(0.0)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = histogram
                    .bins
                    .iter()
                    .map(|bin| {
                        Bar::new((bin.lower + bin.upper) / 2.0, bin.count as f64)
                            .width(bin.upper - bin.lower)
                            .name(format!("{:.2} – {:.2}", bin.lower, bin.upper))
                            .fill(HISTOGRAM_COLOR)
                            .stroke(egui::Stroke::new(1.0, EDGE_COLOR))
                    })
                    .collect();
                plot_ui.bar_chart(
                    PlotBarChart::new(bars)
                        .color(HISTOGRAM_COLOR)
                        .name(format!("{} listings", histogram.total())),
                );
            });
    }

    /// Scatter map of listings in longitude/latitude space.
    pub fn draw_map(ui: &mut egui::Ui, view: &MapView) {
        let [r, g, b, a] = view.color;
        let color = Color32::from_rgba_unmultiplied(r, g, b, a);
        let (min, max) = view.bounds();
        let lookup = view.clone();

        Plot::new("listing_map")
            .height(MAP_HEIGHT)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .include_x(min[0])
            .include_x(max[0])
            .include_y(min[1])
            .include_y(max[1])
            .legend(Legend::default())
            .label_formatter(move |_name, value| {
                match lookup.point_at(value.x, value.y) {
                    Some(point) => point.tooltip(),
                    None => format!("{:.4}, {:.4}", value.y, value.x),
                }
            })
            .show(ui, |plot_ui| {
                let points: PlotPoints = view
                    .points
                    .iter()
                    .map(|p| [p.longitude, p.latitude])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .radius(Self::pixel_radius(view))
                        .color(color)
                        .name(format!("{} listings", view.points.len())),
                );
            });
    }

    /// Screen radius for the configured ground radius at the view's zoom.
    fn pixel_radius(view: &MapView) -> f32 {
        // Web mercator ground resolution at zoom z: 156543 m/px * cos(lat) / 2^z
        let metres_per_px = 156_543.03 * view.center_latitude.to_radians().cos()
            / 2f64.powi(i32::from(view.zoom));
        ((view.radius_m / metres_per_px) as f32).clamp(2.0, 12.0)
    }
}
