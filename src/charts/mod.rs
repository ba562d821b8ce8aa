//! Charts module - chart builders and rendering

mod builder;
mod map;
mod plotter;
mod renderer;

pub use builder::{BarChart, ChartError, ChartLabels, Histogram, ListingColumn};
pub use map::MapView;
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
