//! Listing Explorer Main Application
//! Main window with filter panel and dashboard viewer.

use crate::charts::{BarChart, Histogram, StaticChartRenderer};
use crate::config::DashboardConfig;
use crate::dashboard::{Dashboard, SectionView};
use crate::data::{self, Dataset};
use crate::gui::{ControlPanel, ControlPanelAction, DashboardViewer};
use anyhow::{Context, Result};
use egui::SidePanel;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete(&'static Dataset),
    Error(String),
}

/// Main application window.
pub struct ExplorerApp {
    config: DashboardConfig,
    dataset: Option<&'static Dataset>,
    control_panel: ControlPanel,
    viewer: DashboardViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
    /// Offer the file dialog on the first frame when no file was given.
    prompt_for_file: bool,
}

impl ExplorerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: DashboardConfig,
        csv_path: Option<PathBuf>,
    ) -> Self {
        let mut app = Self {
            config,
            dataset: None,
            control_panel: ControlPanel::new(),
            viewer: DashboardViewer::new(),
            load_rx: None,
            is_loading: false,
            prompt_for_file: csv_path.is_none(),
        };
        if let Some(path) = csv_path {
            app.start_loading(path);
        }
        app
    }

    /// Ask for a listings file and load it.
    fn handle_open_csv(&mut self) {
        if self.is_loading || self.dataset.is_some() {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    /// Load the CSV in a background thread.
    fn start_loading(&mut self, path: PathBuf) {
        self.control_panel.source = Some(path.display().to_string());
        self.control_panel.set_status("Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

            match data::load_shared(&path) {
                Ok(dataset) => {
                    let _ = tx.send(LoadResult::Complete(dataset));
                }
                Err(e) => {
                    log::error!("Failed to load {}: {}", path.display(), e);
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };
        let mut should_keep_receiver = true;

        while let Ok(result) = rx.try_recv() {
            match result {
                LoadResult::Progress(status) => {
                    self.control_panel.set_status(&status);
                }
                LoadResult::Complete(dataset) => {
                    self.dataset = Some(dataset);
                    self.control_panel
                        .set_dataset(dataset, self.config.default_price_range);
                    self.control_panel.export_enabled = true;
                    self.control_panel.set_status(&load_status(dataset));
                    self.recompute();
                    self.is_loading = false;
                    should_keep_receiver = false;
                }
                LoadResult::Error(error) => {
                    self.control_panel.source = None;
                    self.control_panel.set_status(&format!("Error: {}", error));
                    self.is_loading = false;
                    should_keep_receiver = false;
                }
            }
        }

        if should_keep_receiver {
            self.load_rx = Some(rx);
        }
    }

    /// Rebuild every dashboard section for the current filters.
    fn recompute(&mut self) {
        let Some(dataset) = self.dataset else {
            return;
        };
        let criteria = self.control_panel.controls.criteria();
        self.viewer
            .set_dashboard(Dashboard::compute(dataset, &criteria, &self.config));
    }

    /// Write the current charts as PNG files into a chosen folder.
    fn handle_export_charts(&mut self) {
        let Some(dashboard) = &self.viewer.dashboard else {
            self.control_panel.set_status("No charts to export");
            return;
        };

        let Some(folder) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        match export_charts(dashboard, &folder, &self.config) {
            Ok(files) if files.is_empty() => {
                self.control_panel.set_status("No charts to export");
            }
            Ok(files) => {
                log::info!("Exported {} charts to {}", files.len(), folder.display());
                self.control_panel
                    .set_status(&format!("Exported {} charts", files.len()));
                if let Err(e) = open::that(&folder) {
                    log::warn!("Could not open {}: {}", folder.display(), e);
                }
            }
            Err(e) => {
                log::error!("Chart export failed: {:#}", e);
                self.control_panel.set_status(&format!("Export Error: {:#}", e));
            }
        }
    }
}

/// Status line shown once the dataset is in.
fn load_status(dataset: &Dataset) -> String {
    match dataset.skipped_rows() {
        0 => format!("Loaded {} listings", dataset.len()),
        skipped => format!(
            "Loaded {} listings ({} incomplete rows skipped)",
            dataset.len(),
            skipped
        ),
    }
}

/// A chart queued for PNG export.
#[derive(Debug)]
enum ExportChart<'d> {
    Bar(&'d BarChart),
    Histogram(&'d Histogram),
}

/// Output file name and chart for every section that is ready.
fn export_plan<'d>(dashboard: &'d Dashboard<'_>) -> Vec<(String, ExportChart<'d>)> {
    let mut plan = Vec::new();

    let bar_charts = [
        ("neighbourhood_prices.png", &dashboard.neighbourhoods),
        ("room_type_prices.png", &dashboard.room_types),
    ];
    for (file_name, section) in bar_charts {
        if let Some(chart) = section.as_ref().ok().and_then(SectionView::ready) {
            plan.push((file_name.to_string(), ExportChart::Bar(chart)));
        }
    }

    if let Some(listings) = dashboard.listings.as_ref().ok().and_then(SectionView::ready) {
        let histogram = &listings.histogram;
        let file_name = format!("{}_distribution.png", histogram.column.name());
        plan.push((file_name, ExportChart::Histogram(histogram)));
    }

    plan
}

/// Render every ready chart of `dashboard` into `folder`.
pub fn export_charts(
    dashboard: &Dashboard<'_>,
    folder: &Path,
    config: &DashboardConfig,
) -> Result<Vec<PathBuf>> {
    let size = (config.export.width, config.export.height);
    let mut files = Vec::new();

    for (file_name, chart) in export_plan(dashboard) {
        let path = folder.join(file_name);
        match chart {
            ExportChart::Bar(chart) => StaticChartRenderer::save_bar_chart(chart, &path, size),
            ExportChart::Histogram(histogram) => {
                StaticChartRenderer::save_histogram(histogram, &path, size)
            }
        }
        .with_context(|| format!("Failed to write {}", path.display()))?;
        files.push(path);
    }

    Ok(files)
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if std::mem::take(&mut self.prompt_for_file) {
            self.handle_open_csv();
        }

        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::OpenCsv => self.handle_open_csv(),
                        ControlPanelAction::FiltersChanged => self.recompute(),
                        ControlPanelAction::ExportCharts => self.handle_export_charts(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.viewer.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ListingColumn;
    use crate::data::{sample_dataset, FilterCriteria};

    fn file_names(dashboard: &Dashboard<'_>) -> Vec<String> {
        export_plan(dashboard).into_iter().map(|(name, _)| name).collect()
    }

    #[test]
    fn exports_every_ready_chart() {
        let ds = sample_dataset();
        let criteria = FilterCriteria::new().neighbourhoods(["Allston", "Back Bay"]);
        let dashboard = Dashboard::compute(&ds, &criteria, &DashboardConfig::default());

        let plan = export_plan(&dashboard);
        assert_eq!(plan.len(), 3);
        assert!(matches!(&plan[0].1, ExportChart::Bar(c) if c.bars.len() == 2));
        assert!(matches!(&plan[2].1, ExportChart::Histogram(_)));
        assert_eq!(
            file_names(&dashboard),
            vec![
                "neighbourhood_prices.png",
                "room_type_prices.png",
                "price_distribution.png"
            ]
        );
    }

    #[test]
    fn sections_without_data_are_not_exported() {
        let ds = sample_dataset();
        // No neighbourhood chosen and nothing matches the search
        let criteria = FilterCriteria::new().search("castle");
        let dashboard = Dashboard::compute(&ds, &criteria, &DashboardConfig::default());

        assert_eq!(file_names(&dashboard), vec!["room_type_prices.png"]);
    }

    #[test]
    fn histogram_file_follows_its_column() {
        let ds = sample_dataset();
        let config = DashboardConfig {
            histogram_column: ListingColumn::Availability,
            ..DashboardConfig::default()
        };
        let dashboard = Dashboard::compute(&ds, &FilterCriteria::default(), &config);

        assert_eq!(
            file_names(&dashboard).last().map(String::as_str),
            Some("availability_365_distribution.png")
        );
    }

    #[test]
    fn load_status_mentions_skipped_rows() {
        let ds = sample_dataset();
        assert_eq!(load_status(&ds), "Loaded 2 listings");

        let ds = sample_dataset().with_skipped_rows(3);
        assert_eq!(load_status(&ds), "Loaded 2 listings (3 incomplete rows skipped)");
    }
}
