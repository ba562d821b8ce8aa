//! Dashboard Viewer Widget
//! Central panel with the quick stats row and one tab per dashboard section.

use crate::charts::ChartPlotter;
use crate::dashboard::{Dashboard, ListingsSection, QuickStats, SectionResult, SectionView};
use crate::data::Listing;
use crate::stats::PriceSummary;
use egui::{Color32, RichText, ScrollArea};

const ROW_HEIGHT: f32 = 20.0;
const TABLE_HEIGHT: f32 = 260.0;
const COLUMN_WIDTHS: [f32; 6] = [260.0, 160.0, 80.0, 130.0, 90.0, 80.0];
const COLUMN_NAMES: [&str; 6] = [
    "Name",
    "Neighborhood",
    "Price",
    "Room Type",
    "Availability",
    "Reviews",
];

const WARNING_COLOR: Color32 = Color32::from_rgb(255, 193, 7);
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Neighbourhoods,
    RoomTypes,
    Listings,
    Map,
}

impl DashboardTab {
    const ALL: [DashboardTab; 4] = [
        DashboardTab::Neighbourhoods,
        DashboardTab::RoomTypes,
        DashboardTab::Listings,
        DashboardTab::Map,
    ];

    fn title(self) -> &'static str {
        match self {
            DashboardTab::Neighbourhoods => "Neighborhood Prices",
            DashboardTab::RoomTypes => "Room Type Prices",
            DashboardTab::Listings => "Price Filter",
            DashboardTab::Map => "Map View",
        }
    }
}

/// Displays the most recently computed dashboard.
#[derive(Default)]
pub struct DashboardViewer {
    pub dashboard: Option<Dashboard<'static>>,
    pub tab: DashboardTab,
}

impl DashboardViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_dashboard(&mut self, dashboard: Dashboard<'static>) {
        self.dashboard = Some(dashboard);
    }

    /// Draw the viewer
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(dashboard) = &self.dashboard else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ui.heading("Listing Price Dashboard");
        ui.add_space(8.0);
        show_section(ui, &dashboard.quick_stats, draw_quick_stats);
        ui.add_space(10.0);
        ui.separator();

        ui.horizontal(|ui| {
            for tab in DashboardTab::ALL {
                ui.selectable_value(&mut self.tab, tab, tab.title());
            }
        });
        ui.separator();

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match self.tab {
                DashboardTab::Neighbourhoods => {
                    show_section(ui, &dashboard.neighbourhoods, ChartPlotter::draw_bar_chart)
                }
                DashboardTab::RoomTypes => {
                    show_section(ui, &dashboard.room_types, ChartPlotter::draw_bar_chart)
                }
                DashboardTab::Listings => show_section(ui, &dashboard.listings, draw_listings),
                DashboardTab::Map => show_section(ui, &dashboard.map, |ui, view| {
                    ui.label(RichText::new("Listing Locations").size(15.0).strong());
                    ChartPlotter::draw_map(ui, view);
                }),
            });
    }
}

/// Render a section value, its no-data notice, or its error in place.
fn show_section<T>(
    ui: &mut egui::Ui,
    section: &SectionResult<T>,
    draw: impl FnOnce(&mut egui::Ui, &T),
) {
    match section {
        Ok(SectionView::Ready(value)) => draw(ui, value),
        Ok(SectionView::NoData(message)) => {
            ui.label(RichText::new(format!("⚠ {}", message)).color(WARNING_COLOR));
        }
        Err(err) => {
            ui.label(RichText::new(err.to_string()).color(ERROR_COLOR));
        }
    }
}

fn draw_quick_stats(ui: &mut egui::Ui, stats: &QuickStats) {
    ui.columns(4, |columns| {
        metric(&mut columns[0], "Total Listings", stats.total_listings.to_string());
        metric(&mut columns[1], "Average Price", format!("${:.2}", stats.average_price));
        metric(&mut columns[2], "Most Expensive", stats.most_expensive.clone());
        metric(&mut columns[3], "Least Expensive", stats.least_expensive.clone());
    });
}

fn metric(ui: &mut egui::Ui, label: &str, value: String) {
    egui::Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(6.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
            ui.label(RichText::new(value).size(20.0).strong());
        });
}

fn draw_listings(ui: &mut egui::Ui, section: &ListingsSection<'static>) {
    ui.label(
        RichText::new(format!("Found {} listings", section.result.count))
            .size(15.0)
            .strong(),
    );
    ui.add_space(5.0);
    draw_table(ui, &section.result.listings);

    ui.add_space(10.0);
    draw_summary(ui, &section.summary);

    ui.add_space(10.0);
    ChartPlotter::draw_histogram(ui, &section.histogram);
}

fn draw_table(ui: &mut egui::Ui, rows: &[&Listing]) {
    ui.horizontal(|ui| {
        for (name, width) in COLUMN_NAMES.iter().zip(COLUMN_WIDTHS) {
            cell(ui, width, RichText::new(*name).strong());
        }
    });
    ui.separator();

    ScrollArea::both()
        .id_salt("listing_table")
        .max_height(TABLE_HEIGHT)
        .show_rows(ui, ROW_HEIGHT, rows.len(), |ui, range| {
            for listing in &rows[range] {
                let values = [
                    listing.name.clone().unwrap_or_default(),
                    listing.neighbourhood.clone(),
                    format!("${:.2}", listing.price),
                    listing.room_type.clone(),
                    listing.availability_365.to_string(),
                    listing.number_of_reviews.to_string(),
                ];
                ui.horizontal(|ui| {
                    for (value, width) in values.into_iter().zip(COLUMN_WIDTHS) {
                        cell(ui, width, RichText::new(value));
                    }
                });
            }
        });
}

fn cell(ui: &mut egui::Ui, width: f32, text: RichText) {
    ui.add_sized([width, ROW_HEIGHT], egui::Label::new(text).truncate());
}

fn draw_summary(ui: &mut egui::Ui, summary: &PriceSummary) {
    ui.label(RichText::new("Price Statistics").size(15.0).strong());
    egui::Grid::new("price_summary")
        .num_columns(2)
        .spacing([20.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            let std = summary
                .std
                .map(|s| format!("${:.2}", s))
                .unwrap_or_else(|| "n/a".to_string());
            let rows = [
                ("Count", summary.count.to_string()),
                ("Mean", format!("${:.2}", summary.mean)),
                ("Median", format!("${:.2}", summary.median)),
                ("Std Dev", std),
                ("25th Percentile", format!("${:.2}", summary.p25)),
                ("75th Percentile", format!("${:.2}", summary.p75)),
            ];
            for (label, value) in rows {
                ui.label(label);
                ui.label(value);
                ui.end_row();
            }
        });
}
