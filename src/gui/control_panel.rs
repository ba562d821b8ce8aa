//! Control Panel Widget
//! Left side panel with the filter widgets.

use crate::data::{Dataset, FilterCriteria};
use egui::{Color32, ComboBox, RichText, ScrollArea};
use std::collections::BTreeSet;

/// Label of the "no restriction" entry in the room type selector.
pub const ALL_ROOM_TYPES: &str = "All";

/// Room type selector value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoomTypeChoice {
    #[default]
    All,
    Only(String),
}

impl RoomTypeChoice {
    pub fn label(&self) -> &str {
        match self {
            RoomTypeChoice::All => ALL_ROOM_TYPES,
            RoomTypeChoice::Only(room_type) => room_type,
        }
    }
}

/// Widget values for the filters.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterControls {
    pub neighbourhoods: BTreeSet<String>,
    pub room_type: RoomTypeChoice,
    pub price_range: (f64, f64),
    pub availability_range: (u16, u16),
    pub min_reviews: u32,
    pub search: String,
}

impl Default for FilterControls {
    fn default() -> Self {
        Self {
            neighbourhoods: BTreeSet::new(),
            room_type: RoomTypeChoice::All,
            price_range: (0.0, f64::MAX),
            availability_range: (0, 365),
            min_reviews: 0,
            search: String::new(),
        }
    }
}

impl FilterControls {
    /// Initial widget state: every neighbourhood selected and the default
    /// price window clamped to the data.
    pub fn for_dataset(dataset: &Dataset, default_price_range: (f64, f64)) -> Self {
        let (lo, hi) = dataset.price_bounds().unwrap_or(default_price_range);
        let min = default_price_range.0.clamp(lo, hi);
        let max = default_price_range.1.clamp(min, hi);

        Self {
            neighbourhoods: dataset.neighbourhoods().iter().cloned().collect(),
            price_range: (min, max),
            ..Self::default()
        }
    }

    /// Translate widget values into filter criteria. The search text is
    /// passed through as typed.
    pub fn criteria(&self) -> FilterCriteria {
        let (min_price, max_price) = self.price_range;
        let (min_avail, max_avail) = self.availability_range;
        let mut criteria = FilterCriteria::new()
            .price_range(min_price, max_price)
            .availability_range(min_avail, max_avail)
            .min_reviews(self.min_reviews)
            .neighbourhoods(self.neighbourhoods.iter().cloned());

        if let RoomTypeChoice::Only(room_type) = &self.room_type {
            criteria = criteria.room_type(room_type.clone());
        }
        if !self.search.is_empty() {
            criteria = criteria.search(self.search.clone());
        }
        criteria
    }
}

/// Left side control panel with the data source and filter controls.
pub struct ControlPanel {
    pub controls: FilterControls,
    pub neighbourhood_options: Vec<String>,
    pub room_type_options: Vec<String>,
    pub price_bounds: (f64, f64),
    pub max_reviews: u32,
    pub source: Option<String>,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            controls: FilterControls::default(),
            neighbourhood_options: Vec::new(),
            room_type_options: Vec::new(),
            price_bounds: (0.0, 0.0),
            max_reviews: 0,
            source: None,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the widgets from a freshly loaded dataset.
    pub fn set_dataset(&mut self, dataset: &Dataset, default_price_range: (f64, f64)) {
        self.controls = FilterControls::for_dataset(dataset, default_price_range);
        self.neighbourhood_options = dataset.neighbourhoods().to_vec();
        self.room_type_options = dataset.room_types().to_vec();
        self.price_bounds = dataset.price_bounds().unwrap_or((0.0, 0.0));
        self.max_reviews = dataset.max_reviews();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;
        let before = self.controls.clone();

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏠 Listing Explorer")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Short-term rentals")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| match &self.source {
                    Some(source) => {
                        ui.label(RichText::new(source).size(12.0));
                    }
                    None => {
                        ui.label(
                            RichText::new("No file loaded")
                                .size(12.0)
                                .color(Color32::GRAY),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("📂 Open").clicked() {
                                action = ControlPanelAction::OpenCsv;
                            }
                        });
                    }
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        if self.neighbourhood_options.is_empty() {
            self.show_status(ui);
            return action;
        }

        // ===== Filters Section =====
        ui.label(RichText::new("🔧 Filters").size(14.0).strong());
        ui.add_space(8.0);

        ui.label("Neighborhoods:");
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                    for name in &self.neighbourhood_options {
                        let mut selected = self.controls.neighbourhoods.contains(name);
                        if ui.checkbox(&mut selected, name).changed() {
                            if selected {
                                self.controls.neighbourhoods.insert(name.clone());
                            } else {
                                self.controls.neighbourhoods.remove(name);
                            }
                        }
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.controls.neighbourhoods = self.neighbourhood_options.iter().cloned().collect();
            }
            if ui.small_button("Clear All").clicked() {
                self.controls.neighbourhoods.clear();
            }
        });

        ui.add_space(10.0);

        let label_width = 110.0;
        let combo_width = 150.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Room Type:"));
            ComboBox::from_id_salt("room_type")
                .width(combo_width)
                .selected_text(self.controls.room_type.label())
                .show_ui(ui, |ui| {
                    ui.selectable_value(
                        &mut self.controls.room_type,
                        RoomTypeChoice::All,
                        ALL_ROOM_TYPES,
                    );
                    for room_type in &self.room_type_options {
                        ui.selectable_value(
                            &mut self.controls.room_type,
                            RoomTypeChoice::Only(room_type.clone()),
                            room_type,
                        );
                    }
                });
        });

        ui.add_space(10.0);

        let (price_lo, price_hi) = self.price_bounds;
        let (min_price, max_price) = &mut self.controls.price_range;
        ui.label("Price Range ($):");
        ui.add(egui::Slider::new(min_price, price_lo..=price_hi).text("min"));
        ui.add(egui::Slider::new(max_price, price_lo..=price_hi).text("max"));

        ui.add_space(5.0);

        let (min_avail, max_avail) = &mut self.controls.availability_range;
        ui.label("Availability (days/year):");
        ui.add(egui::Slider::new(min_avail, 0..=365).text("min"));
        ui.add(egui::Slider::new(max_avail, 0..=365).text("max"));

        ui.add_space(5.0);

        ui.label("Minimum Reviews:");
        ui.add(egui::Slider::new(
            &mut self.controls.min_reviews,
            0..=self.max_reviews,
        ));

        ui.add_space(5.0);

        ui.label("Search by Name/Description:");
        ui.text_edit_singleline(&mut self.controls.search);

        if self.controls != before {
            action = ControlPanelAction::FiltersChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("💾 Export Charts").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportCharts;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        self.show_status(ui);

        action
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Loaded") || self.status.starts_with("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    OpenCsv,
    FiltersChanged,
    ExportCharts,
}
