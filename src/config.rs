//! Configuration for the listing explorer
//!
//! Settings are read from a JSON file. Every field has a default so a
//! partial (or missing) file is fine.

use crate::charts::ListingColumn;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable pointing at an alternative settings file.
pub const CONFIG_ENV: &str = "LISTING_EXPLORER_CONFIG";
/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "listing_explorer.json";

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Listings CSV opened at start-up when none is given on the command line
    #[serde(default)]
    pub data_path: Option<PathBuf>,
    /// Initial price slider position
    #[serde(default = "default_price_range")]
    pub default_price_range: (f64, f64),
    /// Bins in the price distribution histogram
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    /// Column binned by the listings histogram
    #[serde(default)]
    pub histogram_column: ListingColumn,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Map layer style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_point_radius")]
    pub point_radius_m: f64,
    /// RGBA
    #[serde(default = "default_point_color")]
    pub point_color: [u8; 4],
}

/// Static PNG export size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_width")]
    pub width: u32,
    #[serde(default = "default_export_height")]
    pub height: u32,
}

fn default_price_range() -> (f64, f64) {
    (50.0, 300.0)
}

fn default_histogram_bins() -> usize {
    20
}

fn default_zoom() -> u8 {
    11
}

fn default_point_radius() -> f64 {
    200.0
}

fn default_point_color() -> [u8; 4] {
    [200, 30, 0, 160]
}

fn default_export_width() -> u32 {
    1024
}

fn default_export_height() -> u32 {
    768
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            default_price_range: default_price_range(),
            histogram_bins: default_histogram_bins(),
            histogram_column: ListingColumn::default(),
            map: MapConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            point_radius_m: default_point_radius(),
            point_color: default_point_color(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: default_export_width(),
            height: default_export_height(),
        }
    }
}

impl DashboardConfig {
    /// Load from `$LISTING_EXPLORER_CONFIG` or `listing_explorer.json`,
    /// falling back to defaults when neither exists.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if !path.exists() {
            log::warn!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "histogram_bins": 30, "map": { "zoom": 12 } }"#).unwrap();

        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.map.zoom, 12);
        assert_eq!(config.map.point_color, [200, 30, 0, 160]);
        assert_eq!(config.default_price_range, (50.0, 300.0));
        assert_eq!(config.export, ExportConfig::default());
        assert_eq!(config.data_path, None);
        assert_eq!(config.histogram_column, ListingColumn::Price);
    }

    #[test]
    fn histogram_column_by_csv_name() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "histogram_column": "availability_365" }"#).unwrap();
        assert_eq!(config.histogram_column, ListingColumn::Availability);

        let config: DashboardConfig =
            serde_json::from_str(r#"{ "histogram_column": "number_of_reviews" }"#).unwrap();
        assert_eq!(config.histogram_column, ListingColumn::Reviews);

        let unknown = serde_json::from_str::<DashboardConfig>(r#"{ "histogram_column": "name" }"#);
        assert!(unknown.is_err());
    }

    #[test]
    fn empty_object_equals_default() {
        let config: DashboardConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn reads_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "data_path": "listings.csv", "default_price_range": [0, 500] }}"#)
            .unwrap();

        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data_path, Some(PathBuf::from("listings.csv")));
        assert_eq!(config.default_price_range, (0.0, 500.0));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = DashboardConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid settings file"));
    }
}
