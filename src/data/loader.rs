//! CSV Data Loader Module
//! Loads the listings file with Polars and converts it into typed rows.

use super::model::{Dataset, Listing};
use polars::prelude::*;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Columns every listings file must provide.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "name",
    "neighbourhood",
    "room_type",
    "price",
    "availability_365",
    "number_of_reviews",
    "latitude",
    "longitude",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("No usable rows in {0}")]
    NoData(String),
}

static DATASET: OnceLock<Dataset> = OnceLock::new();

/// Load the process-wide dataset on first call; later calls return the
/// cached dataset and ignore `file_path`.
pub fn load_shared(file_path: &Path) -> Result<&'static Dataset, LoaderError> {
    if let Some(dataset) = DATASET.get() {
        return Ok(dataset);
    }

    let dataset = DataLoader::new().load_csv(file_path)?;
    Ok(DATASET.get_or_init(|| dataset))
}

/// Handles CSV file loading with Polars for high performance.
pub struct DataLoader {
    skipped_rows: usize,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { skipped_rows: 0 }
    }

    /// Load a listings CSV file using Polars.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<Dataset, LoaderError> {
        let path_str = file_path.to_string_lossy().to_string();

        let df = LazyCsvReader::new(&path_str)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let dataset = self.dataset_from_frame(&df)?;
        if dataset.is_empty() {
            return Err(LoaderError::NoData(path_str));
        }

        if self.skipped_rows > 0 {
            log::warn!(
                "Skipped {} rows with missing values in {}",
                self.skipped_rows,
                path_str
            );
        }
        log::info!(
            "Loaded {} listings ({} neighbourhoods, {} room types) from {}",
            dataset.len(),
            dataset.neighbourhoods().len(),
            dataset.room_types().len(),
            path_str
        );

        Ok(dataset)
    }

    /// Convert a loaded frame into listings, dropping incomplete rows.
    pub fn dataset_from_frame(&mut self, df: &DataFrame) -> Result<Dataset, LoaderError> {
        if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| df.column(c).is_err()) {
            return Err(LoaderError::MissingColumn(missing.to_string()));
        }

        let names = Self::text_column(df, "name")?;
        let neighbourhoods = Self::text_column(df, "neighbourhood")?;
        let room_types = Self::text_column(df, "room_type")?;
        let prices = Self::price_column(df, "price")?;
        let availability = Self::int_column(df, "availability_365")?;
        let reviews = Self::int_column(df, "number_of_reviews")?;
        let latitudes = Self::float_column(df, "latitude")?;
        let longitudes = Self::float_column(df, "longitude")?;

        let mut listings = Vec::with_capacity(df.height());
        self.skipped_rows = 0;

        for i in 0..df.height() {
            let (
                Some(neighbourhood),
                Some(room_type),
                Some(price),
                Some(avail),
                Some(rev),
                Some(lat),
                Some(lon),
            ) = (
                &neighbourhoods[i],
                &room_types[i],
                prices[i],
                availability[i],
                reviews[i],
                latitudes[i],
                longitudes[i],
            )
            else {
                self.skipped_rows += 1;
                continue;
            };

            if !(price.is_finite() && price >= 0.0) || avail < 0 || rev < 0 {
                self.skipped_rows += 1;
                continue;
            }

            listings.push(Listing {
                name: names[i].clone(),
                neighbourhood: neighbourhood.clone(),
                room_type: room_type.clone(),
                price,
                availability_365: avail.min(365) as u16,
                number_of_reviews: rev.min(i64::from(u32::MAX)) as u32,
                latitude: lat,
                longitude: lon,
            });
        }

        Ok(Dataset::new(listings).with_skipped_rows(self.skipped_rows))
    }

    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, LoaderError> {
        df.column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))
    }

    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
        let utf8 = Self::column(df, name)?.cast(&DataType::String)?;
        let values = utf8
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| {
                v.map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .collect();
        Ok(values)
    }

    fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
        let value_f64 = Self::column(df, name)?.cast(&DataType::Float64)?;
        let values = value_f64
            .as_materialized_series()
            .f64()?
            .into_iter()
            .map(|v| v.filter(|v| !v.is_nan()))
            .collect();
        Ok(values)
    }

    fn int_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>, LoaderError> {
        let value_i64 = Self::column(df, name)?.cast(&DataType::Int64)?;
        let values = value_i64
            .as_materialized_series()
            .i64()?
            .into_iter()
            .collect();
        Ok(values)
    }

    /// Prices are numeric in the summary export but currency text
    /// ("$1,250.00") in the detailed one.
    fn price_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
        let column = Self::column(df, name)?;
        if column.dtype() != &DataType::String {
            return Self::float_column(df, name);
        }

        let values = column
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.and_then(parse_currency))
            .collect();
        Ok(values)
    }
}

/// Parse "$1,250.00" style text into a number.
pub fn parse_currency(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
