//! Chart Builder Module
//! Turns aggregated or filtered rows into chart descriptions.
//!
//! Builders only describe a chart. Drawing it is left to
//! [`ChartPlotter`](super::ChartPlotter) (interactive) and
//! [`StaticChartRenderer`](super::StaticChartRenderer) (PNG export).

use crate::data::Listing;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ChartError {
    #[error("No data to chart")]
    Empty,
    #[error("Non-finite value for '{0}'")]
    NonFinite(String),
    #[error("Histogram needs at least one bin")]
    ZeroBins,
    #[error("Failed to render chart: {0}")]
    Render(String),
    #[error("Failed to write image: {0}")]
    Image(String),
}

/// Title and axis captions shared by every chart kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl ChartLabels {
    pub fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
        }
    }
}

/// One category bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub category: String,
    pub value: f64,
}

impl Bar {
    /// Value label drawn centred above the bar.
    pub fn annotation(&self) -> String {
        format!("{:.2}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub labels: ChartLabels,
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// Build a bar chart with one bar per (category, value) pair, in input order.
    pub fn build<I, S>(rows: I, labels: ChartLabels) -> Result<Self, ChartError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let bars = rows
            .into_iter()
            .map(|(category, value)| {
                let category = category.into();
                if value.is_finite() {
                    Ok(Bar { category, value })
                } else {
                    Err(ChartError::NonFinite(category))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if bars.is_empty() {
            return Err(ChartError::Empty);
        }

        Ok(Self { labels, bars })
    }

    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|b| b.value).fold(0.0, f64::max)
    }
}

/// Numeric listing columns a histogram can be drawn over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingColumn {
    #[default]
    Price,
    #[serde(rename = "availability_365")]
    Availability,
    #[serde(rename = "number_of_reviews")]
    Reviews,
    Latitude,
    Longitude,
}

impl ListingColumn {
    pub fn value(self, listing: &Listing) -> f64 {
        match self {
            ListingColumn::Price => listing.price,
            ListingColumn::Availability => f64::from(listing.availability_365),
            ListingColumn::Reviews => f64::from(listing.number_of_reviews),
            ListingColumn::Latitude => listing.latitude,
            ListingColumn::Longitude => listing.longitude,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ListingColumn::Price => "price",
            ListingColumn::Availability => "availability_365",
            ListingColumn::Reviews => "number_of_reviews",
            ListingColumn::Latitude => "latitude",
            ListingColumn::Longitude => "longitude",
        }
    }

    /// Histogram title and axis captions for this column.
    pub fn histogram_labels(self) -> ChartLabels {
        let (title, x_label) = match self {
            ListingColumn::Price => ("Price Distribution", "Price ($)"),
            ListingColumn::Availability => ("Availability Distribution", "Days Available"),
            ListingColumn::Reviews => ("Review Count Distribution", "Reviews"),
            ListingColumn::Latitude => ("Latitude Distribution", "Latitude"),
            ListingColumn::Longitude => ("Longitude Distribution", "Longitude"),
        };
        ChartLabels::new(title, x_label, "Count")
    }
}

/// Half-open bin `[lower, upper)`; the last bin also includes `upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub labels: ChartLabels,
    pub column: ListingColumn,
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Build an equal-width histogram of `column` over `rows`.
    pub fn build(
        rows: &[&Listing],
        column: ListingColumn,
        bin_count: usize,
        labels: ChartLabels,
    ) -> Result<Self, ChartError> {
        if bin_count == 0 {
            return Err(ChartError::ZeroBins);
        }

        let values: Vec<f64> = rows.iter().map(|l| column.value(l)).collect();
        if values.is_empty() {
            return Err(ChartError::Empty);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ChartError::NonFinite(column.name().to_string()));
        }

        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bin_count as f64;
        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| HistogramBin {
                lower: lo + width * i as f64,
                upper: if i + 1 == bin_count {
                    hi
                } else {
                    lo + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bin_count - 1);
            bins[idx].count += 1;
        }

        Ok(Self {
            labels,
            column,
            bins,
        })
    }

    /// Rows counted across all bins.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}
