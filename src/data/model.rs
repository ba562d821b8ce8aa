//! Listing Model Module
//! Core row type, the immutable dataset and the filter value objects.

use std::collections::BTreeSet;

/// One rental unit record.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub name: Option<String>,
    pub neighbourhood: String,
    pub room_type: String,
    pub price: f64,
    pub availability_365: u16,
    pub number_of_reviews: u32,
    pub latitude: f64,
    pub longitude: f64,
}

/// Ordered, immutable collection of listings with a few cached facts used
/// to seed the filter widgets.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    listings: Vec<Listing>,
    neighbourhoods: Vec<String>,
    room_types: Vec<String>,
    skipped_rows: usize,
}

impl Dataset {
    pub fn new(listings: Vec<Listing>) -> Self {
        let neighbourhoods: BTreeSet<String> = listings
            .iter()
            .map(|l| l.neighbourhood.clone())
            .collect();
        let room_types: BTreeSet<String> =
            listings.iter().map(|l| l.room_type.clone()).collect();

        Self {
            listings,
            neighbourhoods: neighbourhoods.into_iter().collect(),
            room_types: room_types.into_iter().collect(),
            skipped_rows: 0,
        }
    }

    /// Record how many source rows were dropped while loading.
    pub fn with_skipped_rows(mut self, skipped_rows: usize) -> Self {
        self.skipped_rows = skipped_rows;
        self
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Source rows dropped for missing or invalid values.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Distinct neighbourhoods, sorted.
    pub fn neighbourhoods(&self) -> &[String] {
        &self.neighbourhoods
    }

    /// Distinct room types, sorted.
    pub fn room_types(&self) -> &[String] {
        &self.room_types
    }

    /// Smallest and largest price, if any rows exist.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        self.listings.iter().fold(None, |acc, l| match acc {
            None => Some((l.price, l.price)),
            Some((lo, hi)) => Some((lo.min(l.price), hi.max(l.price))),
        })
    }

    pub fn max_reviews(&self) -> u32 {
        self.listings
            .iter()
            .map(|l| l.number_of_reviews)
            .max()
            .unwrap_or(0)
    }
}

/// User-chosen constraints. `None` (or an empty set) means "no restriction".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub neighbourhoods: BTreeSet<String>,
    pub room_type: Option<String>,
    pub min_availability: Option<u16>,
    pub max_availability: Option<u16>,
    pub min_reviews: Option<u32>,
    pub search_text: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn price_range(mut self, min: f64, max: f64) -> Self {
        self.min_price = Some(min);
        self.max_price = Some(max);
        self
    }

    pub fn availability_range(mut self, min: u16, max: u16) -> Self {
        self.min_availability = Some(min);
        self.max_availability = Some(max);
        self
    }

    pub fn min_reviews(mut self, min: u32) -> Self {
        self.min_reviews = Some(min);
        self
    }

    pub fn neighbourhoods<I, S>(mut self, neighbourhoods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.neighbourhoods = neighbourhoods.into_iter().map(Into::into).collect();
        self
    }

    pub fn room_type(mut self, room_type: impl Into<String>) -> Self {
        self.room_type = Some(room_type.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }
}

/// Filtered subset of a dataset plus its summary statistics.
#[derive(Debug, Clone)]
pub struct FilterResult<'a> {
    pub listings: Vec<&'a Listing>,
    pub avg_price: f64,
    pub count: usize,
}

impl<'a> FilterResult<'a> {
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.listings.iter().map(|l| l.price).collect()
    }
}
