//! Filter Engine Module
//! Narrows the dataset to the listings matching a set of constraints.

use super::model::{Dataset, FilterCriteria, FilterResult, Listing};
use std::collections::BTreeSet;

/// Criteria prepared for a single pass over the dataset.
///
/// Empty strings and empty sets are normalised to "no restriction" and the
/// search text is lowercased once instead of per row.
struct ListingPredicate<'c> {
    criteria: &'c FilterCriteria,
    room_type: Option<&'c str>,
    needle: Option<String>,
}

impl<'c> ListingPredicate<'c> {
    fn new(criteria: &'c FilterCriteria) -> Self {
        Self {
            criteria,
            room_type: criteria.room_type.as_deref().filter(|rt| !rt.is_empty()),
            needle: criteria
                .search_text
                .as_deref()
                .filter(|text| !text.is_empty())
                .map(str::to_lowercase),
        }
    }

    fn test(&self, listing: &Listing) -> bool {
        let c = self.criteria;

        if c.min_price.is_some_and(|min| listing.price < min)
            || c.max_price.is_some_and(|max| listing.price > max)
        {
            return false;
        }

        if c.min_availability.is_some_and(|min| listing.availability_365 < min)
            || c.max_availability.is_some_and(|max| listing.availability_365 > max)
        {
            return false;
        }

        if c.min_reviews.is_some_and(|min| listing.number_of_reviews < min) {
            return false;
        }

        if !c.neighbourhoods.is_empty() && !c.neighbourhoods.contains(&listing.neighbourhood) {
            return false;
        }

        if self.room_type.is_some_and(|rt| listing.room_type != rt) {
            return false;
        }

        match &self.needle {
            // Unnamed listings never match a search
            Some(needle) => listing
                .name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(needle.as_str())),
            None => true,
        }
    }
}

/// Apply every active constraint (AND-combined) and summarise the result.
///
/// Never fails: criteria matching nothing yield an empty result with an
/// average price of 0.
pub fn apply_filters<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilterResult<'a> {
    let predicate = ListingPredicate::new(criteria);
    let listings: Vec<&Listing> = dataset
        .listings()
        .iter()
        .filter(|listing| predicate.test(listing))
        .collect();

    summarize(listings)
}

/// Rows restricted by neighbourhood membership only.
pub fn filter_by_neighbourhoods<'a>(
    dataset: &'a Dataset,
    neighbourhoods: &BTreeSet<String>,
) -> Vec<&'a Listing> {
    dataset
        .listings()
        .iter()
        .filter(|l| neighbourhoods.contains(&l.neighbourhood))
        .collect()
}

/// Rows restricted by room type only; `None` keeps every row.
pub fn filter_by_room_type<'a>(dataset: &'a Dataset, room_type: Option<&str>) -> Vec<&'a Listing> {
    match room_type.filter(|rt| !rt.is_empty()) {
        Some(rt) => dataset
            .listings()
            .iter()
            .filter(|l| l.room_type == rt)
            .collect(),
        None => dataset.listings().iter().collect(),
    }
}

fn summarize(listings: Vec<&Listing>) -> FilterResult<'_> {
    let count = listings.len();
    let avg_price = if count == 0 {
        0.0
    } else {
        listings.iter().map(|l| l.price).sum::<f64>() / count as f64
    };

    FilterResult {
        listings,
        avg_price,
        count,
    }
}
