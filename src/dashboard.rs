//! Dashboard Sections Module
//! One independent, fallible computation per dashboard section.
//!
//! Every section yields `Ready`, a `NoData` message, or an error that is
//! shown in place of that section only.

use crate::charts::{BarChart, ChartError, ChartLabels, Histogram, ListingColumn, MapView};
use crate::config::DashboardConfig;
use crate::data::{
    apply_filters, filter_by_neighbourhoods, filter_by_room_type, Dataset, FilterCriteria,
    FilterResult,
};
use crate::stats::{
    global_mean_price, mean_price_by_neighbourhood, mean_price_by_room_type, price_extremes,
    GroupMean, PriceSummary, StatsCalculator,
};
use thiserror::Error;

pub const NO_DATASET: &str = "No listings loaded.";
pub const SELECT_NEIGHBOURHOOD: &str = "Please select at least one neighborhood.";
pub const NO_MATCHING_DATA: &str = "No data matches your criteria.";
pub const NO_ROOM_DATA: &str = "No listings for this room type.";
pub const NO_RESULTS: &str = "No results match your filters.";
pub const NO_MAP_DATA: &str = "No data available for map view.";

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Error generating chart: {0}")]
    Chart(#[from] ChartError),
    #[error("Non-finite {0}")]
    NonFinite(&'static str),
}

/// Outcome of a section that computed without error.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionView<T> {
    Ready(T),
    NoData(&'static str),
}

impl<T> SectionView<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            SectionView::Ready(value) => Some(value),
            SectionView::NoData(_) => None,
        }
    }
}

pub type SectionResult<T> = Result<SectionView<T>, DashboardError>;

/// Headline figures over the whole dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickStats {
    pub total_listings: usize,
    pub average_price: f64,
    pub most_expensive: String,
    pub least_expensive: String,
}

/// Filtered listing table with its price statistics and histogram.
#[derive(Debug, Clone)]
pub struct ListingsSection<'a> {
    pub result: FilterResult<'a>,
    pub summary: PriceSummary,
    pub histogram: Histogram,
}

/// Every section for one pass over the dataset.
#[derive(Debug)]
pub struct Dashboard<'a> {
    pub quick_stats: SectionResult<QuickStats>,
    pub neighbourhoods: SectionResult<BarChart>,
    pub room_types: SectionResult<BarChart>,
    pub listings: SectionResult<ListingsSection<'a>>,
    pub map: SectionResult<MapView>,
}

impl<'a> Dashboard<'a> {
    /// Recompute every section from scratch for `criteria`.
    pub fn compute(
        dataset: &'a Dataset,
        criteria: &FilterCriteria,
        config: &DashboardConfig,
    ) -> Self {
        let result = apply_filters(dataset, criteria);
        log::debug!(
            "Filter pass kept {} of {} listings (avg price {:.2})",
            result.count,
            dataset.len(),
            result.avg_price
        );

        let dashboard = Self {
            quick_stats: quick_stats(dataset),
            neighbourhoods: neighbourhood_prices(dataset, criteria),
            room_types: room_type_prices(dataset, criteria),
            map: map_view(&result, config),
            listings: listings_section(result, config.histogram_column, config.histogram_bins),
        };
        dashboard.log_failures();
        dashboard
    }

    fn log_failures(&self) {
        let failures = [
            ("quick stats", self.quick_stats.as_ref().err()),
            ("neighbourhood prices", self.neighbourhoods.as_ref().err()),
            ("room type prices", self.room_types.as_ref().err()),
            ("listings", self.listings.as_ref().err()),
            ("map", self.map.as_ref().err()),
        ];
        for (section, err) in failures {
            if let Some(err) = err {
                log::error!("Dashboard section '{}' failed: {}", section, err);
            }
        }
    }
}

pub fn quick_stats(dataset: &Dataset) -> SectionResult<QuickStats> {
    let Some(average_price) = global_mean_price(dataset) else {
        return Ok(SectionView::NoData(NO_DATASET));
    };
    if !average_price.is_finite() {
        return Err(DashboardError::NonFinite("average price"));
    }

    let by_neighbourhood = mean_price_by_neighbourhood(dataset.listings());
    let Some(extremes) = price_extremes(&by_neighbourhood) else {
        return Ok(SectionView::NoData(NO_DATASET));
    };

    Ok(SectionView::Ready(QuickStats {
        total_listings: dataset.len(),
        average_price,
        most_expensive: extremes.most_expensive,
        least_expensive: extremes.least_expensive,
    }))
}

/// Mean price per chosen neighbourhood. Only the neighbourhood selection
/// applies here.
pub fn neighbourhood_prices(
    dataset: &Dataset,
    criteria: &FilterCriteria,
) -> SectionResult<BarChart> {
    if criteria.neighbourhoods.is_empty() {
        return Ok(SectionView::NoData(SELECT_NEIGHBOURHOOD));
    }

    let rows = filter_by_neighbourhoods(dataset, &criteria.neighbourhoods);
    let means = mean_price_by_neighbourhood(rows);
    if means.is_empty() {
        return Ok(SectionView::NoData(NO_MATCHING_DATA));
    }

    let chart = BarChart::build(
        group_rows(means),
        ChartLabels::new("Average Price by Neighborhood", "Neighborhood", "Price ($)"),
    )?;
    Ok(SectionView::Ready(chart))
}

/// Mean price per room type. Only the room type selection applies here.
pub fn room_type_prices(dataset: &Dataset, criteria: &FilterCriteria) -> SectionResult<BarChart> {
    let rows = filter_by_room_type(dataset, criteria.room_type.as_deref());
    let means = mean_price_by_room_type(rows);
    if means.is_empty() {
        return Ok(SectionView::NoData(NO_ROOM_DATA));
    }

    let chart = BarChart::build(
        group_rows(means),
        ChartLabels::new("Room Type Prices", "Room Type", "Price ($)"),
    )?;
    Ok(SectionView::Ready(chart))
}

/// Table, price statistics and a histogram of `column` for the filtered rows.
pub fn listings_section(
    result: FilterResult<'_>,
    column: ListingColumn,
    bins: usize,
) -> SectionResult<ListingsSection<'_>> {
    let Some(summary) = StatsCalculator::compute_price_summary(&result.prices()) else {
        return Ok(SectionView::NoData(NO_RESULTS));
    };

    let histogram = Histogram::build(&result.listings, column, bins, column.histogram_labels())?;

    Ok(SectionView::Ready(ListingsSection {
        result,
        summary,
        histogram,
    }))
}

pub fn map_view(result: &FilterResult<'_>, config: &DashboardConfig) -> SectionResult<MapView> {
    match MapView::project(result, &config.map) {
        Some(view) if view.center_latitude.is_finite() && view.center_longitude.is_finite() => {
            Ok(SectionView::Ready(view))
        }
        Some(_) => Err(DashboardError::NonFinite("map centre")),
        None => Ok(SectionView::NoData(NO_MAP_DATA)),
    }
}

fn group_rows(means: Vec<GroupMean>) -> impl Iterator<Item = (String, f64)> {
    means.into_iter().map(|g| (g.group, g.mean))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{listing, sample_dataset, Listing};

    fn config() -> DashboardConfig {
        DashboardConfig::default()
    }

    #[test]
    fn quick_stats_for_sample() {
        let ds = sample_dataset();
        let stats = quick_stats(&ds).unwrap();

        assert_eq!(
            stats,
            SectionView::Ready(QuickStats {
                total_listings: 2,
                average_price: 80.0,
                most_expensive: "Back Bay".into(),
                least_expensive: "Allston".into(),
            })
        );
    }

    #[test]
    fn quick_stats_without_rows() {
        let stats = quick_stats(&Dataset::default()).unwrap();
        assert_eq!(stats, SectionView::NoData(NO_DATASET));
    }

    #[test]
    fn neighbourhood_section_needs_a_selection() {
        let ds = sample_dataset();
        let view = neighbourhood_prices(&ds, &FilterCriteria::default()).unwrap();
        assert_eq!(view, SectionView::NoData(SELECT_NEIGHBOURHOOD));

        let view = neighbourhood_prices(&ds, &FilterCriteria::new().neighbourhoods(["Nowhere"]))
            .unwrap();
        assert_eq!(view, SectionView::NoData(NO_MATCHING_DATA));
    }

    #[test]
    fn neighbourhood_section_ignores_other_filters() {
        let ds = sample_dataset();
        let criteria = FilterCriteria::new()
            .neighbourhoods(["Allston", "Back Bay"])
            .price_range(1000.0, 2000.0);
        let view = neighbourhood_prices(&ds, &criteria).unwrap();
        let chart = view.ready().unwrap();

        let bars: Vec<(&str, f64)> = chart
            .bars
            .iter()
            .map(|b| (b.category.as_str(), b.value))
            .collect();
        assert_eq!(bars, vec![("Allston", 40.0), ("Back Bay", 120.0)]);
        assert_eq!(chart.labels.x_label, "Neighborhood");
    }

    #[test]
    fn room_type_section_follows_selection() {
        let ds = sample_dataset();

        let all = room_type_prices(&ds, &FilterCriteria::default()).unwrap();
        assert_eq!(all.ready().unwrap().bars.len(), 2);

        let one = room_type_prices(&ds, &FilterCriteria::new().room_type("Private room")).unwrap();
        let chart = one.ready().unwrap();
        assert_eq!(chart.bars.len(), 1);
        assert_eq!(chart.bars[0].annotation(), "40.00");

        let none = room_type_prices(&ds, &FilterCriteria::new().room_type("Hotel room")).unwrap();
        assert_eq!(none, SectionView::NoData(NO_ROOM_DATA));
    }

    #[test]
    fn full_pass_for_price_range() {
        let ds = sample_dataset();
        let criteria = FilterCriteria::new().price_range(50.0, 200.0);
        let dashboard = Dashboard::compute(&ds, &criteria, &config());

        let listings = dashboard.listings.as_ref().unwrap().ready().unwrap();
        assert_eq!(listings.result.count, 1);
        assert_eq!(listings.result.avg_price, 120.0);
        assert_eq!(listings.summary.median, 120.0);
        assert_eq!(listings.histogram.bins.len(), 20);
        assert_eq!(listings.histogram.total(), 1);

        let map = dashboard.map.as_ref().unwrap().ready().unwrap();
        assert_eq!(map.points.len(), 1);
        assert_eq!(map.center_latitude, 42.35);

        assert!(dashboard.quick_stats.is_ok());
        // No neighbourhood chosen
        assert!(matches!(dashboard.neighbourhoods, Ok(SectionView::NoData(_))));
    }

    #[test]
    fn empty_filter_result_is_no_data() {
        let ds = sample_dataset();
        let criteria = FilterCriteria::new().search("castle");
        let dashboard = Dashboard::compute(&ds, &criteria, &config());

        assert!(matches!(dashboard.listings, Ok(SectionView::NoData(NO_RESULTS))));
        assert!(matches!(dashboard.map, Ok(SectionView::NoData(NO_MAP_DATA))));
        assert!(matches!(dashboard.room_types, Ok(SectionView::Ready(_))));
    }

    #[test]
    fn one_failing_section_leaves_the_rest() {
        let ds = Dataset::new(vec![
            listing(Some("a"), "Fenway", "Private room", 80.0, 10, 1),
            Listing {
                latitude: f64::NAN,
                ..listing(Some("b"), "Fenway", "Private room", 90.0, 10, 1)
            },
        ]);
        let dashboard = Dashboard::compute(&ds, &FilterCriteria::default(), &config());

        assert!(matches!(dashboard.map, Err(DashboardError::NonFinite(_))));
        assert!(matches!(dashboard.listings, Ok(SectionView::Ready(_))));
        assert!(matches!(dashboard.room_types, Ok(SectionView::Ready(_))));
        assert!(matches!(dashboard.quick_stats, Ok(SectionView::Ready(_))));
    }

    #[test]
    fn zero_bins_fails_only_the_listing_section() {
        let ds = sample_dataset();
        let config = DashboardConfig {
            histogram_bins: 0,
            ..DashboardConfig::default()
        };
        let dashboard = Dashboard::compute(&ds, &FilterCriteria::default(), &config);

        assert!(matches!(
            dashboard.listings,
            Err(DashboardError::Chart(ChartError::ZeroBins))
        ));
        assert!(matches!(dashboard.map, Ok(SectionView::Ready(_))));
    }

    #[test]
    fn histogram_column_comes_from_settings() {
        let ds = sample_dataset();
        let config = DashboardConfig {
            histogram_column: ListingColumn::Reviews,
            ..DashboardConfig::default()
        };
        let dashboard = Dashboard::compute(&ds, &FilterCriteria::default(), &config);

        let listings = dashboard.listings.as_ref().unwrap().ready().unwrap();
        assert_eq!(listings.histogram.column, ListingColumn::Reviews);
        assert_eq!(listings.histogram.labels.title, "Review Count Distribution");
        // Price statistics are unaffected by the histogram column
        assert_eq!(listings.summary.mean, 80.0);
    }
}
