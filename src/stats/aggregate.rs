//! Aggregate Queries Module
//! Group-by mean prices and the dashboard's headline figures.

use crate::data::{Dataset, Listing};
use std::collections::BTreeMap;

/// Mean price of one group of listings.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub group: String,
    pub mean: f64,
    pub count: usize,
}

/// Most and least expensive group by mean price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceExtremes {
    pub most_expensive: String,
    pub least_expensive: String,
}

/// Mean price across every listing; `None` for an empty dataset.
pub fn global_mean_price(dataset: &Dataset) -> Option<f64> {
    if dataset.is_empty() {
        return None;
    }
    let total: f64 = dataset.listings().iter().map(|l| l.price).sum();
    Some(total / dataset.len() as f64)
}

/// Mean price per group, ordered alphabetically by group name.
pub fn mean_price_by<'a, I, F>(listings: I, key: F) -> Vec<GroupMean>
where
    I: IntoIterator<Item = &'a Listing>,
    F: Fn(&'a Listing) -> &'a str,
{
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for listing in listings {
        let entry = sums.entry(key(listing)).or_insert((0.0, 0));
        entry.0 += listing.price;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(group, (sum, count))| GroupMean {
            group: group.to_string(),
            mean: sum / count as f64,
            count,
        })
        .collect()
}

pub fn mean_price_by_neighbourhood<'a, I>(listings: I) -> Vec<GroupMean>
where
    I: IntoIterator<Item = &'a Listing>,
{
    mean_price_by(listings, |l| l.neighbourhood.as_str())
}

pub fn mean_price_by_room_type<'a, I>(listings: I) -> Vec<GroupMean>
where
    I: IntoIterator<Item = &'a Listing>,
{
    mean_price_by(listings, |l| l.room_type.as_str())
}

/// Highest and lowest mean among `groups`.
///
/// Ties go to the group seen first; with the alphabetical output of
/// [`mean_price_by`] that is the alphabetically first name.
pub fn price_extremes(groups: &[GroupMean]) -> Option<PriceExtremes> {
    let first = groups.first()?;
    let mut max = first;
    let mut min = first;

    for group in &groups[1..] {
        if group.mean > max.mean {
            max = group;
        }
        if group.mean < min.mean {
            min = group;
        }
    }

    Some(PriceExtremes {
        most_expensive: max.group.clone(),
        least_expensive: min.group.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{listing, sample_dataset};

    #[test]
    fn neighbourhood_means_for_sample() {
        let ds = sample_dataset();
        let means = mean_price_by_neighbourhood(ds.listings());

        assert_eq!(
            means,
            vec![
                GroupMean {
                    group: "Allston".into(),
                    mean: 40.0,
                    count: 1
                },
                GroupMean {
                    group: "Back Bay".into(),
                    mean: 120.0,
                    count: 1
                },
            ]
        );

        let extremes = price_extremes(&means).unwrap();
        assert_eq!(extremes.most_expensive, "Back Bay");
        assert_eq!(extremes.least_expensive, "Allston");
    }

    #[test]
    fn global_mean() {
        assert_eq!(global_mean_price(&sample_dataset()), Some(80.0));
        assert_eq!(global_mean_price(&Dataset::default()), None);
    }

    #[test]
    fn room_type_means_average_each_group() {
        let ds = Dataset::new(vec![
            listing(Some("a"), "Fenway", "Private room", 60.0, 10, 1),
            listing(Some("b"), "Fenway", "Entire home/apt", 200.0, 10, 1),
            listing(Some("c"), "Allston", "Private room", 90.0, 10, 1),
        ]);
        let means = mean_price_by_room_type(ds.listings());

        assert_eq!(means.len(), 2);
        assert_eq!(means[0].group, "Entire home/apt");
        assert_eq!(means[1].group, "Private room");
        assert_eq!(means[1].mean, 75.0);
        assert_eq!(means[1].count, 2);
    }

    #[test]
    fn ties_break_alphabetically() {
        let ds = Dataset::new(vec![
            listing(Some("a"), "Roxbury", "Private room", 100.0, 10, 1),
            listing(Some("b"), "Charlestown", "Private room", 100.0, 10, 1),
            listing(Some("c"), "Dorchester", "Private room", 100.0, 10, 1),
        ]);
        let extremes = price_extremes(&mean_price_by_neighbourhood(ds.listings())).unwrap();

        assert_eq!(extremes.most_expensive, "Charlestown");
        assert_eq!(extremes.least_expensive, "Charlestown");
    }

    #[test]
    fn no_groups_no_extremes() {
        assert!(price_extremes(&[]).is_none());
        assert!(mean_price_by_neighbourhood(Dataset::default().listings()).is_empty());
    }
}
