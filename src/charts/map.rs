//! Map View Projection
//! One point per filtered listing, centred on the mean coordinate.

use crate::config::MapConfig;
use crate::data::FilterResult;

/// Degrees of longitude covered by a single 256 px tile at zoom 0.
const WORLD_DEGREES: f64 = 360.0;
/// Tiles visible across a typical map viewport.
const VIEWPORT_TILES: f64 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub label: String,
    pub price: f64,
}

impl MapPoint {
    /// Hover text: listing name (if any) and nightly price.
    pub fn tooltip(&self) -> String {
        if self.label.is_empty() {
            format!("${:.2}", self.price)
        } else {
            format!("{}\n${:.2}", self.label, self.price)
        }
    }
}

/// Scatter layer description for the filtered listings.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: u8,
    pub color: [u8; 4],
    pub radius_m: f64,
    pub points: Vec<MapPoint>,
}

impl MapView {
    /// Project a filter result onto the map; `None` when there is nothing to show.
    pub fn project(result: &FilterResult<'_>, style: &MapConfig) -> Option<Self> {
        if result.is_empty() {
            return None;
        }

        let n = result.listings.len() as f64;
        let center_latitude = result.listings.iter().map(|l| l.latitude).sum::<f64>() / n;
        let center_longitude = result.listings.iter().map(|l| l.longitude).sum::<f64>() / n;

        let points = result
            .listings
            .iter()
            .map(|l| MapPoint {
                longitude: l.longitude,
                latitude: l.latitude,
                label: l.name.clone().unwrap_or_default(),
                price: l.price,
            })
            .collect();

        Some(Self {
            center_latitude,
            center_longitude,
            zoom: style.zoom,
            color: style.point_color,
            radius_m: style.point_radius_m,
            points,
        })
    }

    /// Longitude span shown at the configured zoom level.
    pub fn span_degrees(&self) -> f64 {
        WORLD_DEGREES / 2f64.powi(i32::from(self.zoom)) * VIEWPORT_TILES
    }

    /// The listing drawn at exactly this coordinate.
    pub fn point_at(&self, longitude: f64, latitude: f64) -> Option<&MapPoint> {
        self.points
            .iter()
            .find(|p| p.longitude == longitude && p.latitude == latitude)
    }

    /// Visible `(min_lon, min_lat)` and `(max_lon, max_lat)` corners.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let half_lon = self.span_degrees() / 2.0;
        // Mercator: a degree of longitude shrinks by cos(latitude)
        let half_lat = half_lon * self.center_latitude.to_radians().cos();
        (
            [self.center_longitude - half_lon, self.center_latitude - half_lat],
            [self.center_longitude + half_lon, self.center_latitude + half_lat],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{apply_filters, sample_dataset, FilterCriteria};

    #[test]
    fn centred_on_mean_coordinate() {
        let ds = sample_dataset();
        let result = apply_filters(&ds, &FilterCriteria::default());
        let view = MapView::project(&result, &MapConfig::default()).unwrap();

        assert_eq!(view.points.len(), 2);
        assert!((view.center_latitude - 42.345).abs() < 1e-9);
        assert!((view.center_longitude + 71.105).abs() < 1e-9);
        assert_eq!(view.zoom, 11);
        assert_eq!(view.color, [200, 30, 0, 160]);
        assert_eq!(view.radius_m, 200.0);

        let first = &view.points[0];
        assert_eq!(first.label, "Cozy Loft");
        assert_eq!((first.longitude, first.latitude), (-71.08, 42.35));
    }

    #[test]
    fn hovered_point_names_its_listing() {
        let ds = sample_dataset();
        let result = apply_filters(&ds, &FilterCriteria::default());
        let view = MapView::project(&result, &MapConfig::default()).unwrap();

        let point = view.point_at(-71.08, 42.35).unwrap();
        assert_eq!(point.tooltip(), "Cozy Loft\n$120.00");
        assert!(view.point_at(0.0, 0.0).is_none());

        let unnamed = MapPoint {
            label: String::new(),
            ..point.clone()
        };
        assert_eq!(unnamed.tooltip(), "$120.00");
    }

    #[test]
    fn empty_result_has_no_map() {
        let ds = sample_dataset();
        let result = apply_filters(&ds, &FilterCriteria::new().min_reviews(1000));
        assert!(MapView::project(&result, &MapConfig::default()).is_none());
    }

    #[test]
    fn bounds_contain_center() {
        let ds = sample_dataset();
        let result = apply_filters(&ds, &FilterCriteria::default());
        let view = MapView::project(&result, &MapConfig::default()).unwrap();

        let (min, max) = view.bounds();
        assert!(min[0] < view.center_longitude && view.center_longitude < max[0]);
        assert!(min[1] < view.center_latitude && view.center_latitude < max[1]);
        assert!((view.span_degrees() - 360.0 / 2048.0 * 4.0).abs() < 1e-12);
    }
}
