//! Monitored regions and point-in-polygon containment

use geo::{coord, Contains, Point, Polygon, Rect};

use crate::core_types::point::{FirePoint, Weather};

/// A monitored geographic region.
///
/// Carries the polygon used for containment tests plus the optional ambient
/// weather attached when regions are enriched upstream. The engine only ever
/// reads the geometry; it is never mutated during a run.
#[derive(Debug, Clone)]
pub struct Region {
    id: String,
    polygon: Polygon<f64>,
    weather: Option<Weather>,
}

impl Region {
    /// Create a region from an id and polygon
    pub fn new(id: impl Into<String>, polygon: Polygon<f64>) -> Self {
        Region {
            id: id.into(),
            polygon,
            weather: None,
        }
    }

    /// Attach ambient weather to this region
    pub fn with_weather(mut self, weather: Weather) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Create an axis-aligned rectangular region (demo and test scenarios)
    pub fn rectangle(
        id: impl Into<String>,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> Self {
        let rect = Rect::new(coord! { x: min_x, y: min_y }, coord! { x: max_x, y: max_y });
        Self::new(id, rect.to_polygon())
    }

    /// Region identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Ambient weather attached to this region, if any
    pub fn weather(&self) -> Option<Weather> {
        self.weather
    }

    /// True if the coordinate lies within this region's polygon
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.polygon.contains(&Point::new(x, y))
    }
}

/// The set of monitored regions a simulation runs against
#[derive(Debug, Clone, Default)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    /// Create a region set
    pub fn new(regions: Vec<Region>) -> Self {
        RegionSet { regions }
    }

    /// True if at least one region contains the coordinate
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.regions.iter().any(|r| r.contains(x, y))
    }

    /// Number of regions in the set
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True if the set holds no regions
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterate over the regions
    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    /// Keep only the ignition points lying inside a monitored region
    pub fn filter_ignitions(&self, points: Vec<FirePoint>) -> Vec<FirePoint> {
        points
            .into_iter()
            .filter(|pt| self.contains(pt.x(), pt.y()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_containment() {
        let region = Region::rectangle("test", 80.0, 50.0, 100.0, 60.0);
        assert!(region.contains(90.0, 55.0));
        assert!(!region.contains(79.0, 55.0));
        assert!(!region.contains(90.0, 61.0));
    }

    #[test]
    fn test_region_set_any_semantics() {
        let set = RegionSet::new(vec![
            Region::rectangle("west", 0.0, 0.0, 10.0, 10.0),
            Region::rectangle("east", 20.0, 0.0, 30.0, 10.0),
        ]);
        assert!(set.contains(5.0, 5.0));
        assert!(set.contains(25.0, 5.0));
        // The gap between the two rectangles belongs to neither
        assert!(!set.contains(15.0, 5.0));
    }

    #[test]
    fn test_empty_set_contains_nothing() {
        let set = RegionSet::default();
        assert!(set.is_empty());
        assert!(!set.contains(0.0, 0.0));
    }

    #[test]
    fn test_filter_ignitions() {
        let set = RegionSet::new(vec![Region::rectangle("only", 0.0, 0.0, 10.0, 10.0)]);
        let points = vec![
            FirePoint::ignition(5.0, 5.0, Weather::default()),
            FirePoint::ignition(50.0, 5.0, Weather::default()),
        ];
        let kept = set.filter_ignitions(points);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].x(), 5.0);
    }

    #[test]
    fn test_region_ambient_weather() {
        let region = Region::rectangle("enriched", 0.0, 0.0, 1.0, 1.0)
            .with_weather(Weather::new(25.0, 40.0, 3.0, 180.0));
        assert_eq!(region.id(), "enriched");
        assert_eq!(region.weather().unwrap().temperature, 25.0);
    }
}
