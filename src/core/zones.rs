//! Zone containment shared by targeting and exclusion evaluation.

use crate::core::{distance::is_point_inside_radius, polygon::point_in_polygon};
use crate::models::{GeoPoint, PolygonZone, RadiusZone};

impl RadiusZone {
    #[inline]
    pub fn contains(&self, point: GeoPoint) -> bool {
        is_point_inside_radius(point, self.center, self.radius_km)
    }
}

impl PolygonZone {
    /// False for open rings or rings with fewer than four points
    #[inline]
    pub fn contains(&self, point: GeoPoint) -> bool {
        point_in_polygon(point, &self.ring)
    }
}

/// True if any zone contains the point; stops at the first hit
#[inline]
pub fn is_point_inside_any_radius(point: GeoPoint, zones: &[RadiusZone]) -> bool {
    zones.iter().any(|zone| zone.contains(point))
}
