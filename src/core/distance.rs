use crate::models::{BoundingBox, GeoPoint};

/// Mean Earth radius in kilometers (IUGG)
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Radii strictly below this use the equirectangular approximation
pub const SHORT_RANGE_RADIUS_KM: f64 = 50.0;

/// Calculate the Haversine (great-circle) distance between two points in kilometers
#[inline]
pub fn haversine_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Flat-earth distance estimate in kilometers.
///
/// Projects the longitude delta by the cosine of the mean latitude. Only
/// accurate over short ranges; callers restrict it to radii below
/// [`SHORT_RANGE_RADIUS_KM`].
#[inline]
pub fn equirectangular_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();

    let x = (a.lon - b.lon).to_radians() * ((lat1_rad + lat2_rad) / 2.0).cos();
    let y = (a.lat - b.lat).to_radians();

    (x * x + y * y).sqrt() * EARTH_RADIUS_KM
}

/// Calculate the degree-space bounding box of a circle
///
/// The latitude half-span is `radius / R` converted to degrees; the longitude
/// half-span is widened by `1 / cos(center latitude)`.
pub fn calculate_bounding_box(center: GeoPoint, radius_km: f64) -> BoundingBox {
    let lat_delta = (radius_km / EARTH_RADIUS_KM).to_degrees();
    let lon_delta = (radius_km / (EARTH_RADIUS_KM * center.lat.to_radians().cos())).to_degrees();

    BoundingBox {
        min_lat: center.lat - lat_delta,
        max_lat: center.lat + lat_delta,
        min_lon: center.lon - lon_delta,
        max_lon: center.lon + lon_delta,
    }
}

/// Check if a point is within a bounding box (edges inclusive)
#[inline]
pub fn is_within_bounding_box(point: GeoPoint, bbox: &BoundingBox) -> bool {
    point.lat >= bbox.min_lat
        && point.lat <= bbox.max_lat
        && point.lon >= bbox.min_lon
        && point.lon <= bbox.max_lon
}

/// O(1) pre-check run before any trigonometric distance
#[inline]
pub fn bounding_box_contains(point: GeoPoint, center: GeoPoint, radius_km: f64) -> bool {
    is_within_bounding_box(point, &calculate_bounding_box(center, radius_km))
}

/// Closed-disk containment test
///
/// 1. Reject anything outside the bounding box.
/// 2. Radii below 50 km compare against the equirectangular distance.
/// 3. Larger radii compare against the haversine distance.
///
/// A point exactly `radius_km` away is inside, so a zero radius matches only
/// the center itself. Non-finite inputs fail every comparison and never match.
#[inline]
pub fn is_point_inside_radius(point: GeoPoint, center: GeoPoint, radius_km: f64) -> bool {
    if !bounding_box_contains(point, center, radius_km) {
        return false;
    }

    if radius_km < SHORT_RANGE_RADIUS_KM {
        equirectangular_distance(point, center) <= radius_km
    } else {
        haversine_distance(point, center) <= radius_km
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAO_PAULO: GeoPoint = GeoPoint::new(-23.5505, -46.6333);
    const RIO: GeoPoint = GeoPoint::new(-22.9068, -43.1729);
    const NEW_YORK: GeoPoint = GeoPoint::new(40.7128, -74.0060);

    /// Point `km` due north of `center` along the meridian
    fn north_of(center: GeoPoint, km: f64) -> GeoPoint {
        GeoPoint::new(center.lat + (km / EARTH_RADIUS_KM).to_degrees(), center.lon)
    }

    #[test]
    fn test_haversine_distance() {
        let distance = haversine_distance(SAO_PAULO, RIO);
        assert!((distance - 360.0).abs() < 10.0, "Distance should be ~360km, got {}", distance);
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let ab = haversine_distance(SAO_PAULO, NEW_YORK);
        let ba = haversine_distance(NEW_YORK, SAO_PAULO);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_equirectangular_close_to_haversine_short_range() {
        let near = GeoPoint::new(-23.5600, -46.6500);
        let flat = equirectangular_distance(near, SAO_PAULO);
        let exact = haversine_distance(near, SAO_PAULO);
        assert!((flat - exact).abs() < 0.001, "flat={} exact={}", flat, exact);
    }

    #[test]
    fn test_bounding_box() {
        let bbox = calculate_bounding_box(NEW_YORK, 10.0);

        assert!(bbox.min_lat < NEW_YORK.lat);
        assert!(bbox.max_lat > NEW_YORK.lat);
        assert!(bbox.min_lon < NEW_YORK.lon);
        assert!(bbox.max_lon > NEW_YORK.lon);

        // 20km / ~111.2km per degree
        let lat_span = bbox.max_lat - bbox.min_lat;
        assert!((lat_span - 0.18).abs() < 0.02, "Lat span should be ~0.18 degrees");

        // Longitude span is wider away from the equator
        let lon_span = bbox.max_lon - bbox.min_lon;
        assert!(lon_span > lat_span);
    }

    #[test]
    fn test_point_within_bbox() {
        let bbox = calculate_bounding_box(NEW_YORK, 10.0);

        assert!(is_within_bounding_box(NEW_YORK, &bbox));
        assert!(is_within_bounding_box(GeoPoint::new(40.71, -74.0), &bbox));
        assert!(!is_within_bounding_box(GeoPoint::new(50.0, -80.0), &bbox));
    }

    #[test]
    fn test_outside_bounding_box_rejected() {
        assert!(!is_point_inside_radius(
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(50.0, 50.0),
            10.0
        ));
    }

    #[test]
    fn test_small_radius_inside() {
        assert!(is_point_inside_radius(SAO_PAULO, GeoPoint::new(-23.5506, -46.6334), 1.0));
    }

    #[test]
    fn test_small_radius_outside() {
        assert!(!is_point_inside_radius(SAO_PAULO, GeoPoint::new(-23.5600, -46.6500), 0.5));
    }

    #[test]
    fn test_large_radius_inside() {
        assert!(is_point_inside_radius(SAO_PAULO, RIO, 500.0));
    }

    #[test]
    fn test_large_radius_outside() {
        assert!(!is_point_inside_radius(SAO_PAULO, NEW_YORK, 500.0));
    }

    #[test]
    fn test_zero_radius_matches_only_center() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert!(is_point_inside_radius(origin, origin, 0.0));
        assert!(!is_point_inside_radius(GeoPoint::new(0.0, 1e-9), origin, 0.0));
    }

    #[test]
    fn test_boundary_short_range() {
        // On the meridian both distance formulas reduce to R * dlat
        let radius = 10.0;
        let edge = north_of(SAO_PAULO, radius - 1e-6);
        let beyond = north_of(SAO_PAULO, radius + 1e-3);

        assert!(is_point_inside_radius(edge, SAO_PAULO, radius));
        assert!(!is_point_inside_radius(beyond, SAO_PAULO, radius));
    }

    #[test]
    fn test_point_exactly_on_short_range_edge_is_inside() {
        let origin = GeoPoint::new(0.0, 0.0);
        for radius in [1.0, 5.0, 10.0, 25.0] {
            let edge = north_of(origin, radius);
            assert_eq!(equirectangular_distance(edge, origin), radius);
            assert!(is_point_inside_radius(edge, origin, radius));
        }

        let point = north_of(SAO_PAULO, 10.0);
        let exact = equirectangular_distance(point, SAO_PAULO);
        assert!(is_point_inside_radius(point, SAO_PAULO, exact));
        assert!(!is_point_inside_radius(point, SAO_PAULO, exact * (1.0 - 1e-12)));
    }

    #[test]
    fn test_boundary_long_range() {
        let radius = 200.0;
        let edge = north_of(SAO_PAULO, radius - 1e-6);
        let beyond = north_of(SAO_PAULO, radius + 1e-3);

        assert!(is_point_inside_radius(edge, SAO_PAULO, radius));
        assert!(!is_point_inside_radius(beyond, SAO_PAULO, radius));
    }

    #[test]
    fn test_fifty_km_threshold_both_sides() {
        let just_below = SHORT_RANGE_RADIUS_KM - 1e-3;
        let at = SHORT_RANGE_RADIUS_KM;

        let inside_below = north_of(SAO_PAULO, just_below - 1e-3);
        let outside_below = north_of(SAO_PAULO, just_below + 1e-3);
        assert!(is_point_inside_radius(inside_below, SAO_PAULO, just_below));
        assert!(!is_point_inside_radius(outside_below, SAO_PAULO, just_below));

        let inside_at = north_of(SAO_PAULO, at - 1e-3);
        let outside_at = north_of(SAO_PAULO, at + 1e-3);
        assert!(is_point_inside_radius(inside_at, SAO_PAULO, at));
        assert!(!is_point_inside_radius(outside_at, SAO_PAULO, at));
    }

    #[test]
    fn test_negative_radius_never_matches() {
        assert!(!is_point_inside_radius(SAO_PAULO, SAO_PAULO, -1.0));
    }

    #[test]
    fn test_non_finite_point_never_matches() {
        let nan = GeoPoint::new(f64::NAN, SAO_PAULO.lon);
        assert!(!is_point_inside_radius(nan, SAO_PAULO, 10.0));
        assert!(!is_point_inside_radius(nan, SAO_PAULO, 100.0));

        let inf = GeoPoint::new(f64::INFINITY, f64::INFINITY);
        assert!(!is_point_inside_radius(inf, SAO_PAULO, 100.0));
    }
}
