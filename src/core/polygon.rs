use crate::models::GeoPoint;

/// Smallest usable ring: three distinct vertices plus the closing point
pub const MIN_RING_POINTS: usize = 4;

/// A ring is usable when it has at least [`MIN_RING_POINTS`] points and its
/// first and last points are equal
#[inline]
pub fn is_closed_ring(ring: &[GeoPoint]) -> bool {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) => ring.len() >= MIN_RING_POINTS && first == last,
        _ => false,
    }
}

/// Even-odd ray casting over the edges `(i, i - 1 mod n)`.
///
/// Each edge that straddles the point's longitude toggles the result when the
/// point lies below the edge's interpolated latitude at that longitude.
/// Unusable rings return false without touching the edges. Points exactly on
/// an edge may land on either side.
pub fn point_in_polygon(point: GeoPoint, ring: &[GeoPoint]) -> bool {
    if !is_closed_ring(ring) {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;

    for (i, vertex) in ring.iter().enumerate() {
        let prev = ring[j];

        let straddles = (vertex.lon > point.lon) != (prev.lon > point.lon);
        if straddles {
            let crossing_lat =
                (prev.lat - vertex.lat) * (point.lon - vertex.lon) / (prev.lon - vertex.lon)
                    + vertex.lat;
            if point.lat < crossing_lat {
                inside = !inside;
            }
        }

        j = i;
    }

    inside
}
