//! Geodesy helpers shared by the Corridor Selector and catalogue loader.

use geo::{Distance, Haversine};
use geo_types::Point;
use h3o::{LatLng, Resolution};

const METERS_PER_MILE: f64 = 1609.344;

/// Great-circle distance between two (lat, lon) points, in miles.
pub fn haversine_miles(a: (f64, f64), b: (f64, f64)) -> f64 {
    let p1 = Point::new(a.1, a.0);
    let p2 = Point::new(b.1, b.0);
    Haversine::distance(p1, p2) / METERS_PER_MILE
}

/// H3 resolution whose edge length is roughly 1.2 km: coarse enough to keep
/// the cell count for a long corridor manageable, fine enough that a single
/// cell comfortably covers a sub-mile deviation buffer.
pub const CELL_RESOLUTION: Resolution = Resolution::Seven;

/// Hex-cell identifier for a (lat, lon) point at `CELL_RESOLUTION`.
///
/// Returns `None` if the coordinate is not a valid WGS84 lat/lon pair (e.g.
/// out of range); the caller skips the point rather than failing the
/// request.
pub fn cell_id(lat: f64, lon: f64) -> Option<String> {
    LatLng::new(lat, lon)
        .ok()
        .map(|ll| ll.to_cell(CELL_RESOLUTION).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_known_distance() {
        // New York to Los Angeles is roughly 2450 miles great-circle.
        let ny = (40.7128, -74.0060);
        let la = (34.0522, -118.2437);
        let d = haversine_miles(ny, la);
        assert!((2400.0..2500.0).contains(&d), "got {d}");
    }

    #[test]
    fn haversine_zero_for_identical_points() {
        let p = (39.0, -95.0);
        assert_eq!(haversine_miles(p, p), 0.0);
    }

    #[test]
    fn cell_id_stable_for_same_point() {
        let a = cell_id(39.0, -95.0).unwrap();
        let b = cell_id(39.0, -95.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cell_id_rejects_invalid_coordinates() {
        assert!(cell_id(f64::NAN, 0.0).is_none());
    }
}
