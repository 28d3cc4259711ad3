//! The Corridor Selector: reduces the station catalogue to candidates
//! geographically adjacent to a route, annotated with deviation distance
//! and mile marker.

use std::collections::HashSet;

use crate::domain::FuelStation;
use crate::error::Error;
use crate::geo_util::{cell_id, haversine_miles};
use crate::polyline_codec;
use crate::repository::FuelRepository;

/// The first route vertex found within this many miles of a station is
/// treated as the closest, trading a small error for not scanning the rest
/// of the route.
const EARLY_EXIT_MILES: f64 = 0.1;

/// Returns every catalogue station whose nearest route point is within
/// `buffer_miles`, annotated with `deviation_distance` and
/// `route_mile_marker`. Empty polyline or no cell hits both yield an empty
/// result, never an error.
pub fn select(
    repo: &dyn FuelRepository,
    polyline: &str,
    buffer_miles: f64,
) -> Result<Vec<FuelStation>, Error> {
    let route = polyline_codec::decode(polyline, 2);
    if route.is_empty() {
        return Ok(Vec::new());
    }

    let cumulative = cumulative_mileage(&route);

    let mut cells: HashSet<String> = HashSet::new();
    for &(lat, lon) in &route {
        if let Some(cell) = cell_id(lat, lon) {
            cells.insert(cell);
        }
    }
    if cells.is_empty() {
        return Ok(Vec::new());
    }

    let cell_list: Vec<String> = cells.into_iter().collect();
    let candidates = repo.stations_by_cells(&cell_list)?;

    let mut annotated = Vec::with_capacity(candidates.len());
    for mut station in candidates {
        let (deviation, marker) = nearest_point(&route, &cumulative, station.latitude, station.longitude);
        if deviation <= buffer_miles {
            station.deviation_distance = deviation;
            station.route_mile_marker = marker;
            annotated.push(station);
        }
    }
    Ok(annotated)
}

/// `d[i]` = cumulative haversine miles from `route[0]` to `route[i]`.
/// Duplicate consecutive coordinates contribute a zero-length segment.
fn cumulative_mileage(route: &[(f64, f64)]) -> Vec<f64> {
    let mut cumulative = vec![0.0; route.len()];
    for i in 1..route.len() {
        cumulative[i] = cumulative[i - 1] + haversine_miles(route[i - 1], route[i]);
    }
    cumulative
}

/// Scans `route` for the closest vertex to `(lat, lon)`, returning its
/// distance and cumulative mileage. Short-circuits once a vertex within
/// `EARLY_EXIT_MILES` is found.
fn nearest_point(route: &[(f64, f64)], cumulative: &[f64], lat: f64, lon: f64) -> (f64, f64) {
    let mut min_dist = f64::INFINITY;
    let mut marker = 0.0;
    for (i, &point) in route.iter().enumerate() {
        let dist = haversine_miles((lat, lon), point);
        if dist < min_dist {
            min_dist = dist;
            marker = cumulative[i];
            if min_dist < EARLY_EXIT_MILES {
                break;
            }
        }
    }
    (min_dist, marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::SqliteFuelRepository;

    /// A straight east-west line, ~0.011 degrees of longitude apart per
    /// point (~1 km at this latitude), 21 points long (~20 km corridor).
    fn straight_polyline_and_stations() -> (String, Vec<FuelStation>) {
        // lat 39.0, lon from -95.00 to -94.79 in 0.01 steps.
        let coords: Vec<(f64, f64)> = (0..21).map(|i| (39.0, -95.0 + i as f64 * 0.01)).collect();
        let encoded = encode_for_test(&coords);

        let on_route = station_at(1, "on-route", 39.0, -94.95);
        let half_mile_off = station_at(2, "half-mile-off", 39.0072, -94.90);
        let far_off = station_at(3, "far-off", 39.22, -94.80);
        (encoded, vec![on_route, far_off, half_mile_off])
    }

    fn station_at(id: i64, name: &str, lat: f64, lon: f64) -> FuelStation {
        FuelStation {
            id,
            truckstop_name: name.to_string(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            rack_id: 0,
            retail_price: 3.5,
            latitude: lat,
            longitude: lon,
            hex_cell: "any".to_string(),
            deviation_distance: 0.0,
            route_mile_marker: 0.0,
        }
    }

    /// Minimal polyline encoder, used only by tests to build deterministic
    /// fixtures decodable by `polyline_codec::decode`.
    fn encode_for_test(coords: &[(f64, f64)]) -> String {
        let mut out = String::new();
        let mut prev_lat = 0i64;
        let mut prev_lon = 0i64;
        for &(lat, lon) in coords {
            let lat_i = (lat * 1e5).round() as i64;
            let lon_i = (lon * 1e5).round() as i64;
            encode_value(lat_i - prev_lat, &mut out);
            encode_value(lon_i - prev_lon, &mut out);
            prev_lat = lat_i;
            prev_lon = lon_i;
        }
        out
    }

    fn encode_value(value: i64, out: &mut String) {
        let mut v = if value < 0 { !(value << 1) } else { value << 1 };
        loop {
            let mut chunk = (v & 0x1f) as u8;
            v >>= 5;
            if v != 0 {
                chunk |= 0x20;
            }
            out.push((chunk + 63) as char);
            if v == 0 {
                break;
            }
        }
    }

    /// A `FuelRepository` double that returns every station in `stations`
    /// regardless of which cells are queried, isolating the exact-filter
    /// pass from the cell-cover prefilter for this test.
    struct FixedRepo(Vec<FuelStation>);
    impl FuelRepository for FixedRepo {
        fn stations_by_cells(&self, _cells: &[String]) -> Result<Vec<FuelStation>, Error> {
            Ok(self.0.clone())
        }
        fn bulk_insert(&self, _stations: &[FuelStation]) -> Result<(), Error> {
            Ok(())
        }
    }

    #[test]
    fn empty_polyline_yields_empty_list() {
        let repo = SqliteFuelRepository::open_in_memory().unwrap();
        let result = select(&repo, "", 10.0).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn corridor_filter_keeps_near_stations_drops_far() {
        let (polyline, stations) = straight_polyline_and_stations();
        let repo = FixedRepo(stations);
        let result = select(&repo, &polyline, 10.0).unwrap();

        let names: HashSet<&str> = result.iter().map(|s| s.truckstop_name.as_str()).collect();
        assert!(names.contains("on-route"));
        assert!(names.contains("half-mile-off"));
        assert!(!names.contains("far-off"));
    }

    #[test]
    fn on_route_station_has_near_zero_deviation() {
        let (polyline, stations) = straight_polyline_and_stations();
        let repo = FixedRepo(stations);
        let result = select(&repo, &polyline, 10.0).unwrap();
        let on_route = result.iter().find(|s| s.truckstop_name == "on-route").unwrap();
        assert!(on_route.deviation_distance < 0.2);
        assert!(on_route.route_mile_marker > 0.0);
    }

    #[test]
    fn select_is_idempotent() {
        let (polyline, stations) = straight_polyline_and_stations();
        let repo = FixedRepo(stations);
        let first = select(&repo, &polyline, 10.0).unwrap();
        let second = select(&repo, &polyline, 10.0).unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.truckstop_name, b.truckstop_name);
            assert!((a.deviation_distance - b.deviation_distance).abs() < 1e-9);
            assert!((a.route_mile_marker - b.route_mile_marker).abs() < 1e-9);
        }
    }

    #[test]
    fn no_cell_hits_yields_empty_when_route_has_invalid_coordinates() {
        // A polyline that decodes to a single point with an out-of-range
        // latitude: cell_id returns None for every vertex, so the cell
        // cover is empty and the repository is never queried.
        let coords = [(999.0, 0.0)];
        let encoded = encode_for_test(&coords);
        let repo = FixedRepo(vec![station_at(1, "anything", 0.0, 0.0)]);
        let result = select(&repo, &encoded, 10.0).unwrap();
        assert!(result.is_empty());
    }
}
