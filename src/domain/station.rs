use serde::{Deserialize, Serialize};

/// A fuel station from the catalogue, annotated with route-relative fields
/// once it has passed through the Corridor Selector.
///
/// `deviation_distance` and `route_mile_marker` are meaningless before
/// annotation; catalogue rows are constructed with both at `0.0` and filled
/// in by `corridor::select`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FuelStation {
    pub id: i64,
    pub truckstop_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub rack_id: i64,
    /// Currency units per gallon. Must be positive.
    pub retail_price: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Opaque hex-cell index string (H3, resolution 7).
    pub hex_cell: String,
    /// Great-circle miles from the station to the nearest route point.
    pub deviation_distance: f64,
    /// Cumulative route miles from the start to the nearest route point.
    pub route_mile_marker: f64,
}

impl FuelStation {
    /// Builds the synthetic `Start` node used by the Optimisation Engine.
    /// It carries no catalogue identity (`id = -1`) and its retail price is
    /// computed by the caller's starting-price rule.
    pub fn start_node(price: f64) -> Self {
        FuelStation {
            id: -1,
            truckstop_name: "Start".to_string(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            rack_id: 0,
            retail_price: price,
            latitude: 0.0,
            longitude: 0.0,
            hex_cell: String::new(),
            deviation_distance: 0.0,
            route_mile_marker: 0.0,
        }
    }

    /// Builds the synthetic `End` node at `route_distance` miles, price 0
    /// (no fuel is bought at the destination).
    pub fn end_node(route_distance: f64) -> Self {
        FuelStation {
            id: -2,
            truckstop_name: "End".to_string(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            rack_id: 0,
            retail_price: 0.0,
            latitude: 0.0,
            longitude: 0.0,
            hex_cell: String::new(),
            deviation_distance: 0.0,
            route_mile_marker: route_distance,
        }
    }
}

/// A chosen refuelling stop, as reconstructed from the optimiser's shortest
/// path. `score` is informative only: it never feeds back into routing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FuelStopDecision {
    pub station: FuelStation,
    pub mile_marker: f64,
    pub gallons_filled: f64,
    pub cost: f64,
    pub price_per_gallon: f64,
    /// In `[0, 10]`, strictly decreasing in price and deviation.
    pub score: f64,
}

/// One cumulative-spend snapshot at an integer mile along the route.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackerEntry {
    pub mile: i64,
    pub total_spent: f64,
}
