use serde::{Deserialize, Serialize};

/// A route returned by the external routing collaborator: a start/end pair,
/// the total driving distance and duration, and the encoded polyline
/// geometry the Corridor Selector decodes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Route {
    pub start_location: String,
    pub end_location: String,
    pub total_distance_miles: f64,
    pub total_duration_minutes: f64,
    pub polyline: String,
}
