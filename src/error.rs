use thiserror::Error;

/// Errors that can surface at the request boundary.
///
/// `InfeasibleTrip` is deliberately absent here: an infeasible trip is not
/// an error, it's a normal result (the sentinel response in `trip_planning`).
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Error(String),

    #[error("no route found between the given locations")]
    RouteUnavailable,

    #[error("start_location and end_location must be non-empty")]
    MalformedInput(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}
