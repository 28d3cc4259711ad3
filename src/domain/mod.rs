pub mod route;
pub mod station;

pub use route::Route;
pub use station::{FuelStation, FuelStopDecision, TrackerEntry};
