//! The external routing collaborator: resolves a start/end location pair to
//! a driveable route with an encoded polyline. The real provider is out of
//! scope; this module only defines the seam and a static double useful for
//! local runs and tests.

use crate::domain::Route;
use crate::error::Error;

/// Boundary the trip-planning use case depends on, never a concrete
/// mapping provider, so the provider can be swapped without touching the
/// core.
pub trait RoutingService {
    fn get_route(&self, start: &str, end: &str) -> Result<Option<Route>, Error>;
}

/// A fixed single-route double, useful for `ctl` and integration tests
/// where standing up a real mapping provider isn't the point.
pub struct StaticRoutingService {
    route: Route,
}

impl StaticRoutingService {
    pub fn new(route: Route) -> Self {
        StaticRoutingService { route }
    }
}

impl RoutingService for StaticRoutingService {
    fn get_route(&self, start: &str, end: &str) -> Result<Option<Route>, Error> {
        if start == self.route.start_location && end == self.route.end_location {
            Ok(Some(self.route.clone()))
        } else {
            Ok(None)
        }
    }
}
