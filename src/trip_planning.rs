//! The `PlanTripUseCase` orchestrator: wires the `RoutingService` and
//! `FuelRepository` collaborators through the Corridor Selector and
//! Optimisation Engine and assembles the wire response.

use serde::{Deserialize, Serialize};

use crate::corridor;
use crate::engine::{EngineConfig, OptimizationEngine};
use crate::error::Error;
use crate::repository::FuelRepository;
use crate::routing::RoutingService;

/// Corridor Selector buffer radius, miles. Not exposed as config: the
/// engine's own config table is the only tunable surface this service
/// exposes.
const CORRIDOR_BUFFER_MILES: f64 = 10.0;

#[derive(Debug, Deserialize)]
pub struct TripRequest {
    pub start_location: String,
    pub end_location: String,
}

#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub distance_miles: f64,
    pub duration_minutes: f64,
    pub polyline: String,
}

#[derive(Debug, Serialize)]
pub struct FuelSummary {
    pub total_cost: f64,
    pub total_gallons: f64,
    pub total_stops: i64,
}

#[derive(Debug, Serialize)]
pub struct StopView {
    pub truckstop_name: String,
    pub city: String,
    pub state: String,
    pub price_per_gallon: f64,
    pub gallons_filled: f64,
    pub cost: f64,
    pub mile_marker: f64,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct ProgressionPoint {
    pub mile: i64,
    pub total_spent: f64,
}

#[derive(Debug, Serialize)]
pub struct TripPlanResponse {
    pub route: RouteSummary,
    pub fuel_summary: FuelSummary,
    pub stops: Vec<StopView>,
    pub per_mile_progression: Vec<ProgressionPoint>,
}

pub struct PlanTripUseCase<'a> {
    routing: &'a dyn RoutingService,
    repository: &'a dyn FuelRepository,
    engine: OptimizationEngine,
}

impl<'a> PlanTripUseCase<'a> {
    pub fn new(
        routing: &'a dyn RoutingService,
        repository: &'a dyn FuelRepository,
        config: EngineConfig,
    ) -> Self {
        PlanTripUseCase {
            routing,
            repository,
            engine: OptimizationEngine::new(config),
        }
    }

    pub fn execute(&self, request: &TripRequest) -> Result<TripPlanResponse, Error> {
        if request.start_location.trim().is_empty() || request.end_location.trim().is_empty() {
            return Err(Error::MalformedInput(
                "start_location and end_location must be non-empty".to_string(),
            ));
        }

        let route = self
            .routing
            .get_route(&request.start_location, &request.end_location)?
            .ok_or(Error::RouteUnavailable)?;

        let candidates = corridor::select(self.repository, &route.polyline, CORRIDOR_BUFFER_MILES)?;
        let plan = self
            .engine
            .plan_trip(route.total_distance_miles, &candidates);

        let stops = plan
            .stops
            .into_iter()
            .map(|decision| StopView {
                truckstop_name: decision.station.truckstop_name,
                city: decision.station.city,
                state: decision.station.state,
                price_per_gallon: decision.price_per_gallon,
                gallons_filled: decision.gallons_filled,
                cost: decision.cost,
                mile_marker: decision.mile_marker,
                score: decision.score,
            })
            .collect::<Vec<_>>();

        let per_mile_progression = plan
            .tracker
            .into_iter()
            .map(|entry| ProgressionPoint {
                mile: entry.mile,
                total_spent: entry.total_spent,
            })
            .collect();

        Ok(TripPlanResponse {
            route: RouteSummary {
                distance_miles: route.total_distance_miles,
                duration_minutes: route.total_duration_minutes,
                polyline: route.polyline,
            },
            fuel_summary: FuelSummary {
                total_cost: plan.total_cost,
                total_gallons: plan.total_gallons,
                total_stops: stops.len() as i64,
            },
            stops,
            per_mile_progression,
        })
    }
}
