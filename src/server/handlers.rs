use actix_web::{post, web, HttpResponse};
use serde::Serialize;

use crate::engine::EngineConfig;
use crate::error::Error;
use crate::repository::FuelRepository;
use crate::routing::RoutingService;
use crate::trip_planning::{PlanTripUseCase, TripRequest};

/// Shared per-worker state: the catalogue connection and routing
/// collaborator, plus the engine configuration every request plans with.
pub struct AppState {
    pub repository: Box<dyn FuelRepository + Send + Sync>,
    pub routing: Box<dyn RoutingService + Send + Sync>,
    pub engine_config: EngineConfig,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(err: Error) -> HttpResponse {
    match err {
        Error::MalformedInput(message) => HttpResponse::BadRequest().json(ErrorBody { error: message }),
        Error::RouteUnavailable => {
            HttpResponse::BadGateway().json(ErrorBody { error: err.to_string() })
        }
        Error::Sqlite(_) => HttpResponse::BadGateway().json(ErrorBody { error: err.to_string() }),
        Error::Serde(_) | Error::Error(_) => {
            HttpResponse::InternalServerError().json(ErrorBody { error: err.to_string() })
        }
    }
}

#[post("/plan-trip")]
pub async fn plan_trip(
    state: web::Data<AppState>,
    body: web::Json<TripRequest>,
) -> HttpResponse {
    let request = body.into_inner();
    let result = web::block(move || {
        let use_case = PlanTripUseCase::new(
            state.routing.as_ref(),
            state.repository.as_ref(),
            state.engine_config.clone(),
        );
        use_case.execute(&request)
    })
    .await;

    match result {
        Ok(Ok(response)) => HttpResponse::Ok().json(response),
        Ok(Err(err)) => error_response(err),
        Err(_) => HttpResponse::InternalServerError().json(ErrorBody {
            error: "internal worker failure".to_string(),
        }),
    }
}
