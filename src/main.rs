use actix_web::web;
use clap::Parser;

use fuelroute_service::domain::Route;
use fuelroute_service::engine::EngineConfig;
use fuelroute_service::repository::SqliteFuelRepository;
use fuelroute_service::routing::StaticRoutingService;
use fuelroute_service::server::{start_server, AppState};

/// Fuel-stop trip planning service
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to the station catalogue database
    #[clap(long, default_value = "fuel_stations.db")]
    db_path: String,

    /// Server host address
    #[clap(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[clap(long, default_value_t = 8080)]
    port: u16,

    /// Maximum drivable distance between consecutive stops, in miles
    #[clap(long, default_value_t = 500.0)]
    vehicle_range: f64,

    /// Vehicle fuel economy, miles per gallon
    #[clap(long, default_value_t = 10.0)]
    mpg: f64,

    /// Scoring coefficient on normalised price
    #[clap(long, default_value_t = 10.0)]
    price_weight: f64,

    /// Scoring coefficient on deviation distance
    #[clap(long, default_value_t = 2.0)]
    deviation_weight: f64,

    /// Reserved, unused (see EngineConfig::detour_penalty)
    #[clap(long, default_value_t = 5.0)]
    detour_penalty: f64,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let repository = SqliteFuelRepository::open(&args.db_path)
        .unwrap_or_else(|e| panic!("failed to open catalogue at {}: {e}", args.db_path));

    // The real mapping/geocoding provider is out of scope here; this demo
    // route stands in until one is wired up.
    let routing = StaticRoutingService::new(Route {
        start_location: "Topeka, KS".to_string(),
        end_location: "Denver, CO".to_string(),
        total_distance_miles: 500.0,
        total_duration_minutes: 480.0,
        polyline: "_p~iF~ps|U_ulLnnqC_mqNvxq`@".to_string(),
    });

    let engine_config = EngineConfig {
        vehicle_range: args.vehicle_range,
        mpg: args.mpg,
        price_weight: args.price_weight,
        deviation_weight: args.deviation_weight,
        detour_penalty: args.detour_penalty,
    };

    let state = web::Data::new(AppState {
        repository: Box::new(repository),
        routing: Box::new(routing),
        engine_config,
    });

    start_server(state, &args.host, args.port).await
}
