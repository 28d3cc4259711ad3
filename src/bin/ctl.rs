use clap::Parser;

use fuelroute_service::domain::Route;
use fuelroute_service::engine::EngineConfig;
use fuelroute_service::repository::SqliteFuelRepository;
use fuelroute_service::routing::StaticRoutingService;
use fuelroute_service::trip_planning::{PlanTripUseCase, TripRequest};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    db_path: String,

    #[arg(long)]
    start_location: String,

    #[arg(long)]
    end_location: String,

    #[arg(long)]
    polyline: String,

    #[arg(long)]
    route_distance_miles: f64,

    #[arg(long, default_value_t = 480.0)]
    route_duration_minutes: f64,

    #[arg(long, default_value_t = 500.0)]
    vehicle_range: f64,

    #[arg(long, default_value_t = 10.0)]
    mpg: f64,
}

fn main() {
    let args = Args::parse();

    println!("Opening catalogue at path: {}", args.db_path);
    let repository = SqliteFuelRepository::open(&args.db_path).unwrap();

    println!(
        "Registering demo route {} -> {}",
        args.start_location, args.end_location
    );
    let routing = StaticRoutingService::new(Route {
        start_location: args.start_location.clone(),
        end_location: args.end_location.clone(),
        total_distance_miles: args.route_distance_miles,
        total_duration_minutes: args.route_duration_minutes,
        polyline: args.polyline,
    });

    let engine_config = EngineConfig {
        vehicle_range: args.vehicle_range,
        mpg: args.mpg,
        ..EngineConfig::default()
    };

    println!("Planning trip");
    let use_case = PlanTripUseCase::new(&routing, &repository, engine_config);
    let request = TripRequest {
        start_location: args.start_location,
        end_location: args.end_location,
    };

    match use_case.execute(&request) {
        Ok(response) => {
            println!(
                "Planned {} stops, total cost {:.2}, total gallons {:.2}",
                response.stops.len(),
                response.fuel_summary.total_cost,
                response.fuel_summary.total_gallons
            );
            for stop in &response.stops {
                println!(
                    "  mile {:.1}: {} ({}, {}) - {:.2} gal @ {:.2}/gal = {:.2}, score {:.1}",
                    stop.mile_marker,
                    stop.truckstop_name,
                    stop.city,
                    stop.state,
                    stop.gallons_filled,
                    stop.price_per_gallon,
                    stop.cost,
                    stop.score
                );
            }
        }
        Err(e) => {
            eprintln!("trip planning failed: {e}");
            std::process::exit(1);
        }
    }
}
