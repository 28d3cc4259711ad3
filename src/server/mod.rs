pub mod cors;
pub mod handlers;

use actix_web::{web, App, HttpServer};

pub use handlers::AppState;

/// Starts the HTTP surface: a single `POST /plan-trip` route behind the
/// teacher's CORS middleware, one `AppState` shared across workers.
pub async fn start_server(
    state: web::Data<AppState>,
    host: &str,
    port: u16,
) -> std::io::Result<()> {
    let addr = format!("{host}:{port}");
    log::info!("starting server on {addr}");

    HttpServer::new(move || {
        App::new()
            .wrap(cors::cors_middleware())
            .app_data(state.clone())
            .service(handlers::plan_trip)
    })
    .bind(&addr)?
    .run()
    .await
}
