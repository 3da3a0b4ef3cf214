//! Case simulator web server entry point.

use std::sync::{Arc, Mutex};

use casesim_case::application::library::CaseLibrary;
use casesim_core::clock::{Clock, SystemClock};
use casesim_core::rng::{DeterministicRng, StdRngSource};
use casesim_web::config::ServerConfig;
use casesim_web::error::AppError;
use casesim_web::routes;
use casesim_web::state::AppState;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting case simulator web server");

    let config = ServerConfig::from_env()?;

    // Build application state.
    let library = CaseLibrary::new(config.cases_dir.clone());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let rng: Arc<Mutex<dyn DeterministicRng>> = Arc::new(Mutex::new(
        StdRngSource::from_seed_option(config.settings.seed),
    ));
    let app_state = AppState::new(library, config.settings, clock, rng);

    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    tracing::info!(
        cases_dir = %config.cases_dir.display(),
        "Listening on {}",
        config.addr
    );

    let listener = tokio::net::TcpListener::bind(config.addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
