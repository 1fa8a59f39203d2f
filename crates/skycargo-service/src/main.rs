//! Sky Cargo route planning HTTP service.
//!
//! # Endpoints
//!
//! - `POST /api/v1/route` - Plan a route between two airports
//! - `GET /api/v1/airports` - List the airports served
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! # Configuration
//!
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `SKYCARGO_WEATHER_URL`, `SKYCARGO_WEATHER_TIMEOUT_SECS`,
//!   `SKYCARGO_WEATHER_TTL_SECS` - live weather settings
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text

use std::env;
use std::net::SocketAddr;

use tracing::{error, info};

use skycargo_service::{init_logging, router, AppState, LoggingConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env();
    init_logging(&logging_config);

    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    // The weather client is blocking and must be built outside the runtime.
    let state = AppState::from_env().map_err(|e| {
        error!(error = %e, "failed to build application state");
        e
    })?;

    info!(
        service = %logging_config.service,
        airports = state.registry().len(),
        live_weather = state.live_weather_configured(),
        port = port,
        "starting route service"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(state, port))
}

async fn serve(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
