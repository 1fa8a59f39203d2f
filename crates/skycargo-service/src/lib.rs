//! HTTP service for the Sky Cargo route optimizer.
//!
//! The service follows a thin-handler pattern where all route logic resides
//! in `skycargo-lib`. This crate provides only HTTP glue:
//!
//! - [`AppState`]: registry and the shared weather provider
//! - [`health`]: liveness and readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details for error responses
//! - [`ServiceResponse`]: wrapper for successful responses
//! - [`logging`]: JSON or text structured logging setup
//! - [`router`]: the axum router serving `/api/v1/*`

#![deny(warnings)]

pub mod health;
pub mod logging;
mod problem;
mod request;
mod response;
mod routes;
mod state;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_ROUTE_NOT_FOUND, PROBLEM_UNKNOWN_AIRPORT,
};
pub use request::{RouteAlgorithm, RouteRequest, Validate};
pub use response::ServiceResponse;
pub use routes::{router, AirportsResponse};
pub use state::{AppState, AppStateError};
