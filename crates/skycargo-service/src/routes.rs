//! HTTP routes for the route planning API.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use skycargo_lib::{plan_route, Airport, RouteResult};

use crate::{
    from_lib_error, health_live, health_ready, AppState, ProblemDetails, RouteRequest,
    ServiceResponse, Validate,
};

/// Registry listing returned by `GET /api/v1/airports`.
#[derive(Debug, Serialize)]
pub struct AirportsResponse {
    pub count: usize,
    pub airports: Vec<Airport>,
}

/// Build the service router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/route", post(route_handler))
        .route("/api/v1/airports", get(airports_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Either a planned route or an RFC 9457 error.
enum RouteResponse {
    Success(ServiceResponse<RouteResult>),
    Error(ProblemDetails),
}

impl IntoResponse for RouteResponse {
    fn into_response(self) -> Response {
        match self {
            RouteResponse::Success(data) => (StatusCode::OK, data).into_response(),
            RouteResponse::Error(problem) => problem.into_response(),
        }
    }
}

/// Handle `POST /api/v1/route`.
async fn route_handler(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> RouteResponse {
    let request_id = generate_request_id();

    info!(
        request_id = %request_id,
        origin = %request.origin,
        destination = %request.destination,
        algorithm = ?request.algorithm,
        real_weather = request.use_real_weather,
        "handling route request"
    );

    if let Err(problem) = request.validate(&request_id) {
        warn!(request_id = %request_id, detail = ?problem.detail, "rejected route request");
        return RouteResponse::Error(*problem);
    }

    let lib_request = request.to_lib_request();
    let planner_state = state.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        plan_route(
            planner_state.registry(),
            planner_state.weather(),
            &lib_request,
        )
    })
    .await;

    match outcome {
        Ok(Ok(result)) => {
            info!(
                request_id = %request_id,
                route = %result.path.join(" -> "),
                distance_km = result.total_distance_km,
                "route computed successfully"
            );
            RouteResponse::Success(ServiceResponse::new(result))
        }
        Ok(Err(e)) => {
            warn!(request_id = %request_id, error = %e, "route planning failed");
            RouteResponse::Error(from_lib_error(&e, &request_id))
        }
        Err(join_error) => {
            error!(request_id = %request_id, error = %join_error, "route planner task failed");
            RouteResponse::Error(ProblemDetails::internal_error(
                "route planner task failed",
                request_id,
            ))
        }
    }
}

/// Handle `GET /api/v1/airports`.
async fn airports_handler(State(state): State<AppState>) -> ServiceResponse<AirportsResponse> {
    let airports: Vec<Airport> = state.registry().all().cloned().collect();
    ServiceResponse::new(AirportsResponse {
        count: airports.len(),
        airports,
    })
}

/// Unique request ID for tracing.
fn generate_request_id() -> String {
    static SEQUENCE: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);

    format!("req-{:x}-{:x}", timestamp, sequence)
}
