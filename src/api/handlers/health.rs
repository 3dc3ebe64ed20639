//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// A failing cache only degrades latency; favorites keep being served from
/// the store, but the endpoint still reports `degraded` so it can be alerted on.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Store reachable" },
///     "cache": { "status": "ok", "message": "Cache reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (store, cache_ok) = state.favorite_service.health().await;

    let database = match store {
        Ok(()) => CheckStatus::ok("Store reachable"),
        Err(e) => CheckStatus::error(format!("Store error: {}", e)),
    };

    let cache = if cache_ok {
        CheckStatus::ok("Cache reachable")
    } else {
        CheckStatus::error("Cache unavailable, serving from store")
    };

    let all_healthy = database.is_ok() && cache.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database, cache },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
