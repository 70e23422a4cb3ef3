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
/// # Components Checked
///
/// 1. **Repository**: page-view store reachable
/// 2. **Cache**: row cache reachable (always ok when caching is disabled)
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (repository_ok, cache_ok) = tokio::join!(
        state.report_service.repository_healthy(),
        state.report_service.cache_healthy()
    );

    let repository = CheckStatus::from_probe(
        repository_ok,
        "Page-view store reachable",
        "Page-view store unreachable",
    );
    let cache = CheckStatus::from_probe(cache_ok, "Cache reachable", "Cache connection failed");

    let all_healthy = repository.is_ok() && cache.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { repository, cache },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
