//! API route configuration.

use crate::api::handlers::report_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// API routes.
///
/// # Endpoints
///
/// - `GET /report` - Ranked page-view report as JSON
pub fn routes() -> Router<AppState> {
    Router::new().route("/report", get(report_handler))
}
