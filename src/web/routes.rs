//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::report_page_handler;
use axum::{Router, routing::get};

/// Public report pages.
///
/// # Endpoints
///
/// - `GET /` - Report page with the default query
/// - `GET /report` - Report page, accepts `start`, `end`, `limit`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(report_page_handler))
        .route("/report", get(report_page_handler))
}
