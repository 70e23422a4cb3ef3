//! Report page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};

use crate::api::dto::report::ReportParams;
use crate::application::services::Report;
use crate::domain::table::COLUMN_HEADINGS;
use crate::error::AppError;
use crate::state::AppState;

/// Template for the ranked page-view report.
///
/// Renders `templates/report.html`:
/// - "Top N" heading with the Thai report timestamp
/// - One table row per report row, today's rows with the `hilight` class
/// - Total page-view row, or "No Results Found." for an empty report
#[derive(Template, WebTemplate)]
#[template(path = "report.html")]
pub struct ReportTemplate {
    pub report: Report,
    pub columns: &'static [&'static str],
}

impl ReportTemplate {
    pub fn new(report: Report) -> Self {
        Self {
            report,
            columns: &COLUMN_HEADINGS,
        }
    }
}

/// Renders the report page.
///
/// # Endpoint
///
/// `GET /report?start=YYYY-MM-DD&end=YYYY-MM-DD&limit=N`
///
/// # Errors
///
/// Same as [`crate::api::handlers::report_handler`]; errors are returned as JSON.
pub async fn report_page_handler(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<ReportTemplate, AppError> {
    let query = params.resolve(&state.default_query)?;

    let report = state.report_service.build_report(query, state.now()).await?;

    Ok(ReportTemplate::new(report))
}
