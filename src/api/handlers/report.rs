//! Handler for the JSON page-view report.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::report::{ReportParams, ReportResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Builds the ranked page-view report.
///
/// # Endpoint
///
/// `GET /api/report`
///
/// # Query Parameters
///
/// - `start` (optional): First day of the range, `YYYY-MM-DD`
/// - `end` (optional): Last day of the range, `YYYY-MM-DD`
/// - `limit` (optional): Number of rows, 1-1000
///
/// Missing parameters fall back to the configured defaults.
///
/// # Response
///
/// ```json
/// {
///   "query": { "start_date": "2020-12-01", "end_date": "2021-12-31", "max_results": 25 },
///   "generated_at": "31 ธ.ค. 2564 เวลา 09:05",
///   "today": "2021-12-31",
///   "columns": ["No.", "Title", "Link", "วันที่ผลิตข่าว", "Pageview"],
///   "rows": [
///     {
///       "index": 1,
///       "cells": [{ "text": "1", "alignment": "left", "emphasis": false }, "..."],
///       "is_today": true
///     }
///   ],
///   "total_pageviews": 150,
///   "empty": false
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request for an invalid range or limit
/// - 500 Internal Server Error when the data source fails or returns invalid dates
pub async fn report_handler(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<ReportResponse>, AppError> {
    let query = params.resolve(&state.default_query)?;

    let report = state.report_service.build_report(query, state.now()).await?;

    Ok(Json(report.into()))
}
