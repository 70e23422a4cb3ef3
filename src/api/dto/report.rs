//! DTOs for the page-view report endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::Report;
use crate::domain::repositories::ReportQuery;
use crate::domain::table::{COLUMN_HEADINGS, RenderedRow};
use crate::error::AppError;

/// Report query parameters.
///
/// Every field is optional; missing ones fall back to the configured defaults.
///
/// - `start`, `end` - inclusive date range, `YYYY-MM-DD`
/// - `limit` - number of rows (1-1000)
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ReportParams {
    #[serde(default)]
    pub start: Option<NaiveDate>,

    #[serde(default)]
    pub end: Option<NaiveDate>,

    #[serde(default)]
    #[validate(range(min = 1, max = 1000, message = "Limit must be between 1 and 1000"))]
    pub limit: Option<u32>,
}

impl ReportParams {
    /// Merges the parameters over `defaults` into a validated query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the resulting range is reversed or
    /// the limit is out of range.
    pub fn resolve(&self, defaults: &ReportQuery) -> Result<ReportQuery, AppError> {
        self.validate()?;

        ReportQuery::new(
            self.start.unwrap_or(defaults.start_date),
            self.end.unwrap_or(defaults.end_date),
            self.limit.unwrap_or(defaults.max_results),
        )
    }
}

/// Date range and limit the report was built for.
#[derive(Debug, Serialize)]
pub struct QueryInfo {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_results: u32,
}

/// Report serialized for API clients.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub query: QueryInfo,
    /// Report timestamp in Thai format, e.g. `31 ธ.ค. 2564 เวลา 09:05`.
    pub generated_at: String,
    /// Report-local day used for the `is_today` flags, `YYYY-MM-DD`.
    pub today: NaiveDate,
    pub columns: Vec<&'static str>,
    pub rows: Vec<RenderedRow>,
    pub total_pageviews: u64,
    /// True when the query matched no rows.
    pub empty: bool,
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        let empty = report.table.is_empty();

        Self {
            query: QueryInfo {
                start_date: report.query.start_date,
                end_date: report.query.end_date,
                max_results: report.query.max_results,
            },
            generated_at: report.generated_at,
            today: report.today.date(),
            columns: COLUMN_HEADINGS.to_vec(),
            rows: report.table.rows,
            total_pageviews: report.table.total_pageviews,
            empty,
        }
    }
}
