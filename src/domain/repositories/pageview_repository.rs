//! Repository trait for page-view analytics retrieval.

use crate::domain::entities::ReportRow;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;

/// Largest result limit a single report may request.
pub const MAX_RESULTS_LIMIT: u32 = 1000;

/// Parameters of a ranked page-view query.
///
/// Dates are calendar days in the report timezone; both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_results: u32,
}

impl ReportQuery {
    /// Creates a validated query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `start_date` is after `end_date` or
    /// `max_results` is outside `1..=1000`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, max_results: u32) -> Result<Self, AppError> {
        if start_date > end_date {
            return Err(AppError::bad_request(
                "Start date must not be after end date",
                json!({ "start": start_date, "end": end_date }),
            ));
        }

        if !(1..=MAX_RESULTS_LIMIT).contains(&max_results) {
            return Err(AppError::bad_request(
                "Result limit must be between 1 and 1000",
                json!({ "limit": max_results }),
            ));
        }

        Ok(Self {
            start_date,
            end_date,
            max_results,
        })
    }

    /// Key under which fetched rows for this query are cached.
    pub fn cache_key(&self) -> String {
        format!(
            "report:{}:{}:{}",
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d"),
            self.max_results
        )
    }

    /// Returns true if `date` falls inside the inclusive range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Source of ranked page-view rows.
///
/// Implementations group by (title, path, date), sum page views, and return
/// at most `max_results` rows sorted by descending page views.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPageviewRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryPageviewRepository`] - fixtures and tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageviewRepository: Send + Sync {
    /// Fetches the top pages for the query's date range.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors (retryable) and
    /// [`AppError::InvalidData`] when stored values cannot become report rows
    /// (not retried).
    async fn top_pages(&self, query: &ReportQuery) -> Result<Vec<ReportRow>, AppError>;

    /// Checks if the backing store is reachable.
    async fn health_check(&self) -> bool;
}
