//! Report row entity: one analytics record for a single page on a single date.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::calendar::CalendarDate;

/// A page-view record as returned by the analytics data source.
///
/// Rows arrive pre-sorted by descending `pageviews`; nothing downstream
/// re-orders them. The date is serialized as `YYYY-MM-DD` (or
/// `YYYY-MM-DD HH:MM:SS` when it carries a time) so rows can be cached and
/// loaded from JSON fixtures.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub title: String,
    pub path: String,
    #[serde_as(as = "DisplayFromStr")]
    pub date: CalendarDate,
    pub pageviews: u64,
}

impl ReportRow {
    /// Creates a new ReportRow instance.
    pub fn new(
        title: impl Into<String>,
        path: impl Into<String>,
        date: CalendarDate,
        pageviews: u64,
    ) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            date,
            pageviews,
        }
    }
}
