//! In-memory page-view repository backed by a fixed row set.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::calendar::CalendarDate;
use crate::domain::entities::ReportRow;
use crate::domain::repositories::{PageviewRepository, ReportQuery};
use crate::error::AppError;

/// Repository serving rows held in memory.
///
/// Applies the same semantics as the PostgreSQL implementation: rows are
/// filtered by date range, summed per (title, path, day), sorted by
/// descending page views and truncated to the query limit.
///
/// # Use Cases
///
/// - `report --fixture rows.json` without a database
/// - Integration tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryPageviewRepository {
    rows: Vec<ReportRow>,
}

impl InMemoryPageviewRepository {
    pub fn new(rows: Vec<ReportRow>) -> Self {
        Self { rows }
    }

    /// Loads rows from a JSON array of `{title, path, date, pageviews}` objects.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a row (including its
    /// date) fails to deserialize.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture file {}", path.display()))?;
        let rows: Vec<ReportRow> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse fixture file {}", path.display()))?;

        tracing::debug!(rows = rows.len(), file = %path.display(), "Loaded page-view fixture");
        Ok(Self::new(rows))
    }
}

#[async_trait]
impl PageviewRepository for InMemoryPageviewRepository {
    async fn top_pages(&self, query: &ReportQuery) -> Result<Vec<ReportRow>, AppError> {
        let mut totals: BTreeMap<(&str, &str, NaiveDate), u64> = BTreeMap::new();

        for row in self.rows.iter().filter(|r| query.contains(r.date.date())) {
            *totals
                .entry((row.title.as_str(), row.path.as_str(), row.date.date()))
                .or_default() += row.pageviews;
        }

        let mut ranked: Vec<ReportRow> = totals
            .into_iter()
            .map(|((title, path, day), pageviews)| {
                ReportRow::new(title, path, CalendarDate::from_naive_date(day), pageviews)
            })
            .collect();

        // Stable sort keeps the BTreeMap's (title, path, day) order among ties.
        ranked.sort_by(|a, b| b.pageviews.cmp(&a.pageviews));
        ranked.truncate(query.max_results as usize);

        Ok(ranked)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
