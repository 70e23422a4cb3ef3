//! PostgreSQL implementation of the page-view repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::calendar::CalendarDate;
use crate::domain::entities::ReportRow;
use crate::domain::repositories::{PageviewRepository, ReportQuery};
use crate::error::AppError;

/// PostgreSQL repository over the `page_views` table.
///
/// Each table row is a page-view count for one (title, path, date) recorded
/// by the collector; counts for the same key are summed at query time.
pub struct PgPageviewRepository {
    pool: Arc<PgPool>,
}

impl PgPageviewRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PageviewRepository for PgPageviewRepository {
    async fn top_pages(&self, query: &ReportQuery) -> Result<Vec<ReportRow>, AppError> {
        let rows: Vec<(String, String, NaiveDate, i64)> = sqlx::query_as(
            r#"
            SELECT title, path, view_date, SUM(pageviews)::BIGINT AS total_views
            FROM page_views
            WHERE view_date BETWEEN $1 AND $2
            GROUP BY title, path, view_date
            ORDER BY total_views DESC, title, path, view_date
            LIMIT $3
            "#,
        )
        .bind(query.start_date)
        .bind(query.end_date)
        .bind(i64::from(query.max_results))
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter()
            .map(|(title, path, view_date, total_views)| {
                let pageviews = u64::try_from(total_views).map_err(|_| {
                    AppError::invalid_data(
                        "Negative page-view count",
                        json!({ "path": path, "date": view_date, "pageviews": total_views }),
                    )
                })?;

                Ok(ReportRow::new(
                    title,
                    path,
                    CalendarDate::from_naive_date(view_date),
                    pageviews,
                ))
            })
            .collect()
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
