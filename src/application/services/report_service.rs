//! Page-view report service.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use metrics::counter;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::domain::calendar::{CalendarDate, to_thai_date};
use crate::domain::entities::ReportRow;
use crate::domain::repositories::{PageviewRepository, ReportQuery};
use crate::domain::table::{self, TableModel};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

const DEFAULT_RETRY_ATTEMPTS: usize = 3;

/// A built report, ready for any renderer.
#[derive(Debug, Clone)]
pub struct Report {
    pub query: ReportQuery,
    /// Report-local date and time the report was built for.
    pub today: CalendarDate,
    /// `today` in Thai format with time, e.g. `31 ธ.ค. 2564 เวลา 09:05`.
    pub generated_at: String,
    pub table: TableModel,
}

/// Service that fetches ranked page-view rows and shapes them into a report.
///
/// Rows come from the cache when present, otherwise from the repository with
/// retries on transient failures. The table itself is always rebuilt because
/// the "today" highlight depends on the request time.
pub struct ReportService<R: PageviewRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    cache_ttl_seconds: Option<u64>,
    retry_attempts: usize,
}

impl<R: PageviewRepository + ?Sized> ReportService<R> {
    /// Creates a new report service.
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            repository,
            cache,
            cache_ttl_seconds: None,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
        }
    }

    /// Overrides the cache backend's default TTL for stored rows.
    pub fn with_cache_ttl(mut self, ttl_seconds: u64) -> Self {
        self.cache_ttl_seconds = Some(ttl_seconds);
        self
    }

    /// Sets how many times a failed fetch is retried (0 disables retries).
    pub fn with_retry_attempts(mut self, attempts: usize) -> Self {
        self.retry_attempts = attempts;
        self
    }

    /// Fetches rows for `query`, consulting the cache first.
    ///
    /// # Errors
    ///
    /// Returns the repository error once retries are exhausted, or immediately
    /// for non-retryable errors.
    pub async fn fetch_rows(&self, query: &ReportQuery) -> Result<Vec<ReportRow>, AppError> {
        let key = query.cache_key();

        match self.cache.get_rows(&key).await {
            Ok(Some(rows)) => {
                counter!("report_cache_hits_total").increment(1);
                return Ok(rows);
            }
            Ok(None) => counter!("report_cache_misses_total").increment(1),
            Err(e) => warn!(error = %e, key, "Cache lookup failed"),
        }

        let strategy = ExponentialBackoff::from_millis(2)
            .factor(25)
            .max_delay(Duration::from_secs(1))
            .map(jitter)
            .take(self.retry_attempts);

        let rows = RetryIf::spawn(
            strategy,
            || self.repository.top_pages(query),
            |e: &AppError| {
                let retry = e.is_retryable();
                if retry {
                    warn!(error = %e, "Page-view fetch failed, retrying");
                }
                retry
            },
        )
        .await?;

        debug!(rows = rows.len(), key, "Fetched page-view rows");

        if let Err(e) = self
            .cache
            .set_rows(&key, &rows, self.cache_ttl_seconds)
            .await
        {
            warn!(error = %e, key, "Failed to cache page-view rows");
        }

        Ok(rows)
    }

    /// Builds the report for `query` as seen at instant `now`.
    ///
    /// `now` is converted to the report timezone and used both for the
    /// "today" highlight and the report timestamp.
    ///
    /// # Errors
    ///
    /// Returns fetch errors from [`ReportService::fetch_rows`] and
    /// [`AppError::InvalidData`] when a row date cannot be formatted.
    pub async fn build_report(
        &self,
        query: ReportQuery,
        now: DateTime<Utc>,
    ) -> Result<Report, AppError> {
        let rows = self.fetch_rows(&query).await?;

        let today = CalendarDate::from_instant(&now);
        let table = table::build(rows, &today)?;
        let generated_at = to_thai_date(&today, true)?;

        counter!("reports_built_total").increment(1);
        info!(
            rows = table.len(),
            total_pageviews = table.total_pageviews,
            start = %query.start_date,
            end = %query.end_date,
            "Report built"
        );

        Ok(Report {
            query,
            today,
            generated_at,
            table,
        })
    }

    /// Checks if the repository backend is reachable.
    pub async fn repository_healthy(&self) -> bool {
        self.repository.health_check().await
    }

    /// Checks if the cache backend is reachable.
    pub async fn cache_healthy(&self) -> bool {
        self.cache.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockPageviewRepository;
    use crate::infrastructure::cache::{CacheResult, NullCache};
    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryCache {
        entries: Mutex<HashMap<String, Vec<ReportRow>>>,
    }

    #[async_trait]
    impl CacheService for MemoryCache {
        async fn get_rows(&self, key: &str) -> CacheResult<Option<Vec<ReportRow>>> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set_rows(
            &self,
            key: &str,
            rows: &[ReportRow],
            _ttl_seconds: Option<u64>,
        ) -> CacheResult<()> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), rows.to_vec());
            Ok(())
        }

        async fn health_check(&self) -> bool {
            true
        }
    }

    fn query() -> ReportQuery {
        ReportQuery::new(
            NaiveDate::from_ymd_opt(2020, 12, 1).unwrap(),
            NaiveDate::from_ymd_opt(2021, 12, 31).unwrap(),
            25,
        )
        .unwrap()
    }

    fn sample_rows() -> Vec<ReportRow> {
        vec![
            ReportRow::new("A", "/a", CalendarDate::from_ymd(2021, 12, 31).unwrap(), 100),
            ReportRow::new("B", "/b", CalendarDate::from_ymd(2021, 1, 1).unwrap(), 50),
        ]
    }

    /// 2021-12-31 09:05 in Bangkok.
    fn bangkok_morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 12, 31, 2, 5, 0).unwrap()
    }

    #[tokio::test]
    async fn test_build_report_success() {
        let mut mock_repo = MockPageviewRepository::new();
        mock_repo
            .expect_top_pages()
            .withf(|q| q.max_results == 25)
            .times(1)
            .returning(|_| Ok(sample_rows()));

        let service = ReportService::new(Arc::new(mock_repo), Arc::new(NullCache::new()));

        let report = service.build_report(query(), bangkok_morning()).await.unwrap();

        assert_eq!(report.table.total_pageviews, 150);
        assert!(report.table.rows[0].is_today);
        assert!(!report.table.rows[1].is_today);
        assert_eq!(report.generated_at, "31 ธ.ค. 2564 เวลา 09:05");
        assert_eq!(report.today.date(), NaiveDate::from_ymd_opt(2021, 12, 31).unwrap());
    }

    #[tokio::test]
    async fn test_today_follows_bangkok_not_utc() {
        let mut mock_repo = MockPageviewRepository::new();
        mock_repo
            .expect_top_pages()
            .times(1)
            .returning(|_| Ok(sample_rows()));

        let service = ReportService::new(Arc::new(mock_repo), Arc::new(NullCache::new()));

        // 2021-12-31 18:00 UTC is already 2022-01-01 in Bangkok.
        let now = Utc.with_ymd_and_hms(2021, 12, 31, 18, 0, 0).unwrap();
        let report = service.build_report(query(), now).await.unwrap();

        assert!(report.table.rows.iter().all(|r| !r.is_today));
        assert_eq!(report.generated_at, "1 ม.ค. 2565 เวลา 01:00");
    }

    #[tokio::test]
    async fn test_empty_result_is_not_an_error() {
        let mut mock_repo = MockPageviewRepository::new();
        mock_repo
            .expect_top_pages()
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = ReportService::new(Arc::new(mock_repo), Arc::new(NullCache::new()));

        let report = service.build_report(query(), bangkok_morning()).await.unwrap();

        assert!(report.table.is_empty());
        assert_eq!(report.table.total_pageviews, 0);
    }

    #[tokio::test]
    async fn test_retries_internal_errors() {
        let mut mock_repo = MockPageviewRepository::new();
        let mut seq = mockall::Sequence::new();
        mock_repo
            .expect_top_pages()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));
        mock_repo
            .expect_top_pages()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(sample_rows()));

        let service = ReportService::new(Arc::new(mock_repo), Arc::new(NullCache::new()))
            .with_retry_attempts(2);

        let rows = service.fetch_rows(&query()).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_retries() {
        let mut mock_repo = MockPageviewRepository::new();
        mock_repo
            .expect_top_pages()
            .times(2)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = ReportService::new(Arc::new(mock_repo), Arc::new(NullCache::new()))
            .with_retry_attempts(1);

        let result = service.build_report(query(), bangkok_morning()).await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_invalid_data_is_not_retried() {
        let mut mock_repo = MockPageviewRepository::new();
        mock_repo
            .expect_top_pages()
            .times(1)
            .returning(|_| Err(AppError::invalid_data("Negative page-view count", json!({}))));

        let service = ReportService::new(Arc::new(mock_repo), Arc::new(NullCache::new()));

        let result = service.fetch_rows(&query()).await;
        assert!(matches!(result, Err(AppError::InvalidData { .. })));
    }

    #[tokio::test]
    async fn test_cache_hit_skips_repository() {
        let mut mock_repo = MockPageviewRepository::new();
        mock_repo
            .expect_top_pages()
            .times(1)
            .returning(|_| Ok(sample_rows()));

        let service = ReportService::new(Arc::new(mock_repo), Arc::new(MemoryCache::default()));

        let first = service.build_report(query(), bangkok_morning()).await.unwrap();
        let second = service.build_report(query(), bangkok_morning()).await.unwrap();

        assert_eq!(first.table, second.table);
    }

    #[tokio::test]
    async fn test_cached_rows_rebuilt_for_new_day() {
        let mut mock_repo = MockPageviewRepository::new();
        mock_repo
            .expect_top_pages()
            .times(1)
            .returning(|_| Ok(sample_rows()));

        let service = ReportService::new(Arc::new(mock_repo), Arc::new(MemoryCache::default()));

        let today = service.build_report(query(), bangkok_morning()).await.unwrap();
        let tomorrow = service
            .build_report(query(), bangkok_morning() + chrono::TimeDelta::days(1))
            .await
            .unwrap();

        assert!(today.table.rows[0].is_today);
        assert!(!tomorrow.table.rows[0].is_today);
        assert_eq!(today.table.total_pageviews, tomorrow.table.total_pageviews);
    }
}
