#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use pageview_report::application::services::ReportService;
use pageview_report::domain::calendar::CalendarDate;
use pageview_report::domain::entities::ReportRow;
use pageview_report::domain::repositories::{PageviewRepository, ReportQuery};
use pageview_report::error::AppError;
use pageview_report::infrastructure::cache::NullCache;
use pageview_report::infrastructure::persistence::InMemoryPageviewRepository;
use pageview_report::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

/// Instant every test state is pinned to: 2021-12-31 09:05 in Bangkok.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 12, 31, 2, 5, 0).unwrap()
}

/// Report-local (Bangkok) day of [`now`].
pub fn today() -> NaiveDate {
    CalendarDate::from_instant(&now()).date()
}

pub fn days_ago(days: u64) -> NaiveDate {
    today() - Days::new(days)
}

/// Three rows inside the default range, the first one dated today.
pub fn sample_rows() -> Vec<ReportRow> {
    vec![
        ReportRow::new(
            "Breaking news",
            "/news/1",
            CalendarDate::from_naive_date(today()),
            100,
        ),
        ReportRow::new(
            "Weekly digest",
            "/news/2",
            CalendarDate::from_naive_date(days_ago(3)),
            50,
        ),
        ReportRow::new(
            "Archive <special>",
            "/news/3",
            CalendarDate::from_naive_date(days_ago(10)),
            20,
        ),
    ]
}

/// Last 30 days up to today, top 25.
pub fn default_query() -> ReportQuery {
    ReportQuery::new(days_ago(30), today(), 25).unwrap()
}

pub fn create_state_with(repository: Arc<dyn PageviewRepository>) -> AppState {
    let service = ReportService::new(repository, Arc::new(NullCache::new())).with_retry_attempts(0);
    AppState::new(Arc::new(service), default_query()).with_clock(now)
}

pub fn create_test_state(rows: Vec<ReportRow>) -> AppState {
    create_state_with(Arc::new(InMemoryPageviewRepository::new(rows)))
}

/// Repository whose backend is down.
pub struct FailingRepository;

#[async_trait]
impl PageviewRepository for FailingRepository {
    async fn top_pages(&self, _query: &ReportQuery) -> Result<Vec<ReportRow>, AppError> {
        Err(AppError::internal("Database error", serde_json::json!({})))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

pub async fn insert_page_view(
    pool: &PgPool,
    title: &str,
    path: &str,
    view_date: NaiveDate,
    pageviews: i64,
) {
    sqlx::query(
        "INSERT INTO page_views (title, path, view_date, pageviews) VALUES ($1, $2, $3, $4)",
    )
    .bind(title)
    .bind(path)
    .bind(view_date)
    .bind(pageviews)
    .execute(pool)
    .await
    .unwrap();
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
