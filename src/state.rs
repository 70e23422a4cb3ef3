//! Shared application state injected into handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::services::ReportService;
use crate::domain::repositories::{PageviewRepository, ReportQuery};

/// Report service backed by any repository implementation.
pub type DynReportService = ReportService<dyn PageviewRepository>;

/// Source of the instant a report is built for.
pub type Clock = fn() -> DateTime<Utc>;

#[derive(Clone)]
pub struct AppState {
    pub report_service: Arc<DynReportService>,
    /// Query used when a request does not specify range or limit.
    pub default_query: ReportQuery,
    /// Defaults to [`Utc::now`].
    pub clock: Clock,
}

impl AppState {
    pub fn new(report_service: Arc<DynReportService>, default_query: ReportQuery) -> Self {
        Self {
            report_service,
            default_query,
            clock: Utc::now,
        }
    }

    /// Replaces the wall clock, e.g. to pin "today" in tests.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}
