//! Repository trait definitions for the domain layer.
//!
//! Traits define the data-retrieval contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`PageviewRepository`] - Ranked page-view rows for a date range

pub mod pageview_repository;

pub use pageview_repository::{MAX_RESULTS_LIMIT, PageviewRepository, ReportQuery};

#[cfg(test)]
pub use pageview_repository::MockPageviewRepository;
