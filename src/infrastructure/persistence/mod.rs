//! Page-view repository implementations.
//!
//! # Repositories
//!
//! - [`PgPageviewRepository`] - PostgreSQL `page_views` table
//! - [`InMemoryPageviewRepository`] - fixed row set (fixtures, tests)

pub mod in_memory_pageview_repository;
pub mod pg_pageview_repository;

pub use in_memory_pageview_repository::InMemoryPageviewRepository;
pub use pg_pageview_repository::PgPageviewRepository;
