//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for page-view retrieval and row caching.
//!
//! # Modules
//!
//! - [`cache`] - Row caching abstractions (Redis and no-op implementations)
//! - [`persistence`] - Page-view repository implementations

pub mod cache;
pub mod persistence;
