//! Application layer services.
//!
//! Services coordinate repository, cache and domain calls and provide a
//! clean API for HTTP handlers and the CLI.
//!
//! # Available Services
//!
//! - [`services::report_service::ReportService`] - Fetches rows and builds the report table

pub mod services;
