//! Business logic services for the application layer.

pub mod report_service;

pub use report_service::{Report, ReportService};
