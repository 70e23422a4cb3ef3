//! HTTP request handlers for API endpoints.

pub mod health;
pub mod report;

pub use health::health_handler;
pub use report::report_handler;
