//! HTML template rendering handlers.

mod report;

pub use report::{ReportTemplate, report_page_handler};
