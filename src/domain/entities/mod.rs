//! Core domain entities.
//!
//! - [`ReportRow`] - One analytics record (title, path, date, page views)

pub mod report_row;

pub use report_row::ReportRow;
