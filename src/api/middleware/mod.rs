//! HTTP middleware shared by API and web routes.

pub mod tracing;
