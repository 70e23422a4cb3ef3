//! Domain layer: the report data-shaping pipeline.
//!
//! Independent of HTTP, storage and caching. Everything here is synchronous
//! and pure except the [`repositories`] trait, which only declares the
//! retrieval contract.
//!
//! # Modules
//!
//! - [`calendar`] - Report-timezone dates and Thai (Buddhist era) formatting
//! - [`entities`] - Report rows as delivered by the data source
//! - [`repositories`] - Data-retrieval trait and query parameters
//! - [`table`] - Builds the display-ready [`table::TableModel`]
//!
//! # Report Flow
//!
//! 1. A [`repositories::PageviewRepository`] returns rows sorted by page views
//! 2. [`table::build`] numbers them, formats dates, flags "today", sums the total
//! 3. A renderer (HTML, JSON, terminal) serializes the table model

pub mod calendar;
pub mod entities;
pub mod repositories;
pub mod table;
