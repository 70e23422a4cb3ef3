//! Report table builder.
//!
//! Turns fetched [`ReportRow`]s into a renderer-agnostic [`TableModel`]:
//! numbered rows, Thai-formatted dates, per-cell alignment and emphasis, a
//! highlight flag for rows dated "today", and the page-view total.
//!
//! Renderers (HTML page, JSON API, terminal) only serialize the model; all
//! layout decisions are made here.

use serde::Serialize;

use crate::domain::calendar::{CalendarDate, InvalidDateError, to_thai_date};
use crate::domain::entities::ReportRow;

/// Horizontal alignment of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub text: String,
    pub alignment: Alignment,
    pub emphasis: bool,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alignment: Alignment::Left,
            emphasis: false,
        }
    }

    /// CSS classes a markup renderer should apply to this cell.
    pub fn css_class(&self) -> &'static str {
        match (self.alignment, self.emphasis) {
            (Alignment::Left, false) => "",
            (Alignment::Left, true) => "text-bold",
            (Alignment::Center, false) => "text-center",
            (Alignment::Center, true) => "text-center text-bold",
            (Alignment::Right, false) => "text-right",
            (Alignment::Right, true) => "text-right text-bold",
        }
    }
}

/// One displayed row, derived from exactly one [`ReportRow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    /// 1-based position in the table.
    pub index: usize,
    /// Cells in column order: index, title, path, date, pageviews.
    pub cells: Vec<Cell>,
    pub is_today: bool,
}

/// Column headings matching [`RenderedRow::cells`].
pub const COLUMN_HEADINGS: [&str; 5] = ["No.", "Title", "Link", "วันที่ผลิตข่าว", "Pageview"];

/// Display-ready report table.
///
/// `total_pageviews` is always the sum over the same rows that produced `rows`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableModel {
    pub rows: Vec<RenderedRow>,
    pub total_pageviews: u64,
}

impl TableModel {
    /// True when the source produced no rows; renderers show a "no results" state.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Builds the table model for `rows`, highlighting rows dated on `today`'s day.
///
/// Input order is preserved. The first date that fails Thai formatting aborts
/// the whole build; no partial table is returned.
///
/// # Errors
///
/// [`InvalidDateError`] propagated from [`to_thai_date`].
pub fn build<I>(rows: I, today: &CalendarDate) -> Result<TableModel, InvalidDateError>
where
    I: IntoIterator<Item = ReportRow>,
{
    let mut table = TableModel::default();

    for (position, row) in rows.into_iter().enumerate() {
        let index = position + 1;
        let date_text = to_thai_date(&row.date, false)?;
        let is_today = row.date.same_day(today);

        let cells = vec![
            Cell::plain(index.to_string()),
            Cell::plain(row.title),
            Cell::plain(row.path),
            Cell {
                text: date_text,
                alignment: Alignment::Center,
                emphasis: false,
            },
            Cell {
                text: row.pageviews.to_string(),
                alignment: Alignment::Right,
                emphasis: true,
            },
        ];

        table.total_pageviews += row.pageviews;
        table.rows.push(RenderedRow {
            index,
            cells,
            is_today,
        });
    }

    Ok(table)
}
