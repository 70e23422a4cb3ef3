//! Plain-text rendering of a report for terminals.
//!
//! Column widths are measured in `char`s, so Thai combining vowels can make
//! a column look one or two cells narrower than computed.

use colored::{ColoredString, Colorize};

use crate::application::services::Report;
use crate::domain::table::{Alignment, COLUMN_HEADINGS, Cell};

const TOTAL_LABEL: &str = "เพจวิวรวม";
const COLUMN_GAP: &str = "  ";

/// Renders `report` as an aligned text table.
///
/// Rows dated today are highlighted and emphasized cells are bold when the
/// terminal supports colors (see `colored::control`).
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    let heading = format!(
        "Top {} ข่าวที่มีเพจวิวสูงสุด {}",
        report.query.max_results, report.generated_at
    );
    out.push_str(&format!("{}\n", heading.bold()));
    out.push_str(&format!(
        "{} - {}\n\n",
        report.query.start_date, report.query.end_date
    ));

    if report.table.is_empty() {
        out.push_str("No Results Found.\n");
        return out;
    }

    let total = report.table.total_pageviews.to_string();
    let widths = column_widths(report, &total);

    let header: Vec<String> = COLUMN_HEADINGS
        .iter()
        .zip(&widths)
        .map(|(heading, width)| pad(heading, *width, Alignment::Left))
        .collect();
    out.push_str(&format!("{}\n", header.join(COLUMN_GAP).bold()));

    let rule_width = widths.iter().sum::<usize>() + COLUMN_GAP.len() * (widths.len() - 1);
    out.push_str(&format!("{}\n", "-".repeat(rule_width)));

    for row in &report.table.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| styled_cell(cell, *width).to_string())
            .collect();
        let line = cells.join(COLUMN_GAP);

        if row.is_today {
            out.push_str(&format!("{}\n", line.on_bright_cyan()));
        } else {
            out.push_str(&format!("{line}\n"));
        }
    }

    out.push_str(&format!("{}\n", "-".repeat(rule_width)));

    let total_row = [
        pad("", widths[0], Alignment::Left),
        pad(TOTAL_LABEL, widths[1], Alignment::Center),
        pad("", widths[2], Alignment::Left),
        pad("", widths[3], Alignment::Left),
        pad(&total, widths[4], Alignment::Right).bold().to_string(),
    ];
    out.push_str(&format!("{}\n", total_row.join(COLUMN_GAP)));

    out
}

fn column_widths(report: &Report, total: &str) -> Vec<usize> {
    let mut widths: Vec<usize> = COLUMN_HEADINGS.iter().map(|h| h.chars().count()).collect();

    for row in &report.table.rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.text.chars().count());
        }
    }

    widths[1] = widths[1].max(TOTAL_LABEL.chars().count());
    widths[4] = widths[4].max(total.chars().count());
    widths
}

fn styled_cell(cell: &Cell, width: usize) -> ColoredString {
    let padded = pad(&cell.text, width, cell.alignment);
    if cell.emphasis {
        padded.bold()
    } else {
        padded.normal()
    }
}

fn pad(text: &str, width: usize, alignment: Alignment) -> String {
    let fill = width.saturating_sub(text.chars().count());
    match alignment {
        Alignment::Left => format!("{text}{}", " ".repeat(fill)),
        Alignment::Right => format!("{}{text}", " ".repeat(fill)),
        Alignment::Center => {
            let left = fill / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(fill - left))
        }
    }
}
