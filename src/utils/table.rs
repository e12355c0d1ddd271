//! Table rendering utilities for CLI outputs.

use crate::utils::colors::{BOLD, GREY, RESET};
use unicode_width::UnicodeWidthStr;

/// Placeholder shown for empty cells.
const EMPTY_CELL: &str = "·";

pub struct Column {
    pub header: String,
    pub width: usize,
    /// Right-align cell contents (amounts).
    pub numeric: bool,
}

impl Column {
    pub fn text(header: impl Into<String>) -> Self {
        let header = header.into();
        let width = UnicodeWidthStr::width(header.as_str());
        Self {
            header,
            width,
            numeric: false,
        }
    }

    pub fn numeric(header: impl Into<String>) -> Self {
        Self {
            numeric: true,
            ..Self::text(header)
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row, widening columns to fit. Missing cells render empty.
    pub fn add_row(&mut self, row: Vec<String>) {
        for (col, cell) in self.columns.iter_mut().zip(row.iter()) {
            col.width = col.width.max(UnicodeWidthStr::width(cell.as_str()));
        }
        self.rows.push(row);
    }

    pub fn render(&self, separator_char: &str) -> String {
        let mut out = String::new();

        // Header
        let header: Vec<String> = self
            .columns
            .iter()
            .map(|c| pad(&c.header, c.width, c.numeric))
            .collect();
        out.push_str(&format!("{BOLD}{}{RESET}\n", header.join(" ")));

        let total_width: usize =
            self.columns.iter().map(|c| c.width).sum::<usize>() + self.columns.len().saturating_sub(1);
        let sep = if separator_char.is_empty() { "-" } else { separator_char };
        out.push_str(&sep.repeat(total_width));
        out.push('\n');

        // Rows
        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, col)| {
                    let value = row.get(i).map(String::as_str).unwrap_or("");
                    if value.is_empty() {
                        format!("{GREY}{}{RESET}", pad(EMPTY_CELL, col.width, col.numeric))
                    } else {
                        pad(value, col.width, col.numeric)
                    }
                })
                .collect();
            out.push_str(cells.join(" ").trim_end());
            out.push('\n');
        }

        out
    }
}

/// Pad to a display width; `format!` width counts chars, not columns.
fn pad(value: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(UnicodeWidthStr::width(value)));
    if right {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}
