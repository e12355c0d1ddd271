//! Sheet layout: raw bytes → row matrix, week identifier, column map.
//!
//! Sheet template:
//! - row 0: cell 1 holds the week number
//! - row 1: header row, payroll columns are found by name
//! - rows 2..: one worker per row, column 0 is the (numbered) name,
//!   columns `1+2i` / `2+2i` hold the site code for day `i` morning/afternoon

use crate::core::normalize::parse_money;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{DAYS_PER_WEEK, HalfDay};
use crate::models::payroll::PayrollEntry;
use chrono::{Datelike, NaiveDate};

pub const DELIMITER: u8 = b';';

/// Row index of the header row.
pub const HEADER_ROW: usize = 1;
/// Row index of the first worker row.
pub const FIRST_DATA_ROW: usize = 2;

/// Column indexes of the payroll block, `None` when the header is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayrollColumns {
    pub salario: Option<usize>,
    pub bonus: Option<usize>,
    pub total: Option<usize>,
    pub comment: Option<usize>,
}

impl PayrollColumns {
    /// Read the payroll snapshot of one data row. Absent columns, and
    /// columns past the end of the row, give absent values (never zero).
    pub fn extract(&self, row: &[String]) -> PayrollEntry {
        PayrollEntry {
            salario: parse_money(cell(row, self.salario)),
            bonus: parse_money(cell(row, self.bonus)),
            total: parse_money(cell(row, self.total)),
            comment: cell(row, self.comment).map(|c| c.trim().to_string()),
        }
    }

    /// Whether a payroll header sits on column `idx`.
    pub fn contains(&self, idx: usize) -> bool {
        [self.salario, self.bonus, self.total, self.comment].contains(&Some(idx))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    /// `days[d][0]` morning column, `days[d][1]` afternoon column.
    pub days: [[usize; 2]; DAYS_PER_WEEK],
    pub payroll: PayrollColumns,
}

impl ColumnLayout {
    /// Attendance column of a half-day, `None` when a short sheet puts a
    /// payroll header on it.
    pub fn column_for(&self, day: usize, half: HalfDay) -> Option<usize> {
        let col = self.days[day][half.slot()];
        if self.payroll.contains(col) { None } else { Some(col) }
    }
}

fn cell(row: &[String], idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| row.get(i)).map(String::as_str)
}

/// Split text into records on line breaks outside quoted cells, so a
/// quoted cell may span several lines. Line breaks are `\n`, `\r\n` or
/// bare `\r`. Returns each record with its starting line index; a
/// trailing line break does not produce an extra empty record.
fn split_records(text: &str) -> Vec<(usize, String)> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    // A quote opens a quoted cell only at the start of a cell; inside one,
    // `""` is an escaped quote.
    let mut at_cell_start = true;
    let mut just_closed = false;
    let mut line = 0;
    let mut start = 0;

    for ch in text.chars() {
        if ch == '\n' {
            line += 1;
            if !in_quotes {
                out.push((start, std::mem::take(&mut current)));
                start = line;
                at_cell_start = true;
                just_closed = false;
                continue;
            }
        }
        if ch == '"' {
            if in_quotes {
                in_quotes = false;
                just_closed = true;
            } else if at_cell_start || just_closed {
                in_quotes = true;
                just_closed = false;
            }
        } else {
            just_closed = false;
        }
        at_cell_start = !in_quotes && ch == char::from(DELIMITER);
        current.push(ch);
    }
    if !current.is_empty() {
        out.push((start, current));
    }
    out
}

/// Parse one record as `;`-delimited cells. An empty record is an empty row.
fn split_record(record: &str, line_no: usize) -> AppResult<Vec<String>> {
    if record.is_empty() {
        return Ok(Vec::new());
    }

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(record.as_bytes());

    let mut cells = Vec::new();
    for result in rdr.records() {
        let parsed = result
            .map_err(|e| AppError::MalformedCsv(format!("line {}: {}", line_no + 1, e)))?;
        cells.extend(parsed.iter().map(str::to_string));
    }
    Ok(cells)
}

/// Decode raw bytes permissively (invalid UTF-8 sequences are replaced) and
/// split them into a row matrix. Blank lines stay as empty rows and quoted
/// cells keep their embedded line breaks.
pub fn read_rows(raw: &[u8]) -> AppResult<Vec<Vec<String>>> {
    let decoded = String::from_utf8_lossy(raw);
    let text: &str = decoded.as_ref();
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    split_records(text)
        .iter()
        .map(|(line_no, record)| split_record(record, *line_no))
        .collect()
}

/// Reject matrices that cannot hold a week number and a header row.
pub fn check_shape(rows: &[Vec<String>]) -> AppResult<()> {
    if rows.len() < 2 {
        return Err(AppError::MalformedCsv(format!(
            "expected at least 2 rows (week row and header row), found {}",
            rows.len()
        )));
    }
    if rows[0].len() < 2 {
        return Err(AppError::MalformedCsv(
            "first row must have at least 2 cells".into(),
        ));
    }
    Ok(())
}

/// Week number from the second cell of the first row; year from `today`.
/// Sheets never carry a year, they are always for the current one.
pub fn extract_week_identifier(rows: &[Vec<String>], today: NaiveDate) -> AppResult<(u32, i32)> {
    let raw = rows
        .first()
        .and_then(|r| r.get(1))
        .ok_or_else(|| AppError::MalformedHeader("week number cell is missing".into()))?;

    let week_number = raw.trim().parse::<u32>().map_err(|_| {
        AppError::MalformedHeader(format!("could not parse week number from '{}'", raw))
    })?;

    Ok((week_number, today.year()))
}

/// Build the column map from the header row.
///
/// Day columns are fixed by the template. Payroll columns drift between
/// exports and are found by exact (trimmed, lower-cased) header name.
pub fn detect_columns(header: &[String]) -> ColumnLayout {
    let names: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
    let find = |name: &str| names.iter().position(|h| h == name);

    let mut days = [[0usize; 2]; DAYS_PER_WEEK];
    for (i, cols) in days.iter_mut().enumerate() {
        *cols = [1 + 2 * i, 2 + 2 * i];
    }

    ColumnLayout {
        days,
        payroll: PayrollColumns {
            salario: find("salario"),
            bonus: find("bonus"),
            total: find("total"),
            comment: find("comentario"),
        },
    }
}
