use crate::core::identity::{resolve_site, resolve_worker};
use crate::core::layout::{self, ColumnLayout, FIRST_DATA_ROW, HEADER_ROW};
use crate::core::normalize::{is_worker_row_name, normalize_worker_name, strip_ordinal};
use crate::db::log::ttlog;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceEntry, DAYS_PER_WEEK, HalfDay};
use crate::models::week::week_label;
use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use std::collections::HashSet;

/// Token the sheet uses for "no assignment" in a day cell.
const NO_ASSIGNMENT: &str = "0";

/// Result of one week import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub week_number: u32,
    pub year: i32,
    /// The week was already in the store; its facts have been replaced.
    pub pre_existed: bool,
    pub week_id: i64,
    /// Distinct workers written for this week.
    pub workers: usize,
    pub attendance_rows: usize,
    /// Non-blank rows dropped because their name cell held no letter.
    pub skipped_rows: usize,
}

/// High-level business logic for the `import` command.
pub struct ImportLogic;

impl ImportLogic {
    /// Import one weekly sheet for the current calendar year.
    pub fn import_week(conn: &mut Connection, raw: &[u8]) -> AppResult<ImportOutcome> {
        Self::import_week_at(conn, raw, Local::now().date_naive())
    }

    /// Import one weekly sheet, taking the year from `today`.
    ///
    /// Parsing and header errors are raised before anything is written.
    /// The week lookup, the clearing of old facts and every row write share
    /// one transaction: any failure rolls the whole week back.
    pub fn import_week_at(
        conn: &mut Connection,
        raw: &[u8],
        today: NaiveDate,
    ) -> AppResult<ImportOutcome> {
        let rows = layout::read_rows(raw)?;
        layout::check_shape(&rows)?;
        let (week_number, year) = layout::extract_week_identifier(&rows, today)?;

        let tx = conn.transaction().map_err(AppError::import_failure)?;

        // Dropping `tx` without commit rolls back.
        let outcome = write_week(&tx, &rows, week_number, year).map_err(into_import_failure)?;

        tx.commit().map_err(AppError::import_failure)?;
        Ok(outcome)
    }

    /// Week identifier a sheet would be imported under, without touching the store.
    pub fn peek_week(raw: &[u8], today: NaiveDate) -> AppResult<(u32, i32)> {
        let rows = layout::read_rows(raw)?;
        layout::check_shape(&rows)?;
        layout::extract_week_identifier(&rows, today)
    }

    pub fn week_exists(conn: &Connection, year: i32, week_number: u32) -> AppResult<bool> {
        Ok(queries::find_week_id(conn, year, week_number)?.is_some())
    }
}

fn into_import_failure(e: AppError) -> AppError {
    match e {
        AppError::ImportFailure(_) => e,
        other => AppError::ImportFailure(other.to_string()),
    }
}

/// Reuse the week row if present (clearing its facts), otherwise create it.
fn prepare_week(conn: &Connection, year: i32, week_number: u32) -> AppResult<(i64, bool)> {
    match queries::find_week_id(conn, year, week_number)? {
        Some(week_id) => {
            queries::clear_week_facts(conn, week_id)?;
            Ok((week_id, true))
        }
        None => Ok((queries::insert_week(conn, year, week_number)?, false)),
    }
}

fn write_week(
    conn: &Connection,
    rows: &[Vec<String>],
    week_number: u32,
    year: i32,
) -> AppResult<ImportOutcome> {
    let (week_id, pre_existed) = prepare_week(conn, year, week_number)?;
    let columns = layout::detect_columns(&rows[HEADER_ROW]);

    let mut workers = HashSet::new();
    let mut attendance_rows = 0;
    let mut skipped_rows = 0;

    for (sort_order, row) in rows.iter().skip(FIRST_DATA_ROW).enumerate() {
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }

        let display_name = strip_ordinal(&row[0]);
        if !is_worker_row_name(&display_name) {
            skipped_rows += 1;
            continue;
        }

        let normalized = normalize_worker_name(&row[0]);
        let worker_id = resolve_worker(conn, &normalized, &display_name)?;
        workers.insert(worker_id);

        attendance_rows += write_attendance(
            conn,
            &columns,
            row,
            worker_id,
            week_id,
            sort_order as i64,
        )?;

        queries::replace_payroll(conn, worker_id, week_id, &columns.payroll.extract(row))?;
    }

    let label = week_label(year, week_number);
    ttlog(
        conn,
        "import",
        &label,
        &format!(
            "{} week {}: {} workers, {} half-days",
            if pre_existed { "Re-imported" } else { "Imported" },
            label,
            workers.len(),
            attendance_rows
        ),
    )?;

    Ok(ImportOutcome {
        week_number,
        year,
        pre_existed,
        week_id,
        workers: workers.len(),
        attendance_rows,
        skipped_rows,
    })
}

/// Write the half-day assignments of one worker row. Empty cells, `0` cells,
/// payroll columns and columns beyond the row's end create nothing.
fn write_attendance(
    conn: &Connection,
    columns: &ColumnLayout,
    row: &[String],
    worker_id: i64,
    week_id: i64,
    sort_order: i64,
) -> AppResult<usize> {
    let mut written = 0;

    for day in 0..DAYS_PER_WEEK {
        for half in HalfDay::BOTH {
            let Some(code) = columns
                .column_for(day, half)
                .and_then(|col| row.get(col))
                .map(|c| c.trim())
            else {
                continue;
            };
            if code.is_empty() || code == NO_ASSIGNMENT {
                continue;
            }

            let site_id = resolve_site(conn, code)?;
            queries::upsert_attendance(
                conn,
                &AttendanceEntry {
                    worker_id,
                    week_id,
                    day: day as u8,
                    half,
                    site_id,
                    sort_order,
                },
            )?;
            written += 1;
        }
    }

    Ok(written)
}
