// src/export/logic.rs

use crate::core::weeks::WeekLogic;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use rusqlite::Connection;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the view of one week to `file`.
    pub fn export_week(
        conn: &Connection,
        year: i32,
        week_number: u32,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);
        let view = WeekLogic::view(conn, year, week_number)?;

        if view.workers.is_empty() {
            warning("No workers recorded for the selected week.");
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&view, path),
            ExportFormat::Json => export_json(&view, path),
            ExportFormat::Xlsx => export_xlsx(&view, path),
        }
    }
}
