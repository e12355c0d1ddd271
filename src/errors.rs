//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Import errors
    // ---------------------------
    #[error("Malformed CSV: {0}")]
    MalformedCsv(String),

    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Import failed: {0}")]
    ImportFailure(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Read / settings errors
    // ---------------------------
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate value: {0}")]
    DuplicateKey(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Wrap a store-level failure raised while an import transaction is open.
    pub fn import_failure<E: std::fmt::Display>(e: E) -> Self {
        AppError::ImportFailure(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
