//! Natural key → stable id resolution for workers and construction sites.
//!
//! Sheets never carry database ids: workers are identified by their
//! normalized name and sites by their raw code. Both resolvers are
//! resolve-or-create and rely on the store's unique constraints, so calling
//! them again for the same key never creates a second row.

use crate::db::queries;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Id of the worker with `normalized_name`, creating it with `display_name`
/// on first sight. The first-seen display name is kept forever.
pub fn resolve_worker(conn: &Connection, normalized_name: &str, display_name: &str) -> AppResult<i64> {
    queries::insert_worker_if_absent(conn, display_name, normalized_name)?;

    queries::worker_id_by_normalized(conn, normalized_name)?.ok_or_else(|| {
        AppError::ImportFailure(format!("worker '{}' vanished after insert", normalized_name))
    })
}

/// Id of the site with exactly this `code`, creating an unnamed active site
/// when the code is new. Existing sites are never modified.
pub fn resolve_site(conn: &Connection, code: &str) -> AppResult<i64> {
    if let Some(id) = queries::site_id_by_code(conn, code)? {
        return Ok(id);
    }
    queries::insert_site(conn, code)
}
