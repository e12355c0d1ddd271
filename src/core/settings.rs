use crate::db::log::ttlog;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::site::ConstructionSite;
use crate::models::worker::Worker;
use rusqlite::{Connection, ErrorCode};

/// One field edit from the settings screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEdit {
    WorkerCedula { worker_id: i64, cedula: String },
    SiteName { site_id: i64, name: String },
    WorkerActive { worker_id: i64, active: bool },
    SiteActive { site_id: i64, active: bool },
}

impl SettingsEdit {
    fn describe(&self) -> String {
        match self {
            SettingsEdit::WorkerCedula { worker_id, .. } => format!("cedula of worker {}", worker_id),
            SettingsEdit::SiteName { site_id, .. } => format!("name of site {}", site_id),
            SettingsEdit::WorkerActive { worker_id, .. } => format!("worker {}", worker_id),
            SettingsEdit::SiteActive { site_id, .. } => format!("site {}", site_id),
        }
    }
}

/// Outcome of a batch: edits are independent, a rejected one does not
/// prevent the others from being saved.
#[derive(Debug, Default)]
pub struct SettingsReport {
    pub applied: usize,
    pub errors: Vec<AppError>,
}

impl SettingsReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Active workers and sites, as shown on the settings screen.
#[derive(Debug)]
pub struct SettingsListing {
    pub workers: Vec<Worker>,
    pub sites: Vec<ConstructionSite>,
}

pub struct SettingsLogic;

/// Trimmed value, `None` when nothing is left.
fn cleaned(value: &str) -> Option<&str> {
    let v = value.trim();
    if v.is_empty() { None } else { Some(v) }
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation
    )
}

impl SettingsLogic {
    pub fn listing(conn: &Connection) -> AppResult<SettingsListing> {
        let mut workers = queries::list_workers(conn, false)?;
        workers.sort_by(|a, b| a.normalized_name.cmp(&b.normalized_name));

        let sites = queries::list_sites(conn, false)?;
        Ok(SettingsListing { workers, sites })
    }

    /// Apply a batch of edits in one transaction.
    ///
    /// Cedula and name edits only touch active rows. Uniqueness violations
    /// are collected as `DuplicateKey`, edits that match no row as
    /// `NotFound`; every other edit of the batch is committed.
    pub fn apply(conn: &mut Connection, edits: &[SettingsEdit]) -> AppResult<SettingsReport> {
        let tx = conn.transaction()?;
        let mut report = SettingsReport::default();

        for edit in edits {
            let result = match edit {
                SettingsEdit::WorkerCedula { worker_id, cedula } => {
                    queries::update_worker_cedula(&tx, *worker_id, cleaned(cedula))
                }
                SettingsEdit::SiteName { site_id, name } => {
                    queries::update_site_name(&tx, *site_id, cleaned(name))
                }
                SettingsEdit::WorkerActive { worker_id, active } => {
                    queries::set_worker_active(&tx, *worker_id, *active)
                }
                SettingsEdit::SiteActive { site_id, active } => {
                    queries::set_site_active(&tx, *site_id, *active)
                }
            };

            match result {
                Ok(0) => report.errors.push(AppError::NotFound(format!(
                    "{} (missing or inactive)",
                    edit.describe()
                ))),
                Ok(_) => report.applied += 1,
                Err(e) if is_unique_violation(&e) => {
                    report.errors.push(AppError::DuplicateKey(edit.describe()))
                }
                Err(e) => return Err(e.into()),
            }
        }

        ttlog(
            &tx,
            "settings",
            "",
            &format!(
                "{} edit(s) applied, {} rejected",
                report.applied,
                report.errors.len()
            ),
        )?;

        tx.commit()?;
        Ok(report)
    }
}
