use crate::db::queries;
use crate::errors::AppResult;
use crate::models::worker::Worker;
use rusqlite::Connection;

pub struct WorkerLogic;

impl WorkerLogic {
    /// Workers by id, as listed in the dashboard sidebar.
    pub fn list(conn: &Connection, include_inactive: bool) -> AppResult<Vec<Worker>> {
        queries::list_workers(conn, include_inactive)
    }
}
