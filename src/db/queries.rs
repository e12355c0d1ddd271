use crate::errors::AppResult;
use crate::models::attendance::AttendanceEntry;
use crate::models::payroll::PayrollEntry;
use crate::models::site::ConstructionSite;
use crate::models::week::Week;
use crate::models::worker::Worker;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

// ---------------------------------------------------------------------------
// Row mappers
// ---------------------------------------------------------------------------

pub fn map_week(row: &Row) -> Result<Week> {
    Ok(Week {
        id: row.get("id")?,
        year: row.get("year")?,
        week_number: row.get("week_number")?,
    })
}

pub fn map_worker(row: &Row) -> Result<Worker> {
    Ok(Worker {
        id: row.get("id")?,
        display_name: row.get("display_name")?,
        normalized_name: row.get("normalized_name")?,
        cedula: row.get("cedula")?,
        active: row.get::<_, i64>("active")? == 1,
    })
}

pub fn map_site(row: &Row) -> Result<ConstructionSite> {
    Ok(ConstructionSite {
        id: row.get("id")?,
        code: row.get("code")?,
        name: row.get("name")?,
        active: row.get::<_, i64>("active")? == 1,
    })
}

// ---------------------------------------------------------------------------
// Weeks
// ---------------------------------------------------------------------------

pub fn find_week_id(conn: &Connection, year: i32, week_number: u32) -> AppResult<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM weeks WHERE year = ?1 AND week_number = ?2",
            params![year, week_number],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

pub fn insert_week(conn: &Connection, year: i32, week_number: u32) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO weeks (year, week_number) VALUES (?1, ?2)",
        params![year, week_number],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Delete every attendance and payroll row of a week. The week row stays.
/// Returns the number of (attendance, payroll) rows removed.
pub fn clear_week_facts(conn: &Connection, week_id: i64) -> AppResult<(usize, usize)> {
    let attendance = conn.execute("DELETE FROM attendance WHERE week_id = ?1", [week_id])?;
    let payroll = conn.execute("DELETE FROM payroll_reference WHERE week_id = ?1", [week_id])?;
    Ok((attendance, payroll))
}

pub fn list_weeks(conn: &Connection) -> AppResult<Vec<Week>> {
    let mut stmt = conn.prepare(
        "SELECT id, year, week_number FROM weeks
         ORDER BY year ASC, week_number ASC",
    )?;
    let rows = stmt.query_map([], map_week)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Workers
// ---------------------------------------------------------------------------

/// Insert a worker unless one with the same normalized name exists.
/// Returns the number of inserted rows (0 or 1).
pub fn insert_worker_if_absent(
    conn: &Connection,
    display_name: &str,
    normalized_name: &str,
) -> AppResult<usize> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO workers (display_name, normalized_name, active)
         VALUES (?1, ?2, 1)
         ON CONFLICT(normalized_name) DO NOTHING",
    )?;
    Ok(stmt.execute(params![display_name, normalized_name])?)
}

pub fn worker_id_by_normalized(conn: &Connection, normalized_name: &str) -> AppResult<Option<i64>> {
    let mut stmt = conn.prepare_cached("SELECT id FROM workers WHERE normalized_name = ?1")?;
    Ok(stmt
        .query_row([normalized_name], |row| row.get(0))
        .optional()?)
}

pub fn load_worker(conn: &Connection, id: i64) -> AppResult<Option<Worker>> {
    Ok(conn
        .query_row(
            "SELECT id, display_name, normalized_name, cedula, active
             FROM workers WHERE id = ?1",
            [id],
            map_worker,
        )
        .optional()?)
}

pub fn list_workers(conn: &Connection, include_inactive: bool) -> AppResult<Vec<Worker>> {
    let mut stmt = conn.prepare(
        "SELECT id, display_name, normalized_name, cedula, active
         FROM workers
         WHERE active = 1 OR ?1
         ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([include_inactive], map_worker)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Set or clear the cedula of an active worker. Returns rows changed.
pub fn update_worker_cedula(conn: &Connection, id: i64, cedula: Option<&str>) -> Result<usize> {
    conn.execute(
        "UPDATE workers SET cedula = ?1 WHERE id = ?2 AND active = 1",
        params![cedula, id],
    )
}

pub fn set_worker_active(conn: &Connection, id: i64, active: bool) -> Result<usize> {
    conn.execute(
        "UPDATE workers SET active = ?1 WHERE id = ?2",
        params![active as i64, id],
    )
}

// ---------------------------------------------------------------------------
// Construction sites
// ---------------------------------------------------------------------------

pub fn site_id_by_code(conn: &Connection, code: &str) -> AppResult<Option<i64>> {
    let mut stmt = conn.prepare_cached("SELECT id FROM construction_sites WHERE code = ?1")?;
    Ok(stmt.query_row([code], |row| row.get(0)).optional()?)
}

pub fn insert_site(conn: &Connection, code: &str) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO construction_sites (code, name, active) VALUES (?1, NULL, 1)",
    )?;
    stmt.execute([code])?;
    Ok(conn.last_insert_rowid())
}

pub fn list_sites(conn: &Connection, include_inactive: bool) -> AppResult<Vec<ConstructionSite>> {
    let mut stmt = conn.prepare(
        "SELECT id, code, name, active
         FROM construction_sites
         WHERE active = 1 OR ?1
         ORDER BY code ASC",
    )?;
    let rows = stmt.query_map([include_inactive], map_site)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Set or clear the display name of an active site. Returns rows changed.
pub fn update_site_name(conn: &Connection, id: i64, name: Option<&str>) -> Result<usize> {
    conn.execute(
        "UPDATE construction_sites SET name = ?1 WHERE id = ?2 AND active = 1",
        params![name, id],
    )
}

pub fn set_site_active(conn: &Connection, id: i64, active: bool) -> Result<usize> {
    conn.execute(
        "UPDATE construction_sites SET active = ?1 WHERE id = ?2",
        params![active as i64, id],
    )
}

// ---------------------------------------------------------------------------
// Attendance / payroll facts
// ---------------------------------------------------------------------------

/// Insert an attendance row. When the (worker, week, day, half) slot is
/// already taken, only its site is overwritten.
pub fn upsert_attendance(conn: &Connection, entry: &AttendanceEntry) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO attendance (worker_id, week_id, day, half, site_id, sort_order)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(worker_id, week_id, day, half)
         DO UPDATE SET site_id = excluded.site_id",
    )?;
    stmt.execute(params![
        entry.worker_id,
        entry.week_id,
        entry.day,
        entry.half.to_db(),
        entry.site_id,
        entry.sort_order,
    ])?;
    Ok(())
}

/// Write the payroll snapshot of a worker for a week, replacing any previous one.
pub fn replace_payroll(
    conn: &Connection,
    worker_id: i64,
    week_id: i64,
    payroll: &PayrollEntry,
) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT OR REPLACE INTO payroll_reference
         (worker_id, week_id, salario, bonus, total, comment)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    stmt.execute(params![
        worker_id,
        week_id,
        payroll.salario,
        payroll.bonus,
        payroll.total,
        payroll.comment,
    ])?;
    Ok(())
}
