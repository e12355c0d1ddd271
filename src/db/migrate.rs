use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Create every table of the current schema.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS weeks (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            year         INTEGER NOT NULL,
            week_number  INTEGER NOT NULL,
            UNIQUE (year, week_number)
        );

        CREATE TABLE IF NOT EXISTS workers (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            display_name     TEXT NOT NULL,
            normalized_name  TEXT NOT NULL UNIQUE,
            cedula           TEXT,
            active           INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS construction_sites (
            id      INTEGER PRIMARY KEY AUTOINCREMENT,
            code    TEXT NOT NULL UNIQUE,
            name    TEXT,
            active  INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS attendance (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id   INTEGER NOT NULL REFERENCES workers(id),
            week_id     INTEGER NOT NULL REFERENCES weeks(id),
            day         INTEGER NOT NULL CHECK (day BETWEEN 0 AND 5),
            half        INTEGER NOT NULL CHECK (half IN (1, 2)),
            site_id     INTEGER NOT NULL REFERENCES construction_sites(id),
            sort_order  INTEGER NOT NULL DEFAULT 0,
            UNIQUE (worker_id, week_id, day, half)
        );

        CREATE TABLE IF NOT EXISTS payroll_reference (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id  INTEGER NOT NULL REFERENCES workers(id),
            week_id    INTEGER NOT NULL REFERENCES weeks(id),
            salario    INTEGER,
            bonus      INTEGER,
            total      INTEGER,
            comment    TEXT,
            UNIQUE (worker_id, week_id)
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_week ON attendance(week_id);
        CREATE INDEX IF NOT EXISTS idx_payroll_week ON payroll_reference(week_id);
        "#,
    )?;
    Ok(())
}

/// Early databases stored the week number as `kalenderwoche`.
fn migrate_rename_kalenderwoche(conn: &Connection) -> Result<()> {
    if !table_exists(conn, "weeks")? || !table_has_column(conn, "weeks", "kalenderwoche")? {
        return Ok(());
    }

    warning("Renaming weeks.kalenderwoche to week_number...");
    conn.execute_batch("ALTER TABLE weeks RENAME COLUMN kalenderwoche TO week_number;")?;
    mark_applied(
        conn,
        "20250110_0002_rename_kalenderwoche",
        "Renamed weeks.kalenderwoche to week_number",
    )?;
    success("weeks.week_number column in place.");
    Ok(())
}

/// Early databases kept the site reference of an attendance row in `code`.
fn migrate_rename_attendance_code(conn: &Connection) -> Result<()> {
    if !table_exists(conn, "attendance")?
        || !table_has_column(conn, "attendance", "code")?
        || table_has_column(conn, "attendance", "site_id")?
    {
        return Ok(());
    }

    warning("Renaming attendance.code to site_id...");
    conn.execute_batch("ALTER TABLE attendance RENAME COLUMN code TO site_id;")?;
    mark_applied(
        conn,
        "20250124_0003_rename_attendance_code",
        "Renamed attendance.code to site_id",
    )?;
    success("attendance.site_id column in place.");
    Ok(())
}

/// Cedulas are unique among active workers, site names are unique when set.
fn migrate_unique_settings_indexes(conn: &Connection) -> AppResult<()> {
    let version = "20250212_0004_unique_cedula_and_site_name";
    if is_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_workers_active_cedula
            ON workers(cedula) WHERE cedula IS NOT NULL AND active = 1;
        CREATE UNIQUE INDEX IF NOT EXISTS idx_sites_name
            ON construction_sites(name) WHERE name IS NOT NULL;
        "#,
    )
    .map_err(|e| {
        AppError::Migration(format!(
            "Failed to create unique indexes (duplicate cedulas or site names?): {}",
            e
        ))
    })?;

    mark_applied(
        conn,
        version,
        "Added unique indexes on active cedulas and site names",
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    // 1) Log table first, migrations are recorded there
    ensure_log_table(conn)?;

    // 2) Legacy column names must be fixed before CREATE IF NOT EXISTS
    migrate_rename_kalenderwoche(conn)?;
    migrate_rename_attendance_code(conn)?;

    // 3) Current schema
    let fresh = !table_exists(conn, "weeks")?;
    create_schema(conn)?;
    if fresh {
        mark_applied(conn, "20250101_0001_initial_schema", "Created schema")?;
    }

    // 4) Constraints added after the first release
    migrate_unique_settings_indexes(conn)?;

    Ok(())
}
