#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use obralog::core::import::{ImportLogic, ImportOutcome};
use obralog::db::pool::DbPool;
use rusqlite::Connection;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Header of the standard sheet template: name, 6 days × (am, pm), payroll.
pub const HEADER: &str = "nombre;lun_am;lun_pm;mar_am;mar_pm;mie_am;mie_pm;jue_am;jue_pm;vie_am;vie_pm;sab_am;sab_pm;salario;bonus;total;comentario";

pub fn obl() -> Command {
    cargo_bin_cmd!("obralog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_obralog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write a sheet to a temp file and return its path
pub fn write_sheet(name: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_sheet.csv", name));
    let p = path.to_string_lossy().to_string();
    fs::write(&p, content).expect("write sheet");
    p
}

/// Sheet in the standard template: week row, header row, then `rows`
pub fn sheet(week: u32, rows: &[&str]) -> String {
    let mut out = format!(";{}\n{}\n", week, HEADER);
    for r in rows {
        out.push_str(r);
        out.push('\n');
    }
    out
}

/// Fresh, migrated database in the temp dir
pub fn open_db(name: &str) -> Connection {
    let db_path = setup_test_db(name);
    DbPool::open_initialized(&db_path).expect("open db").conn
}

/// Every import in library tests happens "today" = 2025-03-10
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date")
}

pub fn import(conn: &mut Connection, content: &str) -> ImportOutcome {
    ImportLogic::import_week_at(conn, content.as_bytes(), today()).expect("import")
}

pub fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).expect("count query")
}
