use crate::db::queries;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::Connection;
use std::fs;

/// Row counts of the tables shown by `db --info`.
const COUNTED_TABLES: [(&str, &str); 5] = [
    ("weeks", "Weeks"),
    ("workers", "Workers"),
    ("construction_sites", "Construction sites"),
    ("attendance", "Attendance half-days"),
    ("payroll_reference", "Payroll rows"),
];

pub fn print_db_info(conn: &Connection, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TABLE COUNTS
    //
    for (table, label) in COUNTED_TABLES {
        let count = count_rows(conn, table)?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, count, RESET);
    }

    //
    // 3) IMPORTED WEEK RANGE
    //
    let weeks = queries::list_weeks(conn)?;
    let placeholder = format!("{GREY}--{RESET}");
    let first = weeks.first().map(|w| w.label());
    let last = weeks.last().map(|w| w.label());

    println!("{}• Imported weeks:{}", CYAN, RESET);
    println!("    first: {}", first.unwrap_or_else(|| placeholder.clone()));
    println!("    last:  {}", last.unwrap_or(placeholder));

    println!();
    Ok(())
}

/// Problems reported by `PRAGMA integrity_check`, empty when the file is sound.
pub fn integrity_problems(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA integrity_check;")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        let line = r?;
        if line != "ok" {
            out.push(line);
        }
    }
    Ok(out)
}

fn count_rows(conn: &Connection, table: &str) -> rusqlite::Result<i64> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
}
