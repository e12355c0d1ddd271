use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{DAYS_PER_WEEK, HalfDay};
use crate::models::payroll::PayrollEntry;
use crate::models::site::site_label;
use crate::models::week::{YearWeeks, week_label};
use crate::models::week_view::{WeekView, WeekViewRow};
use rusqlite::{Connection, params};
use std::collections::HashMap;

/// Read-only access to imported weeks.
pub struct WeekLogic;

impl WeekLogic {
    /// Every imported week grouped by year, both ascending.
    pub fn overview(conn: &Connection) -> AppResult<Vec<YearWeeks>> {
        let mut out: Vec<YearWeeks> = Vec::new();

        for week in queries::list_weeks(conn)? {
            match out.last_mut() {
                Some(last) if last.year == week.year => last.weeks.push(week.week_number),
                _ => out.push(YearWeeks {
                    year: week.year,
                    weeks: vec![week.week_number],
                }),
            }
        }
        Ok(out)
    }

    pub fn existing_years(conn: &Connection) -> AppResult<Vec<i32>> {
        let mut stmt = conn.prepare("SELECT DISTINCT year FROM weeks ORDER BY year")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn existing_weeks_for_year(conn: &Connection, year: i32) -> AppResult<Vec<u32>> {
        let mut stmt =
            conn.prepare("SELECT week_number FROM weeks WHERE year = ?1 ORDER BY week_number")?;
        let rows = stmt.query_map([year], |row| row.get(0))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Grid of one week: every known worker with a display value for each
    /// half-day and their payroll figures. Workers present in the week come
    /// first in sheet order, the rest follow by id with blank cells.
    pub fn view(conn: &Connection, year: i32, week_number: u32) -> AppResult<WeekView> {
        let week_id = queries::find_week_id(conn, year, week_number)?.ok_or_else(|| {
            AppError::NotFound(format!("week {}", week_label(year, week_number)))
        })?;

        //
        // 1) All workers, sheet order of this week first
        //
        let mut stmt = conn.prepare(
            "SELECT w.id, w.display_name, MIN(a.sort_order) AS pos
             FROM workers w
             LEFT JOIN attendance a ON a.worker_id = w.id AND a.week_id = ?1
             GROUP BY w.id
             ORDER BY pos IS NULL, pos, w.id",
        )?;
        let rows = stmt.query_map([week_id], |row| {
            Ok(WeekViewRow::empty(row.get(0)?, row.get(1)?))
        })?;

        let mut workers = Vec::new();
        for r in rows {
            workers.push(r?);
        }

        let index: HashMap<i64, usize> = workers
            .iter()
            .enumerate()
            .map(|(i, w)| (w.worker_id, i))
            .collect();

        //
        // 2) Attendance with site display value
        //
        let mut stmt = conn.prepare(
            "SELECT a.worker_id, a.day, a.half, a.site_id, cs.code, cs.name
             FROM attendance a
             LEFT JOIN construction_sites cs ON cs.id = a.site_id
             WHERE a.week_id = ?1",
        )?;
        let rows = stmt.query_map(params![week_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, Option<i64>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
            ))
        })?;

        for r in rows {
            let (worker_id, day, half, site_id, code, name) = r?;
            let (Some(&i), Some(half)) = (index.get(&worker_id), HalfDay::from_db(half)) else {
                continue;
            };
            let day = day as usize;
            if day >= DAYS_PER_WEEK {
                continue;
            }

            workers[i].slots[day][half.slot()] = site_label(name.as_deref(), code.as_deref(), site_id);
        }

        //
        // 3) Payroll
        //
        let mut stmt = conn.prepare(
            "SELECT worker_id, salario, bonus, total, comment
             FROM payroll_reference
             WHERE week_id = ?1",
        )?;
        let rows = stmt.query_map([week_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                PayrollEntry {
                    salario: row.get(1)?,
                    bonus: row.get(2)?,
                    total: row.get(3)?,
                    comment: row.get(4)?,
                },
            ))
        })?;

        for r in rows {
            let (worker_id, p) = r?;
            if let Some(&i) = index.get(&worker_id) {
                let w = &mut workers[i];
                w.salario = PayrollEntry::display(p.salario);
                w.bonus = PayrollEntry::display(p.bonus);
                w.total = PayrollEntry::display(p.total);
                w.comment = p.comment.unwrap_or_default();
            }
        }

        Ok(WeekView::new(year, week_number, workers))
    }
}
