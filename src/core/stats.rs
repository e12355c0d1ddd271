//! Per-worker dashboard figures.
//!
//! Scores use a short window of the worker's most recent weeks with
//! attendance:
//!
//! - attendance ratio = average days worked per week / 6
//! - bonus score = 0.6 × share of weeks with a bonus
//!   + 0.4 × min(average bonus / average salary, 1)
//! - combined = 0.55 × attendance ratio + 0.45 × bonus score
//! - stars = ⌈combined × 5⌉ clamped to 1..=5
//! - bonus likelihood = round(bonus score × 100)

use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::DAYS_PER_WEEK;
use crate::models::site::site_label;
use crate::models::week::week_label;
use crate::models::worker_stats::{ChartPoint, WeekSample, WorkerCharts, WorkerProfile};
use rusqlite::{Connection, OptionalExtension, params};

const ATTENDANCE_WEIGHT: f64 = 0.55;
const BONUS_WEIGHT: f64 = 0.45;
const BONUS_WEEKS_WEIGHT: f64 = 0.6;
const BONUS_RATIO_WEIGHT: f64 = 0.4;
const MAX_STARS: f64 = 5.0;
const TOP_SITES: i64 = 4;

/// Bonus score in `0.0..=1.0` over the window.
fn bonus_score(window: &[WeekSample]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let n = window.len() as f64;

    let bonus_weeks = window.iter().filter(|w| w.bonus > 0).count() as f64 / n;

    let avg_bonus = window.iter().map(|w| w.bonus as f64).sum::<f64>() / n;
    let avg_salary = window.iter().map(|w| w.salario as f64).sum::<f64>() / n;
    let bonus_ratio = if avg_salary > 0.0 {
        (avg_bonus / avg_salary).min(1.0)
    } else {
        0.0
    };

    BONUS_WEEKS_WEIGHT * bonus_weeks + BONUS_RATIO_WEIGHT * bonus_ratio
}

/// Star rating (1–5) and bonus likelihood (0–100) of a window of weeks.
/// An empty window rates 1 star and 0 %.
pub fn score_window(window: &[WeekSample]) -> (u8, u8) {
    if window.is_empty() {
        return (1, 0);
    }
    let n = window.len() as f64;

    let avg_days = window.iter().map(|w| w.days).sum::<f64>() / n;
    let attendance_ratio = avg_days / DAYS_PER_WEEK as f64;
    let bonus = bonus_score(window);

    let combined = ATTENDANCE_WEIGHT * attendance_ratio + BONUS_WEIGHT * bonus;
    let stars = (combined * MAX_STARS).ceil().clamp(1.0, MAX_STARS) as u8;
    let likelihood = (bonus * 100.0).round().clamp(0.0, 100.0) as u8;

    (stars, likelihood)
}

pub struct StatsLogic;

impl StatsLogic {
    /// Most recent `window` weeks in which the worker has attendance,
    /// newest first.
    pub fn recent_window(
        conn: &Connection,
        worker_id: i64,
        window: usize,
    ) -> AppResult<Vec<WeekSample>> {
        let mut stmt = conn.prepare(
            "SELECT COUNT(a.id) / 2.0 AS days,
                    COALESCE(MAX(p.salario), 0) AS salario,
                    COALESCE(MAX(p.bonus), 0) AS bonus
             FROM attendance a
             JOIN weeks w ON w.id = a.week_id
             LEFT JOIN payroll_reference p
                    ON p.worker_id = a.worker_id AND p.week_id = a.week_id
             WHERE a.worker_id = ?1
             GROUP BY w.id
             ORDER BY w.year DESC, w.week_number DESC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![worker_id, window as i64], |row| {
            Ok(WeekSample {
                days: row.get(0)?,
                salario: row.get(1)?,
                bonus: row.get(2)?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn profile(conn: &Connection, worker_id: i64, window: usize) -> AppResult<WorkerProfile> {
        let worker = queries::load_worker(conn, worker_id)?
            .ok_or_else(|| AppError::NotFound(format!("worker {}", worker_id)))?;

        let total_halves: i64 = conn.query_row(
            "SELECT COUNT(*) FROM attendance WHERE worker_id = ?1",
            [worker_id],
            |row| row.get(0),
        )?;

        let total_weeks: i64 = conn.query_row(
            "SELECT COUNT(DISTINCT week_id) FROM attendance WHERE worker_id = ?1",
            [worker_id],
            |row| row.get(0),
        )?;

        let (total_salary, total_bonus): (i64, i64) = conn.query_row(
            "SELECT COALESCE(SUM(salario), 0), COALESCE(SUM(bonus), 0)
             FROM payroll_reference
             WHERE worker_id = ?1",
            [worker_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let first_week = conn
            .query_row(
                "SELECT year, week_number FROM weeks
                 WHERE id IN (
                     SELECT week_id FROM attendance WHERE worker_id = ?1
                     UNION
                     SELECT week_id FROM payroll_reference WHERE worker_id = ?1
                 )
                 ORDER BY year ASC, week_number ASC
                 LIMIT 1",
                [worker_id],
                |row| Ok(week_label(row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let samples = Self::recent_window(conn, worker_id, window)?;
        let (stars, bonus_likelihood) = score_window(&samples);

        Ok(WorkerProfile {
            id: worker.id,
            display_name: worker.display_name,
            cedula: worker.cedula,
            active: worker.active,
            total_halves,
            total_days: total_halves as f64 / 2.0,
            total_salary,
            total_bonus,
            first_week,
            total_weeks,
            window_weeks: samples.len(),
            stars,
            bonus_likelihood,
        })
    }

    /// Days and bonus per week over the worker's last `weeks` weeks (oldest
    /// first) and the sites where the worker spent most days.
    pub fn charts(conn: &Connection, worker_id: i64, weeks: usize) -> AppResult<WorkerCharts> {
        if queries::load_worker(conn, worker_id)?.is_none() {
            return Err(AppError::NotFound(format!("worker {}", worker_id)));
        }

        let weekly_days = Self::week_series(
            conn,
            "SELECT w.year, w.week_number, COUNT(a.id) / 2.0
             FROM attendance a
             JOIN weeks w ON w.id = a.week_id
             WHERE a.worker_id = ?1
             GROUP BY w.id
             ORDER BY w.year DESC, w.week_number DESC
             LIMIT ?2",
            worker_id,
            weeks,
        )?;

        let weekly_bonus = Self::week_series(
            conn,
            "SELECT w.year, w.week_number, CAST(COALESCE(p.bonus, 0) AS REAL)
             FROM payroll_reference p
             JOIN weeks w ON w.id = p.week_id
             WHERE p.worker_id = ?1
             ORDER BY w.year DESC, w.week_number DESC
             LIMIT ?2",
            worker_id,
            weeks,
        )?;

        let mut stmt = conn.prepare(
            "SELECT cs.id, cs.code, cs.name, COUNT(a.id) / 2.0 AS days
             FROM attendance a
             JOIN construction_sites cs ON cs.id = a.site_id
             WHERE a.worker_id = ?1
             GROUP BY cs.id
             HAVING days >= 1
             ORDER BY days DESC, cs.code ASC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![worker_id, TOP_SITES], |row| {
            let id: i64 = row.get(0)?;
            let code: String = row.get(1)?;
            let name: Option<String> = row.get(2)?;
            Ok(ChartPoint {
                label: site_label(name.as_deref(), Some(&code), Some(id)),
                value: row.get(3)?,
            })
        })?;

        let mut sites = Vec::new();
        for r in rows {
            sites.push(r?);
        }

        Ok(WorkerCharts {
            weekly_days,
            weekly_bonus,
            sites,
        })
    }

    /// Run a `(year, week_number, value)` query returning newest first and
    /// give the points back oldest first.
    fn week_series(
        conn: &Connection,
        sql: &str,
        worker_id: i64,
        weeks: usize,
    ) -> AppResult<Vec<ChartPoint>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params![worker_id, weeks as i64], |row| {
            Ok(ChartPoint {
                label: week_label(row.get(0)?, row.get(1)?),
                value: row.get(2)?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        out.reverse();
        Ok(out)
    }
}
