use serde::Serialize;

/// Dashboard profile of a worker: lifetime totals plus the scores computed
/// over the recent window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerProfile {
    pub id: i64,
    pub display_name: String,
    pub cedula: Option<String>,
    pub active: bool,
    pub total_halves: i64,
    pub total_days: f64,
    pub total_salary: i64,
    pub total_bonus: i64,
    /// Earliest week with attendance or payroll, e.g. `2025-W03`.
    pub first_week: Option<String>,
    /// Weeks with at least one attendance row.
    pub total_weeks: i64,
    /// Weeks actually used for the scores (≤ configured window).
    pub window_weeks: usize,
    pub stars: u8,
    pub bonus_likelihood: u8,
}

/// Per-week figures of one worker, the input of the score computation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeekSample {
    pub days: f64,
    pub salario: i64,
    pub bonus: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerCharts {
    pub weekly_days: Vec<ChartPoint>,
    pub weekly_bonus: Vec<ChartPoint>,
    pub sites: Vec<ChartPoint>,
}
