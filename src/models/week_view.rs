use super::attendance::{DAY_NAMES, DAYS_PER_WEEK};
use serde::Serialize;

/// One worker line of the week view. Every field is already rendered for
/// display: empty strings stand for "nothing recorded".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekViewRow {
    pub worker_id: i64,
    pub name: String,
    /// `slots[day][0]` morning, `slots[day][1]` afternoon.
    pub slots: [[String; 2]; DAYS_PER_WEEK],
    pub salario: String,
    pub bonus: String,
    pub total: String,
    pub comment: String,
}

impl WeekViewRow {
    pub fn empty(worker_id: i64, name: String) -> Self {
        Self {
            worker_id,
            name,
            slots: Default::default(),
            salario: String::new(),
            bonus: String::new(),
            total: String::new(),
            comment: String::new(),
        }
    }

    /// Number of half-days with a site assignment.
    pub fn halves_worked(&self) -> usize {
        self.slots
            .iter()
            .flat_map(|d| d.iter())
            .filter(|s| !s.is_empty())
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekView {
    pub year: i32,
    pub week_number: u32,
    pub day_names: [&'static str; DAYS_PER_WEEK],
    pub workers: Vec<WeekViewRow>,
}

impl WeekView {
    pub fn new(year: i32, week_number: u32, workers: Vec<WeekViewRow>) -> Self {
        Self {
            year,
            week_number,
            day_names: DAY_NAMES,
            workers,
        }
    }
}
