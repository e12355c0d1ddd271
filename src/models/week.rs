use serde::Serialize;

/// A calendar week (KW) that has been imported at least once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Week {
    pub id: i64,
    pub year: i32,
    pub week_number: u32,
}

impl Week {
    /// Short label used by listings and charts, e.g. `2025-W05`.
    pub fn label(&self) -> String {
        week_label(self.year, self.week_number)
    }
}

pub fn week_label(year: i32, week_number: u32) -> String {
    format!("{}-W{:02}", year, week_number)
}

/// Years present in the store, each with its imported week numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearWeeks {
    pub year: i32,
    pub weeks: Vec<u32>,
}
