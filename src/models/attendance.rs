use serde::Serialize;

/// Monday to Saturday.
pub const DAYS_PER_WEEK: usize = 6;

pub const DAY_NAMES: [&str; DAYS_PER_WEEK] =
    ["Lunes", "Martes", "Miércoles", "Jueves", "Viernes", "Sábado"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HalfDay {
    Morning,   // 1
    Afternoon, // 2
}

impl HalfDay {
    pub const BOTH: [HalfDay; 2] = [HalfDay::Morning, HalfDay::Afternoon];

    /// Convert enum → DB value
    pub fn to_db(self) -> i64 {
        match self {
            HalfDay::Morning => 1,
            HalfDay::Afternoon => 2,
        }
    }

    /// Convert DB value → enum
    pub fn from_db(v: i64) -> Option<Self> {
        match v {
            1 => Some(HalfDay::Morning),
            2 => Some(HalfDay::Afternoon),
            _ => None,
        }
    }

    /// Index of this half inside a day pair: 0 morning, 1 afternoon.
    pub fn slot(self) -> usize {
        match self {
            HalfDay::Morning => 0,
            HalfDay::Afternoon => 1,
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            HalfDay::Morning => "am",
            HalfDay::Afternoon => "pm",
        }
    }
}

/// One half-day site assignment of a worker in a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceEntry {
    pub worker_id: i64,
    pub week_id: i64,
    /// 0 = Monday … 5 = Saturday
    pub day: u8,
    pub half: HalfDay,
    pub site_id: i64,
    /// Row position in the source sheet.
    pub sort_order: i64,
}
