use serde::Serialize;

/// Payroll snapshot of one worker for one week, as computed outside the system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PayrollEntry {
    pub salario: Option<i64>,
    pub bonus: Option<i64>,
    pub total: Option<i64>,
    pub comment: Option<String>,
}

impl PayrollEntry {
    pub fn display(value: Option<i64>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }
}
