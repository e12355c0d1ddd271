// src/export/model.rs

use crate::models::attendance::{DAY_NAMES, HalfDay};
use crate::models::week_view::WeekViewRow;

/// Column headers of a flat week export: name, two columns per day,
/// then the payroll block.
pub(crate) fn get_headers() -> Vec<String> {
    let mut headers = vec!["nombre".to_string()];
    for day in DAY_NAMES {
        for half in HalfDay::BOTH {
            headers.push(format!("{}_{}", day.to_lowercase(), half.short()));
        }
    }
    headers.extend(
        ["salario", "bonus", "total", "comentario"]
            .iter()
            .map(|h| h.to_string()),
    );
    headers
}

/// One worker line as a flat list of cells, in `get_headers` order.
pub(crate) fn row_to_record(row: &WeekViewRow) -> Vec<String> {
    let mut out = Vec::with_capacity(1 + row.slots.len() * 2 + 4);
    out.push(row.name.clone());
    for day in &row.slots {
        out.extend(day.iter().cloned());
    }
    out.push(row.salario.clone());
    out.push(row.bonus.clone());
    out.push(row.total.clone());
    out.push(row.comment.clone());
    out
}
