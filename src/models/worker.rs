use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Worker {
    pub id: i64,
    /// First-seen spelling from the sheet, never rewritten by imports.
    pub display_name: String,
    /// Identity key: ordinal prefix stripped, trimmed, uppercased.
    pub normalized_name: String,
    pub cedula: Option<String>,
    pub active: bool,
}
