use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructionSite {
    pub id: i64,
    /// Raw token as written in the sheet.
    pub code: String,
    pub name: Option<String>,
    pub active: bool,
}

/// Display value of a site reference: name, then uppercased code,
/// then the numeric id, then empty.
pub fn site_label(name: Option<&str>, code: Option<&str>, id: Option<i64>) -> String {
    if let Some(n) = name.filter(|n| !n.is_empty()) {
        return n.to_string();
    }
    if let Some(c) = code.filter(|c| !c.is_empty()) {
        return c.to_uppercase();
    }
    match id {
        Some(id) if id != 0 => id.to_string(),
        _ => String::new(),
    }
}
