/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Returns GREY when the field is empty (None or ""), RESET otherwise.
pub fn color_for_optional_field<T: AsRef<str>>(value: Option<T>) -> &'static str {
    match value {
        Some(v) if !v.as_ref().trim().is_empty() => RESET,
        _ => GREY,
    }
}

/// Active rows in green, inactive ones greyed out.
pub fn colorize_active(active: bool) -> String {
    if active {
        format!("{GREEN}yes{RESET}")
    } else {
        format!("{GREY}no{RESET}")
    }
}

/// `★★★☆☆` for a 1–5 rating.
pub fn stars(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    format!("{YELLOW}{}{RESET}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
