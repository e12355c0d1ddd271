//! Cleanup of free-text cells coming from hand-edited sheets.

use regex::Regex;
use std::sync::OnceLock;

/// Leading row numbering such as `3.`, `12 -`, `7 `.
fn ordinal_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*[0-9]+[.\-\s]*").expect("ordinal prefix regex"))
}

fn digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+").expect("digits regex"))
}

/// Remove the leading ordinal prefix and surrounding whitespace, keeping the
/// original casing. This is the display form of a worker name.
///
/// `"3. Juan Pérez "` → `"Juan Pérez"`
pub fn strip_ordinal(raw: &str) -> String {
    ordinal_prefix_re()
        .replace(raw.trim(), "")
        .trim()
        .to_string()
}

/// Canonical identity key of a worker: ordinal prefix stripped, trimmed,
/// uppercased. Never fails.
///
/// `"3. John Doe"`, `" john doe "` and `"JOHN DOE"` all give `"JOHN DOE"`.
pub fn normalize_worker_name(raw: &str) -> String {
    strip_ordinal(raw).to_uppercase()
}

/// A data row belongs to a worker only if its name cell still holds a letter
/// once the numbering is gone.
pub fn is_worker_row_name(display_name: &str) -> bool {
    display_name.chars().any(char::is_alphabetic)
}

/// Extract an amount from a currency-like cell.
///
/// All digit runs are concatenated and parsed as one integer; everything
/// else (symbols, separators, text) is discarded. This is lossy: there is no
/// decimal point, `"$1,234.56"` and `"1234 56"` both give `123456`.
///
/// Returns `None` for an absent or empty cell, a cell without digits, and a
/// digit string too large for a 64-bit signed integer.
pub fn parse_money(raw: Option<&str>) -> Option<i64> {
    let value = raw?;
    if value.is_empty() {
        return None;
    }

    let digits: String = digits_re()
        .find_iter(value)
        .map(|m| m.as_str())
        .collect();

    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok()
}
