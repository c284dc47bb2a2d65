//! Cell value helpers: display-key resolution and spreadsheet number cleanup.

use serde_json::Value;

/// Display key used when a column does not configure one.
pub const DEFAULT_DISPLAY_KEY: &str = "text";

/// Resolves the value that should actually be displayed for a cell.
///
/// Keyed values (objects) carry several representations of one cell; the
/// one under `display_key` is shown. Returns `None` when there is nothing
/// to display: a blank value, or an object without the display key.
///
/// ```rust
/// use structured_report::value::resolve_display;
/// use serde_json::json;
///
/// let cell = json!({"text": "Ten", "sort": 10});
/// assert_eq!(resolve_display(&cell, "text"), Some(&json!("Ten")));
/// assert_eq!(resolve_display(&json!(""), "text"), None);
/// ```
pub fn resolve_display<'a>(value: &'a Value, display_key: &str) -> Option<&'a Value> {
    let display = match value {
        Value::Object(map) => map.get(display_key)?,
        other => other,
    };
    if is_blank(display) {
        None
    } else {
        Some(display)
    }
}

/// Returns `true` for values that render as an empty cell.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Keeps only digits, `.` and `-`, turning `"$1,234.50"` into `"1234.50"`.
pub fn numeric_text(formatted: &str) -> String {
    formatted
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}
