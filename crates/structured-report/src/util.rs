//! Display-width measurement and padding for fixed-width output.
//!
//! Widths are terminal columns, so wide (CJK) characters count as two.

use unicode_width::UnicodeWidthStr;

/// Returns the display width of a string.
///
/// ```rust
/// use structured_report::util::display_width;
///
/// assert_eq!(display_width("hello"), 5);
/// assert_eq!(display_width("日本"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Pads a string on the left (right-aligns) to reach the target width.
///
/// Strings already at or beyond `width` are returned unchanged.
///
/// ```rust
/// use structured_report::util::pad_left;
///
/// assert_eq!(pad_left("42", 5), "   42");
/// assert_eq!(pad_left("hello", 3), "hello");
/// ```
pub fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", " ".repeat(fill), s)
}

/// Pads a string on the right (left-aligns) to reach the target width.
///
/// ```rust
/// use structured_report::util::pad_right;
///
/// assert_eq!(pad_right("42", 5), "42   ");
/// assert_eq!(pad_right("hello", 3), "hello");
/// ```
pub fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(fill))
}
