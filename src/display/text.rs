//! Column helpers for terminal output
//!
//! Widths are counted in characters so that accented labels line up.

/// Number of characters in `s`
pub fn width(s: &str) -> usize {
    s.chars().count()
}

/// Right-align text in a field of given width
pub fn right_align(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(self::width(s));
    format!("{}{}", " ".repeat(fill), s)
}

/// Left-align text in a field of given width
pub fn left_align(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(self::width(s));
    format!("{}{}", s, " ".repeat(fill))
}
