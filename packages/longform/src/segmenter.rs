//! Splitting prompt text into independently generated segments.
//!
//! Line mode drops blank and whitespace-only lines and keeps every other line
//! verbatim, in order. A `\r` before the newline is stripped. If nothing but
//! blank lines remain, the whole text is returned as the single segment so a
//! run always has something to generate.

/// Split `text` into segments.
///
/// With `by_line == false` the result is always `[text]`, even for an empty
/// string.
pub fn split(text: &str, by_line: bool) -> Vec<String> {
    if !by_line {
        return vec![text.to_string()];
    }

    let lines = split_by_lines(text);
    if lines.is_empty() {
        vec![text.to_string()]
    } else {
        lines
    }
}

/// Non-blank lines of `text`, in order.
pub fn split_by_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
