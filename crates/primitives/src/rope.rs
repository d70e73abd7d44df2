//! Rope utilities and extensions.

use ropey::RopeSlice;

use crate::range::CharLen;

/// Returns true for every char that ropey treats as ending a line.
#[inline]
pub fn is_line_break(c: char) -> bool {
	matches!(c, '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}

/// Returns the number of chars in `line` before its terminator.
pub fn content_len(line: RopeSlice) -> CharLen {
	line.chars().take_while(|&c| !is_line_break(c)).count()
}

/// Returns the line's text without its terminator.
pub fn content(line: RopeSlice) -> String {
	line.chars().take_while(|&c| !is_line_break(c)).collect()
}

/// Returns the run of non-breaking whitespace that starts the line.
pub fn leading_whitespace(line: RopeSlice) -> String {
	line.chars().take_while(|&c| c.is_whitespace() && !is_line_break(c)).collect()
}

/// Returns the length of the leading run of `ch` in the line.
pub fn leading_run(line: RopeSlice, ch: char) -> CharLen {
	line.chars().take_while(|&c| c == ch).count()
}
