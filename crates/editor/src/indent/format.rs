use quill_primitives::{CharIdx, Document, EditError, rope};
use ropey::Rope;

use crate::config::IndentOptions;

/// Decides how far a single line is indented.
pub trait FormattingStrategy {
	/// Rewrites the leading whitespace of `line` and returns its new length in chars.
	fn indent_line(&self, doc: &mut Document, line: usize, options: &IndentOptions) -> Result<usize, EditError>;
}

/// Copies the indentation of the previous non-blank line.
///
/// In smart mode a line after one ending in `{` gains a level, and a line
/// starting with `}` is aligned with the line holding its matching `{`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormattingStrategy {
	/// Enables the brace rules.
	pub smart: bool,
}

impl DefaultFormattingStrategy {
	/// Creates a strategy that only copies indentation.
	pub fn auto() -> Self {
		Self { smart: false }
	}

	/// Creates a strategy that also follows braces.
	pub fn smart() -> Self {
		Self { smart: true }
	}

	fn desired_indent(&self, doc: &Document, line: usize, options: &IndentOptions) -> Result<String, EditError> {
		let current = doc.line_text(line)?;
		let body = current.trim_start_matches([' ', '\t']);

		if self.smart && body.starts_with('}') {
			let brace = doc.line_start(line)? + (current.chars().count() - body.chars().count());
			if let Some(open) = find_opening_brace(doc.rope(), brace) {
				return Ok(rope::leading_whitespace(doc.line(doc.line_of(open)?)?));
			}
		}

		let mut previous = None;
		for candidate in (0..line).rev() {
			if !doc.line_text(candidate)?.trim().is_empty() {
				previous = Some(candidate);
				break;
			}
		}
		let Some(previous) = previous else {
			return Ok(String::new());
		};

		let mut indent = rope::leading_whitespace(doc.line(previous)?);
		if self.smart && doc.line_text(previous)?.trim_end().ends_with('{') {
			indent.push_str(&options.unit());
		}
		Ok(indent)
	}
}

impl FormattingStrategy for DefaultFormattingStrategy {
	fn indent_line(&self, doc: &mut Document, line: usize, options: &IndentOptions) -> Result<usize, EditError> {
		let indent = self.desired_indent(doc, line, options)?;
		let start = doc.line_start(line)?;
		let existing = rope::leading_whitespace(doc.line(line)?).chars().count();
		if doc.text(start, start + existing)? != indent {
			doc.atomic(|doc| {
				doc.delete(start, start + existing)?;
				doc.insert(start, &indent)
			})?;
		}
		Ok(indent.chars().count())
	}
}

/// Finds the `{` that the `}` at `close` closes, skipping balanced pairs.
pub fn find_opening_brace(text: &Rope, close: CharIdx) -> Option<CharIdx> {
	if close > text.len_chars() {
		return None;
	}
	let mut depth = 0usize;
	let mut pos = close;
	let mut chars = text.chars_at(close);
	while let Some(c) = chars.prev() {
		pos -= 1;
		match c {
			'}' => depth += 1,
			'{' if depth == 0 => return Some(pos),
			'{' => depth -= 1,
			_ => {}
		}
	}
	None
}
