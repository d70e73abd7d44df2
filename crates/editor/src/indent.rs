//! Line-oriented indentation.
//!
//! [`IndentationEngine`] borrows a [`Document`] for the duration of one
//! operation. Line numbers are re-derived from marks after every edit, never
//! carried across one.

mod format;

pub use format::{DefaultFormattingStrategy, FormattingStrategy, find_opening_brace};
use quill_primitives::{Document, EditError, rope};
use tracing::{trace, trace_span, warn};

use crate::config::IndentOptions;

/// Indents, unindents, and selects whole lines of a document.
#[derive(Debug)]
pub struct IndentationEngine<'a> {
	doc: &'a mut Document,
	options: IndentOptions,
}

impl<'a> IndentationEngine<'a> {
	/// Creates an engine operating on `doc`.
	pub fn new(doc: &'a mut Document, options: IndentOptions) -> Self {
		Self { doc, options }
	}

	/// Returns one indent unit under the current policy.
	pub fn indent_string(&self) -> String {
		self.options.unit()
	}

	/// Indents or unindents the lines touched by the selection, or the caret
	/// line when nothing is selected.
	///
	/// With `require_line_selection`, a missing selection or one confined to a
	/// single line is left alone and false is returned. Unindent also returns
	/// false when it stopped at a line with no leading tab or space; lines
	/// before that one stay unindented. Empty lines never stop it: they are
	/// passed over untouched in both directions. All edits form one undo step, and an
	/// existing selection is widened to cover the affected lines afterwards.
	pub fn indent_selection(&mut self, unindent: bool, require_line_selection: bool) -> bool {
		let span = trace_span!("indent_selection", unindent, require_line_selection);
		let _guard = span.enter();
		match self.try_indent_selection(unindent, require_line_selection) {
			Ok(done) => done,
			Err(e) => {
				warn!(error = %e, "Indentation aborted");
				false
			}
		}
	}

	fn try_indent_selection(&mut self, unindent: bool, require_line_selection: bool) -> Result<bool, EditError> {
		let selection = self.doc.selection_bounds();
		let (y0, y1) = match selection {
			Some((start, end)) => {
				let y0 = self.doc.line_of(start)?;
				let end = self.doc.position(end)?;
				// A selection that ends at column 0 never touched that line.
				let y1 = if end.starts_line() && end.line > y0 { end.line - 1 } else { end.line };
				(y0, y1)
			}
			None if require_line_selection => return Ok(false),
			None => {
				let line = self.doc.cursor_position().line;
				(line, line)
			}
		};
		if require_line_selection && y0 == y1 {
			return Ok(false);
		}

		self.doc.begin_atomic();
		let result = if unindent {
			self.unindent_lines(y0, y1)
		} else {
			let unit = self.indent_string();
			self.indent_lines_with(y0, y1, &unit).map(|()| true)
		};
		self.doc.end_atomic()?;
		let completed = result?;

		if selection.is_some() {
			self.select_lines(y0, y1)?;
		}
		Ok(completed)
	}

	/// Inserts one indent unit at column 0 of every non-empty line in `y0..=y1`.
	pub fn indent_lines(&mut self, y0: usize, y1: usize) -> Result<(), EditError> {
		let unit = self.indent_string();
		self.indent_lines_with(y0, y1, &unit)
	}

	/// Inserts `indent` at column 0 of every non-empty line in `y0..=y1`.
	pub fn indent_lines_with(&mut self, y0: usize, y1: usize, indent: &str) -> Result<(), EditError> {
		for line in y0..=y1 {
			if self.doc.line_len(line)? == 0 {
				continue;
			}
			let start = self.doc.line_start(line)?;
			self.doc.insert(start, indent)?;
		}
		Ok(())
	}

	/// Removes one level of indentation from every line in `y0..=y1`.
	///
	/// A leading tab is removed whole; leading spaces are removed up to the tab
	/// width. Empty lines are skipped. Returns `Ok(false)` at the first
	/// non-empty line without a leading tab or space, leaving the lines before
	/// it modified.
	pub fn unindent_lines(&mut self, y0: usize, y1: usize) -> Result<bool, EditError> {
		for line in y0..=y1 {
			let slice = self.doc.line(line)?;
			let remove = match slice.chars().next() {
				Some('\t') => 1,
				Some(' ') => rope::leading_run(slice, ' ').min(self.options.tab_width),
				Some(c) if rope::is_line_break(c) => continue,
				None => continue,
				Some(_) => {
					trace!(line, "Unindent stopped at unindented line");
					return Ok(false);
				}
			};
			let start = self.doc.line_start(line)?;
			self.doc.delete(start, start + remove)?;
		}
		Ok(true)
	}

	/// Selects whole lines `y0..=y1`.
	///
	/// The caret goes to the start of `y0`; the selection bound goes to the
	/// start of the line after `y1`, or to the end of the document.
	pub fn select_lines(&mut self, y0: usize, y1: usize) -> Result<(), EditError> {
		let head = self.doc.line_start(y0)?;
		let anchor = if y1 + 1 < self.doc.len_lines() {
			self.doc.line_start(y1 + 1)?
		} else {
			self.doc.len_chars()
		};
		self.doc.select_range(anchor, head)
	}

	/// Returns the run of spaces and tabs that starts `line`.
	pub fn leading_whitespace(&self, line: usize) -> Result<String, EditError> {
		Ok(rope::leading_whitespace(self.doc.line(line)?))
	}

	/// Replaces the content of `line`, keeping its terminator.
	pub fn replace_line(&mut self, line: usize, text: &str) -> Result<(), EditError> {
		let start = self.doc.line_start(line)?;
		let len = self.doc.line_len(line)?;
		self.doc.atomic(|doc| {
			doc.delete(start, start + len)?;
			doc.insert(start, text)
		})
	}

	/// Deletes `line` together with its terminator as one undo step.
	pub fn delete_line(&mut self, line: usize) -> Result<(), EditError> {
		let start = self.doc.line_start(line)?;
		let end = if line + 1 < self.doc.len_lines() {
			self.doc.line_start(line + 1)?
		} else {
			self.doc.len_chars()
		};
		self.doc.atomic(|doc| doc.delete(start, end))
	}

	/// Re-indents `line` with `strategy`, returning the new indent width.
	pub fn format_line(&mut self, strategy: &dyn FormattingStrategy, line: usize) -> Result<usize, EditError> {
		strategy.indent_line(&mut *self.doc, line, &self.options)
	}
}
