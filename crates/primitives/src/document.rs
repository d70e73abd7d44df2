//! Rope-backed document facade.
//!
//! [`Document`] owns the text and every named mark. Other components hold
//! only transient offsets and re-query after each edit.
//!
//! # Marks
//!
//! Two marks always exist: [`INSERT_MARK`] (the caret) and
//! [`SELECTION_BOUND_MARK`]. The selection is the span between them. Extra
//! marks can be placed to follow a location through later edits.
//!
//! # Atomic edits
//!
//! Mutations between [`Document::begin_atomic`] and the matching
//! [`Document::end_atomic`] are undone as a single step. Scopes nest; only the
//! outermost one closes the undo group.
//!
//! # Change feed
//!
//! Mutations and explicit mark moves are queued as [`DocumentEvent`]s and
//! drained with [`Document::take_events`]. Marks that shift because text moved
//! under them do not produce events.
//!
//! The queue is unbounded and only shrinks through `take_events`. Whoever
//! owns a document must drain it, even when nothing listens.

mod history;
mod marks;

use std::fmt;

pub use marks::Bias;
use ropey::{Rope, RopeSlice};
use tracing::trace;

use self::history::{EditRecord, History};
use self::marks::Marks;
use crate::edit::EditError;
use crate::position::Position;
use crate::range::{CharIdx, CharLen, Range};
use crate::rope;

/// Name of the caret mark.
pub const INSERT_MARK: &str = "insert";

/// Name of the mark at the fixed end of the selection.
pub const SELECTION_BOUND_MARK: &str = "selection_bound";

/// Something observable happened to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
	/// Text was replaced at `start`.
	Changed {
		/// Char offset of the change.
		start: CharIdx,
		/// Number of chars removed.
		removed: CharLen,
		/// Number of chars inserted.
		inserted: CharLen,
	},
	/// A mark was explicitly moved or created.
	MarkSet {
		/// Mark name.
		name: String,
	},
}

/// Line/column/offset addressable text with marks and undo history.
#[derive(Debug, Clone)]
pub struct Document {
	text: Rope,
	marks: Marks,
	history: History,
	events: Vec<DocumentEvent>,
	version: u64,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl From<&str> for Document {
	fn from(text: &str) -> Self {
		Self::with_text(text)
	}
}

impl fmt::Display for Document {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for chunk in self.text.chunks() {
			f.write_str(chunk)?;
		}
		Ok(())
	}
}

impl Document {
	/// Creates an empty document with the caret at offset 0.
	pub fn new() -> Self {
		Self::with_text("")
	}

	/// Creates a document holding `text` with the caret at offset 0.
	pub fn with_text(text: &str) -> Self {
		let mut marks = Marks::default();
		marks.set(INSERT_MARK, 0, Bias::Right);
		marks.set(SELECTION_BOUND_MARK, 0, Bias::Right);
		Self {
			text: Rope::from(text),
			marks,
			history: History::default(),
			events: Vec::new(),
			version: 0,
		}
	}

	/// Returns the underlying rope.
	pub fn rope(&self) -> &Rope {
		&self.text
	}

	/// Returns the number of chars.
	pub fn len_chars(&self) -> CharLen {
		self.text.len_chars()
	}

	/// Returns the number of lines, counting the empty line after a trailing newline.
	pub fn len_lines(&self) -> usize {
		self.text.len_lines()
	}

	/// Returns true if the document holds no text.
	pub fn is_empty(&self) -> bool {
		self.text.len_chars() == 0
	}

	/// Returns a counter bumped by every mutation.
	pub fn version(&self) -> u64 {
		self.version
	}

	/// Returns the char at `offset`, or `None` at or past the end.
	pub fn char_at(&self, offset: CharIdx) -> Option<char> {
		(offset < self.text.len_chars()).then(|| self.text.char(offset))
	}

	/// Returns the text in `[start, end)`.
	pub fn text(&self, start: CharIdx, end: CharIdx) -> Result<String, EditError> {
		self.check_range(start, end)?;
		Ok(self.text.slice(start..end).to_string())
	}

	/// Computes the full position of a char offset.
	pub fn position(&self, offset: CharIdx) -> Result<Position, EditError> {
		self.check_offset(offset)?;
		let line = self.text.char_to_line(offset);
		let column = offset - self.text.line_to_char(line);
		Ok(Position { line, column, offset })
	}

	/// Returns the line containing `offset`.
	pub fn line_of(&self, offset: CharIdx) -> Result<usize, EditError> {
		self.check_offset(offset)?;
		Ok(self.text.char_to_line(offset))
	}

	/// Returns the offset of `(line, column)`.
	///
	/// `column` is clamped to the line's content, so a column past the end of
	/// the line lands before its terminator.
	pub fn offset_at(&self, line: usize, column: usize) -> Result<CharIdx, EditError> {
		let start = self.line_start(line)?;
		Ok(start + column.min(self.line_len(line)?))
	}

	/// Returns the offset of the first char of `line`.
	pub fn line_start(&self, line: usize) -> Result<CharIdx, EditError> {
		self.check_line(line)?;
		Ok(self.text.line_to_char(line))
	}

	/// Returns the number of chars on `line`, excluding its terminator.
	pub fn line_len(&self, line: usize) -> Result<CharLen, EditError> {
		Ok(rope::content_len(self.line(line)?))
	}

	/// Returns the text of `line`, excluding its terminator.
	pub fn line_text(&self, line: usize) -> Result<String, EditError> {
		Ok(rope::content(self.line(line)?))
	}

	/// Returns `line` as a rope slice, terminator included.
	pub fn line(&self, line: usize) -> Result<RopeSlice<'_>, EditError> {
		self.check_line(line)?;
		Ok(self.text.line(line))
	}

	/// Inserts `text` at `offset`.
	pub fn insert(&mut self, offset: CharIdx, text: &str) -> Result<(), EditError> {
		self.check_offset(offset)?;
		if text.is_empty() {
			return Ok(());
		}
		self.apply_insert(offset, text);
		self.history.record(EditRecord {
			offset,
			removed: String::new(),
			inserted: text.to_string(),
		});
		Ok(())
	}

	/// Deletes the chars in `[start, end)`.
	pub fn delete(&mut self, start: CharIdx, end: CharIdx) -> Result<(), EditError> {
		self.check_range(start, end)?;
		if start == end {
			return Ok(());
		}
		let removed = self.apply_delete(start, end);
		self.history.record(EditRecord {
			offset: start,
			removed,
			inserted: String::new(),
		});
		Ok(())
	}

	/// Inserts `text` at the caret; the caret ends up after it.
	pub fn insert_at_cursor(&mut self, text: &str) -> Result<(), EditError> {
		self.insert(self.cursor(), text)
	}

	/// Returns the offset of a named mark.
	pub fn mark(&self, name: &str) -> Option<CharIdx> {
		self.marks.get(name)
	}

	/// Creates or replaces a named mark.
	pub fn set_mark(&mut self, name: &str, offset: CharIdx, bias: Bias) -> Result<(), EditError> {
		self.check_offset(offset)?;
		self.marks.set(name, offset, bias);
		self.events.push(DocumentEvent::MarkSet { name: name.to_string() });
		Ok(())
	}

	/// Moves an existing mark, keeping its gravity.
	pub fn move_mark(&mut self, name: &str, offset: CharIdx) -> Result<(), EditError> {
		self.check_offset(offset)?;
		if !self.marks.relocate(name, offset) {
			return Err(EditError::UnknownMark(name.to_string()));
		}
		self.events.push(DocumentEvent::MarkSet { name: name.to_string() });
		Ok(())
	}

	/// Removes a named mark. The caret and selection-bound marks cannot be removed.
	pub fn remove_mark(&mut self, name: &str) -> Option<CharIdx> {
		if name == INSERT_MARK || name == SELECTION_BOUND_MARK {
			return None;
		}
		self.marks.remove(name)
	}

	/// Returns the caret offset.
	pub fn cursor(&self) -> CharIdx {
		self.marks.get(INSERT_MARK).unwrap_or(0)
	}

	/// Returns the caret position.
	pub fn cursor_position(&self) -> Position {
		let offset = self.cursor().min(self.len_chars());
		let line = self.text.char_to_line(offset);
		Position {
			line,
			column: offset - self.text.line_to_char(line),
			offset,
		}
	}

	/// Returns the selection as anchor (selection bound) and head (caret).
	pub fn selection(&self) -> Range {
		Range::new(self.marks.get(SELECTION_BOUND_MARK).unwrap_or(0), self.cursor())
	}

	/// Returns the ordered bounds of a non-empty selection.
	pub fn selection_bounds(&self) -> Option<(CharIdx, CharIdx)> {
		let sel = self.selection();
		(!sel.is_empty()).then(|| (sel.start(), sel.end()))
	}

	/// Returns true if some text is selected.
	pub fn has_selection(&self) -> bool {
		!self.selection().is_empty()
	}

	/// Moves the caret and collapses the selection.
	pub fn place_cursor(&mut self, offset: CharIdx) -> Result<(), EditError> {
		self.select_range(offset, offset)
	}

	/// Selects from `anchor` to `head`; the caret ends at `head`.
	pub fn select_range(&mut self, anchor: CharIdx, head: CharIdx) -> Result<(), EditError> {
		self.check_offset(anchor)?;
		self.check_offset(head)?;
		self.move_mark(INSERT_MARK, head)?;
		self.move_mark(SELECTION_BOUND_MARK, anchor)
	}

	/// Opens an atomic edit scope.
	pub fn begin_atomic(&mut self) {
		self.history.begin();
	}

	/// Closes the innermost atomic edit scope.
	pub fn end_atomic(&mut self) -> Result<(), EditError> {
		if self.history.end() {
			Ok(())
		} else {
			Err(EditError::UnbalancedAtomicEdit)
		}
	}

	/// Closes the innermost atomic edit scope, reverting every edit made
	/// inside it. The reverted edits leave no undo step behind.
	pub fn abort_atomic(&mut self) -> Result<(), EditError> {
		let Some(aborted) = self.history.abort() else {
			return Err(EditError::UnbalancedAtomicEdit);
		};
		if !aborted.is_empty() {
			trace!(edits = aborted.len(), "Rolling back atomic edit");
		}
		self.revert(&aborted);
		Ok(())
	}

	/// Runs `f` inside an atomic edit scope.
	pub fn atomic<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
		self.history.begin();
		let result = f(self);
		self.history.end();
		result
	}

	/// Returns true while an atomic scope is open.
	pub fn in_atomic(&self) -> bool {
		self.history.in_atomic()
	}

	/// Returns true if there is an edit group to undo.
	pub fn can_undo(&self) -> bool {
		self.history.undo_len() > 0
	}

	/// Returns true if there is an undone group to reapply.
	pub fn can_redo(&self) -> bool {
		self.history.redo_len() > 0
	}

	/// Reverts the most recent edit group. Returns false if there was none.
	///
	/// Refused while an atomic scope is open.
	pub fn undo(&mut self) -> bool {
		let Some(group) = self.history.pop_undo() else {
			return false;
		};
		trace!(edits = group.len(), "Undoing edit group");
		self.revert(&group);
		self.history.push_redo(group);
		true
	}

	/// Reapplies the most recently undone group. Returns false if there was none.
	pub fn redo(&mut self) -> bool {
		let Some(group) = self.history.pop_redo() else {
			return false;
		};
		trace!(edits = group.len(), "Redoing edit group");
		for edit in &group {
			let removed_len = edit.removed.chars().count();
			if removed_len > 0 {
				self.apply_delete(edit.offset, edit.offset + removed_len);
			}
			if !edit.inserted.is_empty() {
				self.apply_insert(edit.offset, &edit.inserted);
			}
		}
		self.history.push_undo(group);
		true
	}

	fn revert(&mut self, group: &[EditRecord]) {
		for edit in group.iter().rev() {
			let inserted_len = edit.inserted.chars().count();
			if inserted_len > 0 {
				self.apply_delete(edit.offset, edit.offset + inserted_len);
			}
			if !edit.removed.is_empty() {
				self.apply_insert(edit.offset, &edit.removed);
			}
		}
	}

	/// Drains queued change notifications.
	pub fn take_events(&mut self) -> Vec<DocumentEvent> {
		std::mem::take(&mut self.events)
	}

	fn apply_insert(&mut self, offset: CharIdx, text: &str) {
		let len = text.chars().count();
		self.text.insert(offset, text);
		self.marks.map_insert(offset, len);
		self.version += 1;
		self.events.push(DocumentEvent::Changed {
			start: offset,
			removed: 0,
			inserted: len,
		});
	}

	fn apply_delete(&mut self, start: CharIdx, end: CharIdx) -> String {
		let removed = self.text.slice(start..end).to_string();
		self.text.remove(start..end);
		self.marks.map_delete(start, end);
		self.version += 1;
		self.events.push(DocumentEvent::Changed {
			start,
			removed: end - start,
			inserted: 0,
		});
		removed
	}

	fn check_offset(&self, offset: CharIdx) -> Result<(), EditError> {
		let len = self.text.len_chars();
		if offset > len {
			return Err(EditError::OffsetOutOfRange { offset, len });
		}
		Ok(())
	}

	fn check_range(&self, start: CharIdx, end: CharIdx) -> Result<(), EditError> {
		if start > end {
			return Err(EditError::InvalidRange { start, end });
		}
		self.check_offset(end)
	}

	fn check_line(&self, line: usize) -> Result<(), EditError> {
		let lines = self.text.len_lines();
		if line >= lines {
			return Err(EditError::LineOutOfRange { line, lines });
		}
		Ok(())
	}
}
