use crate::range::CharIdx;

/// One primitive replacement: `removed` was at `offset` and `inserted` took its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct EditRecord {
	pub(super) offset: CharIdx,
	pub(super) removed: String,
	pub(super) inserted: String,
}

/// Undo/redo stacks of edit groups.
///
/// Edits recorded while an atomic scope is open accumulate into one group;
/// outside a scope every edit is its own group.
#[derive(Debug, Clone, Default)]
pub(super) struct History {
	undo: Vec<Vec<EditRecord>>,
	redo: Vec<Vec<EditRecord>>,
	open: Vec<EditRecord>,
	/// Length of `open` when each nested scope began.
	scopes: Vec<usize>,
}

impl History {
	pub(super) fn record(&mut self, edit: EditRecord) {
		self.redo.clear();
		if self.in_atomic() {
			self.open.push(edit);
		} else {
			self.undo.push(vec![edit]);
		}
	}

	pub(super) fn begin(&mut self) {
		self.scopes.push(self.open.len());
	}

	/// Closes one nesting level. Returns false if no scope was open.
	pub(super) fn end(&mut self) -> bool {
		if self.scopes.pop().is_none() {
			return false;
		}
		self.close_group();
		true
	}

	/// Closes one nesting level and hands back the edits made inside it, in
	/// recording order, for the caller to revert. `None` if no scope was open.
	pub(super) fn abort(&mut self) -> Option<Vec<EditRecord>> {
		let start = self.scopes.pop()?;
		let aborted = self.open.split_off(start);
		self.close_group();
		Some(aborted)
	}

	fn close_group(&mut self) {
		if self.scopes.is_empty() && !self.open.is_empty() {
			self.undo.push(std::mem::take(&mut self.open));
		}
	}

	pub(super) fn in_atomic(&self) -> bool {
		!self.scopes.is_empty()
	}

	pub(super) fn pop_undo(&mut self) -> Option<Vec<EditRecord>> {
		if self.in_atomic() {
			return None;
		}
		self.undo.pop()
	}

	pub(super) fn pop_redo(&mut self) -> Option<Vec<EditRecord>> {
		if self.in_atomic() {
			return None;
		}
		self.redo.pop()
	}

	pub(super) fn push_undo(&mut self, group: Vec<EditRecord>) {
		self.undo.push(group);
	}

	pub(super) fn push_redo(&mut self, group: Vec<EditRecord>) {
		self.redo.push(group);
	}

	pub(super) fn undo_len(&self) -> usize {
		self.undo.len()
	}

	pub(super) fn redo_len(&self) -> usize {
		self.redo.len()
	}
}
