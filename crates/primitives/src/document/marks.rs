use std::collections::HashMap;

use crate::range::{CharIdx, CharLen};

/// Which way a mark moves when text is inserted exactly at its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
	/// The mark stays before the inserted text.
	Left,
	/// The mark moves after the inserted text.
	Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Mark {
	pub(super) offset: CharIdx,
	pub(super) bias: Bias,
}

/// Named marks, remapped through every edit.
#[derive(Debug, Clone, Default)]
pub(super) struct Marks {
	marks: HashMap<String, Mark>,
}

impl Marks {
	pub(super) fn get(&self, name: &str) -> Option<CharIdx> {
		self.marks.get(name).map(|m| m.offset)
	}

	pub(super) fn set(&mut self, name: &str, offset: CharIdx, bias: Bias) {
		self.marks.insert(name.to_string(), Mark { offset, bias });
	}

	/// Moves an existing mark, keeping its gravity. Returns false if unknown.
	pub(super) fn relocate(&mut self, name: &str, offset: CharIdx) -> bool {
		match self.marks.get_mut(name) {
			Some(mark) => {
				mark.offset = offset;
				true
			}
			None => false,
		}
	}

	pub(super) fn remove(&mut self, name: &str) -> Option<CharIdx> {
		self.marks.remove(name).map(|m| m.offset)
	}

	pub(super) fn map_insert(&mut self, at: CharIdx, len: CharLen) {
		for mark in self.marks.values_mut() {
			if mark.offset > at || (mark.offset == at && mark.bias == Bias::Right) {
				mark.offset += len;
			}
		}
	}

	pub(super) fn map_delete(&mut self, start: CharIdx, end: CharIdx) {
		let removed = end - start;
		for mark in self.marks.values_mut() {
			if mark.offset >= end {
				mark.offset -= removed;
			} else if mark.offset > start {
				mark.offset = start;
			}
		}
	}
}
