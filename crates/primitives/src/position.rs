use crate::range::CharIdx;

/// A document location in all three coordinate systems.
///
/// Positions are never stored across an edit: they are computed on demand by
/// [`Document::position`](crate::Document::position) from a canonical char
/// offset, so line, column and offset cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
	/// Zero-based line index.
	pub line: usize,
	/// Zero-based char column within the line.
	pub column: usize,
	/// Zero-based char offset from the start of the document.
	pub offset: CharIdx,
}

impl Position {
	/// Returns true when the position is the first column of its line.
	#[inline]
	pub fn starts_line(&self) -> bool {
		self.column == 0
	}

	/// Returns the one-based `(line, column)` pair used by symbol services.
	#[inline]
	pub fn one_based(&self) -> (usize, usize) {
		(self.line + 1, self.column + 1)
	}
}
