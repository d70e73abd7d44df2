/// A position in the text, measured in characters (not bytes).
///
/// Every offset handed across a component boundary uses this space.
pub type CharIdx = usize;

/// A length or count in the text, measured in characters (not bytes).
pub type CharLen = usize;

/// A text span defined by anchor and head.
///
/// The anchor is the end that stays put (the `selection_bound` mark) and the
/// head is the caret (the `insert` mark).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Range {
	/// The fixed end.
	pub anchor: CharIdx,
	/// The moving end (caret).
	pub head: CharIdx,
}

impl Range {
	/// Creates a new range from anchor to head.
	pub const fn new(anchor: CharIdx, head: CharIdx) -> Self {
		Self { anchor, head }
	}

	/// Creates a zero-width range at `pos`.
	pub const fn point(pos: CharIdx) -> Self {
		Self::new(pos, pos)
	}

	/// Returns the smaller end.
	#[inline]
	pub fn start(&self) -> CharIdx {
		self.anchor.min(self.head)
	}

	/// Returns the larger end (exclusive).
	#[inline]
	pub fn end(&self) -> CharIdx {
		self.anchor.max(self.head)
	}

	/// Returns the number of chars covered.
	#[inline]
	pub fn len(&self) -> CharLen {
		self.end() - self.start()
	}

	/// Returns true for a caret without a selection.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.anchor == self.head
	}

	/// Returns true when the head sits before the anchor.
	#[inline]
	pub fn is_backward(&self) -> bool {
		self.head < self.anchor
	}

	/// Returns a new range with anchor and head swapped.
	pub fn flip(&self) -> Self {
		Self::new(self.head, self.anchor)
	}

	/// Applies a function to both ends.
	pub fn map(self, mut f: impl FnMut(CharIdx) -> CharIdx) -> Self {
		Self {
			anchor: f(self.anchor),
			head: f(self.head),
		}
	}

	/// Returns true if `pos` lies in `[start, end)`.
	pub fn contains(&self, pos: CharIdx) -> bool {
		pos >= self.start() && pos < self.end()
	}

	/// Clamps both ends to `[0, max_char]`.
	pub fn clamp(&self, max_char: CharIdx) -> Self {
		self.map(|pos| pos.min(max_char))
	}
}
