//! Mapping between screen coordinates and document offsets.

use quill_primitives::{CharIdx, Document, ScreenPoint, ScreenRect, rope};

/// The rendering collaborator's view of where text sits on screen.
pub trait ViewLayout {
	/// Returns the offset of the char under `pointer`.
	///
	/// Points right of a line's end map to the end of that line; points
	/// outside the text area map to `None`.
	fn offset_at(&self, doc: &Document, pointer: ScreenPoint) -> Option<CharIdx>;

	/// Returns the screen cell of the char at `offset`.
	fn location_of(&self, doc: &Document, offset: CharIdx) -> Option<ScreenRect>;
}

/// Fixed-size cells with tab stops every `tab_width` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceLayout {
	/// Cell width in pixels.
	pub char_width: u32,
	/// Line height in pixels.
	pub line_height: u32,
	/// Columns per tab stop.
	pub tab_width: usize,
	/// Screen position of line 0, column 0; moves when the view scrolls.
	pub origin: ScreenPoint,
}

impl Default for MonospaceLayout {
	fn default() -> Self {
		Self {
			char_width: 8,
			line_height: 16,
			tab_width: 4,
			origin: ScreenPoint::default(),
		}
	}
}

impl MonospaceLayout {
	fn cells(&self, c: char, column: usize) -> usize {
		if c == '\t' {
			let stop = self.tab_width.max(1);
			stop - column % stop
		} else {
			1
		}
	}
}

impl ViewLayout for MonospaceLayout {
	fn offset_at(&self, doc: &Document, pointer: ScreenPoint) -> Option<CharIdx> {
		let y = pointer.y.checked_sub(self.origin.y)?;
		if y < 0 || self.line_height == 0 {
			return None;
		}
		let line = y as usize / self.line_height as usize;
		if line >= doc.len_lines() {
			return None;
		}
		let start = doc.line_start(line).ok()?;
		let x = pointer.x.saturating_sub(self.origin.x).max(0) as usize;
		let char_width = self.char_width.max(1) as usize;

		let slice = doc.line(line).ok()?;
		let mut column = 0;
		for (i, c) in slice.chars().take(rope::content_len(slice)).enumerate() {
			let next = column + self.cells(c, column);
			if x < next * char_width {
				return Some(start + i);
			}
			column = next;
		}
		Some(start + rope::content_len(slice))
	}

	fn location_of(&self, doc: &Document, offset: CharIdx) -> Option<ScreenRect> {
		let pos = doc.position(offset).ok()?;
		let slice = doc.line(pos.line).ok()?;
		let mut column = 0;
		for c in slice.chars().take(pos.column) {
			column += self.cells(c, column);
		}
		let width = doc.char_at(offset).map_or(1, |c| if rope::is_line_break(c) { 1 } else { self.cells(c, column) });
		let x = self.origin.x.saturating_add((column * self.char_width as usize) as i32);
		let y = self.origin.y.saturating_add((pos.line * self.line_height as usize) as i32);
		Some(ScreenRect {
			origin: ScreenPoint::new(x, y),
			width: (width as u32).saturating_mul(self.char_width),
			height: self.line_height,
		})
	}
}
