//! Default key handling of the text widget.
//!
//! This is what a key falls back to when no edit action claims it, and what
//! pass-through actions forward to.

use quill_primitives::{CharIdx, Document, EditError, Key, KeyCode};
use tracing::warn;

/// The widget's built-in key handling.
pub trait WidgetKeyHandler {
	/// Applies `key` to `doc`. Returns true if the key was consumed.
	fn handle_key(&mut self, doc: &mut Document, key: Key) -> bool;
}

/// Typing, deletion, and caret movement for a plain text buffer.
///
/// Shift extends the selection on movement keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextWidget;

impl WidgetKeyHandler for PlainTextWidget {
	fn handle_key(&mut self, doc: &mut Document, key: Key) -> bool {
		match apply(doc, key) {
			Ok(consumed) => consumed,
			Err(e) => {
				warn!(%key, error = %e, "Widget key handling failed");
				false
			}
		}
	}
}

fn apply(doc: &mut Document, key: Key) -> Result<bool, EditError> {
	if key.modifiers.ctrl || key.modifiers.alt || key.modifiers.meta {
		return Ok(false);
	}
	match key.code {
		KeyCode::Char(c) => type_text(doc, c.encode_utf8(&mut [0; 4])),
		KeyCode::Enter => type_text(doc, "\n"),
		KeyCode::Tab if !key.modifiers.shift => type_text(doc, "\t"),
		KeyCode::Backspace => erase(doc, |caret, _| caret.checked_sub(1).map(|start| (start, caret))),
		KeyCode::Delete => erase(doc, |caret, len| (caret < len).then_some((caret, caret + 1))),
		KeyCode::Left => move_caret(doc, key, |_, caret| Ok(caret.saturating_sub(1))),
		KeyCode::Right => move_caret(doc, key, |doc, caret| Ok((caret + 1).min(doc.len_chars()))),
		KeyCode::Up => move_caret(doc, key, |doc, caret| {
			let pos = doc.position(caret)?;
			if pos.line == 0 { Ok(0) } else { doc.offset_at(pos.line - 1, pos.column) }
		}),
		KeyCode::Down => move_caret(doc, key, |doc, caret| {
			let pos = doc.position(caret)?;
			if pos.line + 1 >= doc.len_lines() {
				Ok(doc.len_chars())
			} else {
				doc.offset_at(pos.line + 1, pos.column)
			}
		}),
		KeyCode::Home => move_caret(doc, key, |doc, caret| doc.line_start(doc.line_of(caret)?)),
		KeyCode::End => move_caret(doc, key, |doc, caret| {
			let line = doc.line_of(caret)?;
			Ok(doc.line_start(line)? + doc.line_len(line)?)
		}),
		_ => Ok(false),
	}
}

fn type_text(doc: &mut Document, text: &str) -> Result<bool, EditError> {
	doc.atomic(|doc| {
		if let Some((start, end)) = doc.selection_bounds() {
			doc.delete(start, end)?;
		}
		doc.insert_at_cursor(text)
	})?;
	Ok(true)
}

fn erase(doc: &mut Document, span: impl FnOnce(CharIdx, usize) -> Option<(CharIdx, CharIdx)>) -> Result<bool, EditError> {
	let (start, end) = match doc.selection_bounds() {
		Some(bounds) => bounds,
		None => match span(doc.cursor(), doc.len_chars()) {
			Some(bounds) => bounds,
			None => return Ok(true),
		},
	};
	doc.delete(start, end)?;
	Ok(true)
}

fn move_caret(doc: &mut Document, key: Key, target: impl FnOnce(&Document, CharIdx) -> Result<CharIdx, EditError>) -> Result<bool, EditError> {
	let caret = doc.cursor();
	let head = target(doc, caret)?;
	if key.modifiers.shift {
		let anchor = doc.selection().anchor;
		doc.select_range(anchor, head)?;
	} else {
		doc.place_cursor(head)?;
	}
	Ok(true)
}
