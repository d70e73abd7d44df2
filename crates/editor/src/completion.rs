//! Completion context tracking.
//!
//! [`CompletionContextTracker`] turns document events and focus changes into
//! [`ContextChange`] notifications for the completion popup, and
//! [`CompletionWidget`] is the read/write surface the popup uses.

use std::fmt;

use quill_primitives::{CharIdx, Document, DocumentEvent, EditError, INSERT_MARK, Position, ScreenPoint};
use tracing::trace;

/// Why the completion context became stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextChange {
	/// The caret mark was moved.
	CursorMoved,
	/// Text was inserted or deleted.
	TextChanged,
	/// The view lost keyboard focus.
	FocusLost,
}

/// Handle returned by [`CompletionContextTracker::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(ContextChange)>;

/// Relays context-change notifications to subscribers.
#[derive(Default)]
pub struct CompletionContextTracker {
	listeners: Vec<(SubscriptionId, Listener)>,
	next_id: u64,
}

impl fmt::Debug for CompletionContextTracker {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CompletionContextTracker")
			.field("listeners", &self.listeners.len())
			.finish_non_exhaustive()
	}
}

impl CompletionContextTracker {
	/// Creates a tracker with no subscribers.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `listener` for every subsequent change.
	pub fn subscribe(&mut self, listener: impl FnMut(ContextChange) + 'static) -> SubscriptionId {
		let id = SubscriptionId(self.next_id);
		self.next_id += 1;
		self.listeners.push((id, Box::new(listener)));
		id
	}

	/// Removes a listener. Returns false if it was not registered.
	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		let before = self.listeners.len();
		self.listeners.retain(|(listener_id, _)| *listener_id != id);
		self.listeners.len() != before
	}

	/// Returns the number of listeners.
	pub fn subscriber_count(&self) -> usize {
		self.listeners.len()
	}

	/// Notifies every listener in subscription order.
	pub fn notify(&mut self, change: ContextChange) {
		trace!(?change, listeners = self.listeners.len(), "Completion context changed");
		for (_, listener) in &mut self.listeners {
			listener(change);
		}
	}

	/// Forwards a document event if it invalidates the completion context.
	///
	/// Text changes and caret moves are relayed; other marks are ignored.
	pub fn relay(&mut self, event: &DocumentEvent) -> Option<ContextChange> {
		let change = match event {
			DocumentEvent::Changed { .. } => ContextChange::TextChanged,
			DocumentEvent::MarkSet { name } if name == INSERT_MARK => ContextChange::CursorMoved,
			DocumentEvent::MarkSet { .. } => return None,
		};
		self.notify(change);
		Some(change)
	}

	/// Signals that the view lost focus.
	pub fn focus_lost(&mut self) {
		self.notify(ContextChange::FocusLost);
	}
}

/// Where a completion request was triggered. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionContext {
	trigger: Position,
	anchor: ScreenPoint,
}

impl CompletionContext {
	/// Creates a context at `trigger`, with the popup anchored at `anchor`.
	pub fn new(trigger: Position, anchor: ScreenPoint) -> Self {
		Self { trigger, anchor }
	}

	/// Char offset where completion started.
	pub fn trigger_offset(&self) -> CharIdx {
		self.trigger.offset
	}

	/// Zero-based line of the trigger.
	pub fn trigger_line(&self) -> usize {
		self.trigger.line
	}

	/// Zero-based column of the trigger.
	pub fn trigger_column(&self) -> usize {
		self.trigger.column
	}

	/// Screen location below the trigger char.
	pub fn anchor(&self) -> ScreenPoint {
		self.anchor
	}
}

/// What a completion popup may ask of the editor.
pub trait CompletionWidget {
	/// Captures the context for a request triggered at `trigger_offset`.
	///
	/// Returns `None` when completion is disabled or the offset is invalid.
	fn create_completion_context(&self, trigger_offset: CharIdx) -> Option<CompletionContext>;

	/// Returns the text typed since the trigger.
	fn completion_text(&self, ctx: &CompletionContext) -> Result<String, EditError>;

	/// Replaces `partial_word` at the trigger with `complete_word`.
	fn set_completion_text(&mut self, ctx: &CompletionContext, partial_word: &str, complete_word: &str) -> Result<(), EditError>;

	/// Inserts text at the caret.
	fn insert_at_cursor(&mut self, text: &str) -> Result<(), EditError>;

	/// Returns the document length in chars.
	fn text_length(&self) -> usize;

	/// Returns the char at `offset`.
	fn char_at(&self, offset: CharIdx) -> Option<char>;

	/// Returns the text in `[start, end)`.
	fn text(&self, start: CharIdx, end: CharIdx) -> Result<String, EditError>;
}

/// Returns the text between the trigger and the caret.
///
/// Empty if the caret has moved before the trigger.
pub fn completion_text(doc: &Document, ctx: &CompletionContext) -> Result<String, EditError> {
	let start = ctx.trigger_offset();
	let caret = doc.cursor();
	if caret <= start {
		return Ok(String::new());
	}
	doc.text(start, caret)
}

/// Replaces `partial_word` at the trigger with `complete_word`, leaving the
/// caret after it. One undo step.
pub fn set_completion_text(doc: &mut Document, ctx: &CompletionContext, partial_word: &str, complete_word: &str) -> Result<(), EditError> {
	let start = ctx.trigger_offset();
	let end = (start + partial_word.chars().count()).min(doc.len_chars());
	doc.atomic(|doc| {
		doc.place_cursor(start)?;
		doc.delete(start, end)?;
		doc.insert_at_cursor(complete_word)
	})
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use pretty_assertions::assert_eq;

	use super::*;

	fn recording(tracker: &mut CompletionContextTracker) -> (SubscriptionId, Rc<RefCell<Vec<ContextChange>>>) {
		let log = Rc::new(RefCell::new(Vec::new()));
		let sink = log.clone();
		let id = tracker.subscribe(move |change| sink.borrow_mut().push(change));
		(id, log)
	}

	#[test]
	fn relays_text_and_caret_events_only() {
		let mut tracker = CompletionContextTracker::new();
		let (_, log) = recording(&mut tracker);
		let mut doc = Document::from("abc");
		doc.insert(0, "x").unwrap();
		doc.place_cursor(2).unwrap();
		doc.set_mark("bookmark", 1, quill_primitives::Bias::Left).unwrap();
		for event in doc.take_events() {
			tracker.relay(&event);
		}
		tracker.focus_lost();
		assert_eq!(
			*log.borrow(),
			vec![ContextChange::TextChanged, ContextChange::CursorMoved, ContextChange::FocusLost]
		);
	}

	#[test]
	fn unsubscribed_listener_is_silent() {
		let mut tracker = CompletionContextTracker::new();
		let (first, first_log) = recording(&mut tracker);
		let (_, second_log) = recording(&mut tracker);
		assert!(tracker.unsubscribe(first));
		assert!(!tracker.unsubscribe(first));
		tracker.notify(ContextChange::TextChanged);
		assert!(first_log.borrow().is_empty());
		assert_eq!(second_log.borrow().len(), 1);
		assert_eq!(tracker.subscriber_count(), 1);
	}

	#[test]
	fn completion_text_spans_trigger_to_caret() {
		let mut doc = Document::from("foo.ba");
		doc.place_cursor(6).unwrap();
		let ctx = CompletionContext::new(doc.position(4).unwrap(), ScreenPoint::default());
		assert_eq!(completion_text(&doc, &ctx).unwrap(), "ba");
		doc.place_cursor(2).unwrap();
		assert_eq!(completion_text(&doc, &ctx).unwrap(), "");
	}

	#[test]
	fn set_completion_text_replaces_partial_word() {
		let mut doc = Document::from("foo.ba;");
		doc.place_cursor(6).unwrap();
		let ctx = CompletionContext::new(doc.position(4).unwrap(), ScreenPoint::new(3, 4));
		assert_eq!((ctx.trigger_line(), ctx.trigger_column()), (0, 4));
		set_completion_text(&mut doc, &ctx, "ba", "bar()").unwrap();
		assert_eq!(doc.to_string(), "foo.bar();");
		assert_eq!(doc.cursor(), 9);
		assert!(doc.undo());
		assert_eq!(doc.to_string(), "foo.ba;");
	}
}
