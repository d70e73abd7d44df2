use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use quill_editor::{CompletionWidget, ContextChange, EditorOptions};
use quill_primitives::{Key, ScreenPoint};

use crate::common::{CW, LH, Symbols, view, view_with};

#[test]
fn context_anchors_below_trigger_cell() {
	let (view, _) = view("a\n  b");
	let ctx = view.create_completion_context(4).unwrap();
	assert_eq!((ctx.trigger_line(), ctx.trigger_column(), ctx.trigger_offset()), (1, 2, 4));
	assert_eq!(ctx.anchor(), ScreenPoint::new(2 * CW, LH + LH));
	assert!(view.create_completion_context(99).is_none());
}

#[test]
fn disabled_completion_creates_no_context() {
	let options = EditorOptions::from_toml_str("enable_code_completion = false").unwrap();
	let (view, _) = view_with("abc", Symbols::parsed(), options);
	assert_eq!(view.create_completion_context(1), None);
}

#[test]
fn typed_word_is_replaced_by_completion() {
	let (mut view, _) = view("console.");
	let ctx = view.create_completion_context(8).unwrap();
	view.core_mut().doc_mut().place_cursor(8).unwrap();
	view.key_press(Key::char('W'));
	view.key_press(Key::char('r'));
	assert_eq!(view.completion_text(&ctx).unwrap(), "Wr");

	let log = Rc::new(RefCell::new(Vec::new()));
	let sink = log.clone();
	view.tracker_mut().subscribe(move |change| sink.borrow_mut().push(change));
	view.set_completion_text(&ctx, "Wr", "WriteLine").unwrap();

	assert_eq!(view.document().to_string(), "console.WriteLine");
	assert_eq!(view.document().cursor(), 17);
	assert_eq!(
		*log.borrow(),
		vec![ContextChange::CursorMoved, ContextChange::TextChanged, ContextChange::TextChanged]
	);

	assert!(view.core_mut().doc_mut().undo());
	assert_eq!(view.document().to_string(), "console.Wr");
}

#[test]
fn caret_before_trigger_gives_empty_text() {
	let (view, _) = view("abc");
	let ctx = view.create_completion_context(2).unwrap();
	assert_eq!(view.completion_text(&ctx).unwrap(), "");
}

#[test]
fn buffer_queries_and_insertion() {
	let (mut view, _) = view("héllo");
	assert_eq!(view.text_length(), 5);
	assert_eq!(view.char_at(1), Some('é'));
	assert_eq!(view.char_at(5), None);
	assert_eq!(view.text(1, 3).unwrap(), "él");
	assert!(view.text(3, 9).is_err());

	let log = Rc::new(RefCell::new(Vec::new()));
	let sink = log.clone();
	view.tracker_mut().subscribe(move |change| sink.borrow_mut().push(change));
	view.insert_at_cursor("¡").unwrap();
	view.focus_out();
	assert_eq!(view.document().to_string(), "¡héllo");
	assert_eq!(*log.borrow(), vec![ContextChange::TextChanged, ContextChange::FocusLost]);
}
