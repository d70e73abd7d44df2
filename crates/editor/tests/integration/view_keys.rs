use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use quill_editor::{ContextChange, EditorCore};
use quill_input::{ActionError, ActionTable, FnAction, KeyPressExtension};
use quill_primitives::{Key, KeyCode, MouseButton};

use crate::common::{cell, view};

fn changes(view: &mut quill_editor::SourceView<crate::common::Symbols>) -> Rc<RefCell<Vec<ContextChange>>> {
	let log = Rc::new(RefCell::new(Vec::new()));
	let sink = log.clone();
	view.tracker_mut().subscribe(move |change| sink.borrow_mut().push(change));
	log
}

#[test]
fn tab_expands_template_in_indented_context() {
	let (mut view, _) = view("class A {\n    if");
	view.core_mut().doc_mut().place_cursor(16).unwrap();
	view.flush_events();

	assert!(view.key_press(Key::new(KeyCode::Tab)));
	assert_eq!(view.document().to_string(), "class A {\n    if () {\n    \t\n    }");
	assert_eq!(view.document().cursor(), 18);
}

#[test]
fn tab_then_shift_tab_round_trips_a_line_block() {
	let (mut view, _) = view("\ta\n\tb\nc");
	view.core_mut().doc_mut().select_range(0, 6).unwrap();
	assert!(view.key_press(Key::new(KeyCode::Tab)));
	assert_eq!(view.document().to_string(), "\t\ta\n\t\tb\nc");
	assert!(view.key_press(Key::new(KeyCode::Tab).shift()));
	assert_eq!(view.document().to_string(), "\ta\n\tb\nc");
}

#[test]
fn typing_notifies_completion_listeners() {
	let (mut view, _) = view("");
	let log = changes(&mut view);
	view.key_press(Key::char('a'));
	view.key_press(Key::new(KeyCode::Left));
	view.focus_out();
	assert_eq!(
		*log.borrow(),
		vec![ContextChange::TextChanged, ContextChange::CursorMoved, ContextChange::FocusLost]
	);
}

#[test]
fn failing_action_falls_back_to_widget() {
	let (mut view, _) = view("");
	view.actions_mut().rebind(
		Key::char('z'),
		FnAction::new("always_fails", |_: &mut EditorCore| {
			Err(ActionError::Failed {
				action: "always_fails".into(),
				reason: "test".into(),
			})
		}),
	);
	assert!(view.key_press(Key::char('z')), "the widget typed the key");
	assert_eq!(view.document().to_string(), "z");
}

#[test]
fn pass_through_action_brackets_execute() {
	let (mut view, _) = view("");
	view.actions_mut().rebind(
		Key::char('('),
		FnAction::new("mark", |core: &mut EditorCore| {
			core.doc_mut().insert_at_cursor("|")?;
			Ok(())
		})
		.pass_through(true),
	);
	assert!(view.key_press(Key::char('(')));
	assert_eq!(view.document().to_string(), "(|(");
}

#[test]
fn failing_pass_through_action_types_the_key_once() {
	let (mut view, _) = view("");
	view.actions_mut().rebind(
		Key::char('('),
		FnAction::new("close_paren", |_: &mut EditorCore| {
			Err(ActionError::Failed {
				action: "close_paren".into(),
				reason: "test".into(),
			})
		})
		.pass_through(true),
	);
	assert!(view.key_press(Key::char('(')));
	assert_eq!(view.document().to_string(), "(");
}

#[test]
fn failing_action_leaves_only_the_widget_edit() {
	let (mut view, _) = view("ab");
	view.core_mut().doc_mut().place_cursor(1).unwrap();
	view.actions_mut().rebind(
		Key::char('z'),
		FnAction::new("half_done", |core: &mut EditorCore| {
			core.doc_mut().insert_at_cursor("PARTIAL")?;
			core.doc_mut().delete(0, 1)?;
			Err(ActionError::Failed {
				action: "half_done".into(),
				reason: "test".into(),
			})
		}),
	);
	let log = changes(&mut view);

	assert!(view.key_press(Key::char('z')));
	assert_eq!(view.document().to_string(), "azb");
	assert_eq!(view.document().cursor(), 2);
	assert!(view.core_mut().doc_mut().undo());
	assert_eq!(view.document().to_string(), "ab");
	assert!(!view.core().doc().can_undo(), "the rolled back edits leave no undo step");
	assert!(log.borrow().contains(&ContextChange::TextChanged));
}

struct Swallow {
	keys: Rc<RefCell<Vec<Key>>>,
	caret_moves: Rc<RefCell<usize>>,
}

impl KeyPressExtension<EditorCore> for Swallow {
	fn key_press(&mut self, _ctx: &mut EditorCore, _table: &ActionTable<EditorCore>, key: Key) -> bool {
		self.keys.borrow_mut().push(key);
		true
	}

	fn cursor_position_changed(&mut self) {
		*self.caret_moves.borrow_mut() += 1;
	}
}

#[test]
fn extension_owns_dispatch_while_attached() {
	let (mut view, _) = view("x");
	let keys = Rc::new(RefCell::new(Vec::new()));
	let caret_moves = Rc::new(RefCell::new(0));
	view.attach_extension(Swallow {
		keys: keys.clone(),
		caret_moves: caret_moves.clone(),
	});

	assert!(view.key_press(Key::new(KeyCode::Tab)));
	assert_eq!(view.document().to_string(), "x");
	assert_eq!(*keys.borrow(), vec![Key::new(KeyCode::Tab)]);

	view.button_press(cell(0, 1), MouseButton::Primary);
	assert_eq!(*caret_moves.borrow(), 1);

	assert!(view.detach_extension().is_some());
	view.key_press(Key::new(KeyCode::Tab));
	assert_eq!(view.document().to_string(), "x\t");
}

#[test]
fn secondary_click_keeps_selection() {
	let (mut view, _) = view("hello world");
	view.core_mut().doc_mut().select_range(0, 5).unwrap();
	assert!(!view.button_press(cell(0, 8), MouseButton::Secondary));
	assert_eq!(view.document().selection_bounds(), Some((0, 5)));

	assert!(view.button_press(cell(0, 8), MouseButton::Primary));
	assert_eq!(view.document().cursor(), 8);
	assert!(!view.document().has_selection());

	assert!(view.button_press(cell(0, 2), MouseButton::Secondary));
	assert_eq!(view.document().cursor(), 2);
	assert!(!view.button_press(cell(0, 9), MouseButton::Middle));
}

#[test]
fn ctrl_y_and_enter_through_the_view() {
	let (mut view, _) = view("fn main() {\nold\n}");
	view.core_mut().doc_mut().place_cursor(13).unwrap();
	assert!(view.key_press(Key::char('y').ctrl()));
	assert_eq!(view.document().to_string(), "fn main() {\n}");

	view.core_mut().doc_mut().place_cursor(11).unwrap();
	view.key_press(Key::new(KeyCode::Enter));
	assert_eq!(view.document().to_string(), "fn main() {\n\t\n}");
	assert_eq!(view.document().cursor(), 13);
}

#[test]
fn direct_edits_are_relayed_once_on_flush() {
	let (mut view, _) = view("");
	let log = changes(&mut view);
	view.core_mut().doc_mut().insert(0, "ab").unwrap();
	assert!(log.borrow().is_empty());
	view.flush_events();
	view.flush_events();
	assert_eq!(*log.borrow(), vec![ContextChange::TextChanged]);
}
