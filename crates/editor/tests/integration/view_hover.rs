use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use quill_editor::{EditorOptions, TooltipState};
use quill_primitives::{Key, MouseButton};

use crate::common::{Popup, Symbol, Symbols, cell, view, view_with};

const DELAY: Duration = Duration::from_millis(800);

#[test]
fn tooltip_appears_after_pointer_settles() {
	let (mut view, presenter) = view("foo bar");
	let t0 = Instant::now();
	view.pointer_motion(t0, cell(0, 1));
	view.pointer_motion(t0 + Duration::from_millis(300), cell(0, 5));
	assert_eq!(view.next_deadline(), Some(t0 + Duration::from_millis(300) + DELAY));

	assert!(!view.tick(t0 + DELAY));
	assert!(presenter.log.borrow().is_empty());
	assert!(view.tick(t0 + Duration::from_millis(1100)));
	assert_eq!(*presenter.log.borrow(), vec![Popup::Show(Symbol('b'), cell(0, 5).offset(0, 20))]);
}

#[test]
fn jitter_over_one_symbol_shows_once() {
	let (mut view, presenter) = view("foo bar");
	let t0 = Instant::now();
	view.pointer_motion(t0, cell(0, 1));
	view.tick(t0 + DELAY);
	view.pointer_motion(t0 + DELAY, cell(0, 2));
	view.pointer_motion(t0 + DELAY, cell(0, 3));
	assert_eq!(presenter.shows(), vec![Symbol('f')]);
	assert_eq!(presenter.visible(), 1);

	view.pointer_motion(t0 + DELAY, cell(0, 6));
	assert_eq!(presenter.shows(), vec![Symbol('f'), Symbol('b')], "tracks the pointer without a new delay");
	assert_eq!(presenter.visible(), 1);
}

#[test]
fn whitespace_under_pointer_hides_tooltip() {
	let (mut view, presenter) = view("foo bar");
	let t0 = Instant::now();
	view.pointer_motion(t0, cell(0, 2));
	view.tick(t0 + DELAY);
	view.pointer_motion(t0 + DELAY, cell(0, 0));
	assert_eq!(view.hover_state(), &TooltipState::Idle);
	assert_eq!(presenter.visible(), 0);
}

#[test]
fn leave_scroll_and_click_dismiss() {
	let t0 = Instant::now();
	let dismissals: [fn(&mut quill_editor::SourceView<Symbols>); 4] = [
		|v| v.leave(),
		|v| v.scroll(),
		|v| {
			v.button_press(cell(0, 0), MouseButton::Primary);
		},
		|v| {
			v.key_press(Key::char('x'));
		},
	];
	for dismiss in dismissals {
		let (mut view, presenter) = view("foo bar");
		view.pointer_motion(t0, cell(0, 1));
		dismiss(&mut view);
		assert_eq!(view.next_deadline(), None, "pending timer is cancelled");
		assert!(!view.tick(t0 + DELAY * 2));

		view.pointer_motion(t0, cell(0, 1));
		view.tick(t0 + DELAY);
		assert_eq!(presenter.visible(), 1);
		dismiss(&mut view);
		assert_eq!(view.hover_state(), &TooltipState::Idle);
		assert_eq!(presenter.visible(), 0);
	}
}

#[test]
fn unparsed_file_never_shows() {
	let (mut view, presenter) = view_with("foo", Symbols::default(), EditorOptions::default());
	let t0 = Instant::now();
	view.pointer_motion(t0, cell(0, 2));
	assert!(view.tick(t0 + DELAY));
	assert!(view.hover_state() == &TooltipState::Idle);
	assert!(presenter.log.borrow().is_empty());
}

#[test]
fn configured_delay_is_used() {
	let options = EditorOptions::from_toml_str("hover_delay_ms = 100").unwrap();
	let (mut view, presenter) = view_with("foo", Symbols::parsed(), options);
	let t0 = Instant::now();
	view.pointer_motion(t0, cell(0, 2));
	assert!(view.tick(t0 + Duration::from_millis(100)));
	assert_eq!(presenter.visible(), 1);

	view.set_options(EditorOptions::default());
	view.leave();
	view.pointer_motion(t0, cell(0, 2));
	assert_eq!(view.next_deadline(), Some(t0 + DELAY));
}

#[test]
fn dropping_the_view_destroys_the_tooltip() {
	let (mut view, presenter) = view("foo");
	let t0 = Instant::now();
	view.pointer_motion(t0, cell(0, 1));
	view.tick(t0 + DELAY);
	assert_eq!(presenter.visible(), 1);
	drop(view);
	assert_eq!(presenter.visible(), 0);
	assert_eq!(presenter.log.borrow().last(), Some(&Popup::Destroy));
}
