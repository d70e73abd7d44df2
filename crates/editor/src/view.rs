//! The source view: raw input events in, edits and tooltips out.
//!
//! Keys go through the [`KeyPressDispatcher`], pointer motion drives the
//! [`HoverScheduler`], and every document event produced along the way is
//! relayed to the [`CompletionContextTracker`].

use std::fmt;
use std::time::Instant;

use quill_input::{ActionTable, KeyPressDispatcher, KeyPressExtension};
use quill_primitives::{CharIdx, Document, EditError, Key, MouseButton, ScreenPoint};
use tracing::{debug, trace, trace_span};

use crate::actions::default_action_table;
use crate::completion::{self, CompletionContext, CompletionContextTracker, CompletionWidget};
use crate::config::EditorOptions;
use crate::editor::EditorCore;
use crate::file::FileId;
use crate::hover::{HoverHost, HoverScheduler, TooltipState};
use crate::layout::ViewLayout;
use crate::resolve::{LanguageItemResolver, SymbolService, language_item_at_caret};

/// Renders hover tooltips.
pub trait TooltipPresenter<I> {
	/// Shows a tooltip for `item`. The anchor is below the pointer; the
	/// presenter centres the window on it horizontally.
	fn show(&mut self, item: &I, anchor: ScreenPoint);

	/// Destroys the visible tooltip.
	fn destroy(&mut self);
}

/// Adapts the view's collaborators to [`HoverHost`] for one call.
struct ViewHoverHost<'a, S: SymbolService> {
	doc: &'a Document,
	file: &'a FileId,
	symbols: &'a S,
	layout: &'a dyn ViewLayout,
	presenter: &'a mut dyn TooltipPresenter<S::Item>,
}

impl<S: SymbolService> HoverHost<S::Item> for ViewHoverHost<'_, S> {
	fn resolve_at(&mut self, pointer: ScreenPoint) -> Option<S::Item> {
		let offset = self.layout.offset_at(self.doc, pointer)?;
		LanguageItemResolver::new(self.symbols, self.file).resolve(self.doc, offset)
	}

	fn show_tooltip(&mut self, item: &S::Item, anchor: ScreenPoint) {
		self.presenter.show(item, anchor);
	}

	fn destroy_tooltip(&mut self) {
		self.presenter.destroy();
	}
}

/// An editor view bound to one document.
pub struct SourceView<S: SymbolService> {
	core: EditorCore,
	dispatcher: KeyPressDispatcher<EditorCore>,
	hover: HoverScheduler<S::Item>,
	tracker: CompletionContextTracker,
	symbols: S,
	layout: Box<dyn ViewLayout>,
	presenter: Box<dyn TooltipPresenter<S::Item>>,
}

impl<S: SymbolService> fmt::Debug for SourceView<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SourceView")
			.field("core", &self.core)
			.field("dispatcher", &self.dispatcher)
			.field("hover", self.hover.state())
			.field("tracker", &self.tracker)
			.finish_non_exhaustive()
	}
}

impl<S: SymbolService> SourceView<S> {
	/// Creates a view with the built-in actions bound.
	pub fn new(
		core: EditorCore,
		symbols: S,
		layout: impl ViewLayout + 'static,
		presenter: impl TooltipPresenter<S::Item> + 'static,
	) -> Self {
		let hover = HoverScheduler::new(core.options().hover_delay());
		Self {
			core,
			dispatcher: KeyPressDispatcher::with_table(default_action_table()),
			hover,
			tracker: CompletionContextTracker::new(),
			symbols,
			layout: Box::new(layout),
			presenter: Box::new(presenter),
		}
	}

	/// Returns the editor core.
	pub fn core(&self) -> &EditorCore {
		&self.core
	}

	/// Returns the editor core for direct edits.
	///
	/// The resulting document events stay queued until the next
	/// [`flush_events`](Self::flush_events); key and button handlers flush, so
	/// call it directly only when listeners must hear of the edit right away.
	pub fn core_mut(&mut self) -> &mut EditorCore {
		&mut self.core
	}

	/// Returns the document.
	pub fn document(&self) -> &Document {
		self.core.doc()
	}

	/// Replaces the options; the hover delay applies from the next motion.
	pub fn set_options(&mut self, options: EditorOptions) {
		self.hover.set_delay(options.hover_delay());
		self.core.set_options(options);
	}

	/// Returns the key-binding table.
	pub fn actions_mut(&mut self) -> &mut ActionTable<EditorCore> {
		self.dispatcher.table_mut()
	}

	/// Attaches a key-press extension, returning the one it replaces.
	pub fn attach_extension(&mut self, extension: impl KeyPressExtension<EditorCore> + 'static) -> Option<Box<dyn KeyPressExtension<EditorCore>>> {
		self.dispatcher.attach_extension(extension)
	}

	/// Detaches the key-press extension.
	pub fn detach_extension(&mut self) -> Option<Box<dyn KeyPressExtension<EditorCore>>> {
		self.dispatcher.detach_extension()
	}

	/// Returns the completion tracker, for subscribing.
	pub fn tracker_mut(&mut self) -> &mut CompletionContextTracker {
		&mut self.tracker
	}

	/// Returns the hover state.
	pub fn hover_state(&self) -> &TooltipState<S::Item> {
		self.hover.state()
	}

	/// Handles a key press. Returns true if it was consumed.
	///
	/// Any hover tooltip is dismissed first; completion listeners are
	/// notified of the resulting edits afterwards.
	pub fn key_press(&mut self, key: Key) -> bool {
		let span = trace_span!("key_press", %key);
		let _guard = span.enter();

		self.with_hover(|hover, host| hover.dismiss(host));
		let consumed = self.dispatcher.handle(&mut self.core, key);
		self.flush_events();
		consumed
	}

	/// Handles pointer motion over the text.
	pub fn pointer_motion(&mut self, now: Instant, pointer: ScreenPoint) {
		self.with_hover(|hover, host| hover.on_pointer_move(now, pointer, host));
	}

	/// The pointer left the view.
	pub fn leave(&mut self) {
		self.with_hover(|hover, host| hover.on_leave(host));
	}

	/// The view scrolled.
	pub fn scroll(&mut self) {
		self.with_hover(|hover, host| hover.on_scroll(host));
	}

	/// Handles a button press at `pointer`. Returns true if the caret moved.
	///
	/// The primary button always places the caret; the secondary button only
	/// does so when nothing is selected, so a context menu can act on the
	/// selection.
	pub fn button_press(&mut self, pointer: ScreenPoint, button: MouseButton) -> bool {
		self.dispatcher.notify_cursor_position_changed();
		self.with_hover(|hover, host| hover.on_button_press(host));

		let place = match button {
			MouseButton::Primary => true,
			MouseButton::Secondary => !self.core.doc().has_selection(),
			MouseButton::Middle => false,
		};
		let moved = place
			&& match self.layout.offset_at(self.core.doc(), pointer) {
				Some(offset) => self.core.doc_mut().place_cursor(offset).is_ok(),
				None => false,
			};
		self.flush_events();
		moved
	}

	/// The view lost keyboard focus.
	pub fn focus_out(&mut self) {
		self.with_hover(|hover, host| hover.dismiss(host));
		self.tracker.focus_lost();
	}

	/// Runs the hover resolution if its deadline has passed.
	pub fn tick(&mut self, now: Instant) -> bool {
		self.with_hover(|hover, host| hover.tick(now, host))
	}

	/// Returns when [`tick`](Self::tick) next needs to run.
	pub fn next_deadline(&self) -> Option<Instant> {
		self.hover.next_deadline()
	}

	/// Relays pending document events to completion listeners.
	pub fn flush_events(&mut self) {
		let events = self.core.doc_mut().take_events();
		if !events.is_empty() {
			trace!(events = events.len(), "Relaying document events");
		}
		for event in &events {
			self.tracker.relay(event);
		}
	}

	/// Resolves the language item at the caret.
	pub fn language_item_at_caret(&self) -> Option<S::Item> {
		language_item_at_caret(&self.symbols, self.core.file(), self.core.doc())
	}

	fn with_hover<R>(&mut self, f: impl FnOnce(&mut HoverScheduler<S::Item>, &mut ViewHoverHost<'_, S>) -> R) -> R {
		let mut host = ViewHoverHost {
			doc: self.core.doc(),
			file: self.core.file(),
			symbols: &self.symbols,
			layout: self.layout.as_ref(),
			presenter: self.presenter.as_mut(),
		};
		f(&mut self.hover, &mut host)
	}
}

impl<S: SymbolService> CompletionWidget for SourceView<S> {
	fn create_completion_context(&self, trigger_offset: CharIdx) -> Option<CompletionContext> {
		if !self.core.options().enable_code_completion {
			return None;
		}
		let doc = self.core.doc();
		let trigger = doc.position(trigger_offset).ok()?;
		let cell = self.layout.location_of(doc, trigger_offset)?;
		let anchor = cell.origin.offset(0, cell.height as i32);
		Some(CompletionContext::new(trigger, anchor))
	}

	fn completion_text(&self, ctx: &CompletionContext) -> Result<String, EditError> {
		completion::completion_text(self.core.doc(), ctx)
	}

	fn set_completion_text(&mut self, ctx: &CompletionContext, partial_word: &str, complete_word: &str) -> Result<(), EditError> {
		let result = completion::set_completion_text(self.core.doc_mut(), ctx, partial_word, complete_word);
		self.flush_events();
		result
	}

	fn insert_at_cursor(&mut self, text: &str) -> Result<(), EditError> {
		let result = self.core.doc_mut().insert_at_cursor(text);
		self.flush_events();
		result
	}

	fn text_length(&self) -> usize {
		self.core.doc().len_chars()
	}

	fn char_at(&self, offset: CharIdx) -> Option<char> {
		self.core.doc().char_at(offset)
	}

	fn text(&self, start: CharIdx, end: CharIdx) -> Result<String, EditError> {
		self.core.doc().text(start, end)
	}
}

impl<S: SymbolService> Drop for SourceView<S> {
	fn drop(&mut self) {
		if !self.hover.is_idle() {
			debug!("Tearing down hover state");
		}
		self.with_hover(|hover, host| hover.dismiss(host));
	}
}
