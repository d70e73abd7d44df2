//! State that edit actions run against.

use std::fmt;

use quill_input::KeyTarget;
use quill_primitives::{Document, EditError, Key};
use tracing::warn;

use crate::config::{EditorOptions, IndentStyle};
use crate::file::FileId;
use crate::indent::{DefaultFormattingStrategy, FormattingStrategy, IndentationEngine};
use crate::template::{TemplateExpander, TemplateStore, TomlTemplateStore};
use crate::widget::{PlainTextWidget, WidgetKeyHandler};

/// The document plus everything an edit action needs beside it.
///
/// Also the [`KeyTarget`] of the dispatcher: keys no action claims go to the
/// widget handler held here.
pub struct EditorCore {
	doc: Document,
	file: FileId,
	options: EditorOptions,
	templates: Box<dyn TemplateStore>,
	widget: Box<dyn WidgetKeyHandler>,
	formatter: Option<Box<dyn FormattingStrategy>>,
}

impl fmt::Debug for EditorCore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EditorCore")
			.field("file", &self.file)
			.field("options", &self.options)
			.field("len_chars", &self.doc.len_chars())
			.finish_non_exhaustive()
	}
}

impl EditorCore {
	/// Creates a core with no templates and the plain text widget.
	pub fn new(doc: Document, file: FileId, options: EditorOptions) -> Self {
		Self {
			doc,
			file,
			options,
			templates: Box::new(TomlTemplateStore::default()),
			widget: Box::new(PlainTextWidget),
			formatter: None,
		}
	}

	/// Replaces the template store.
	pub fn with_templates(mut self, templates: impl TemplateStore + 'static) -> Self {
		self.templates = Box::new(templates);
		self
	}

	/// Replaces the widget's default key handling.
	pub fn with_widget(mut self, widget: impl WidgetKeyHandler + 'static) -> Self {
		self.widget = Box::new(widget);
		self
	}

	/// Overrides the strategy derived from [`EditorOptions::indent_style`].
	pub fn with_formatter(mut self, formatter: impl FormattingStrategy + 'static) -> Self {
		self.formatter = Some(Box::new(formatter));
		self
	}

	/// Returns the document.
	pub fn doc(&self) -> &Document {
		&self.doc
	}

	/// Returns the document for editing.
	pub fn doc_mut(&mut self) -> &mut Document {
		&mut self.doc
	}

	/// Returns the file identity.
	pub fn file(&self) -> &FileId {
		&self.file
	}

	/// Renames the file, e.g. after "save as".
	pub fn set_file(&mut self, file: FileId) {
		self.file = file;
	}

	/// Returns the active options.
	pub fn options(&self) -> &EditorOptions {
		&self.options
	}

	/// Replaces the options.
	pub fn set_options(&mut self, options: EditorOptions) {
		self.options = options;
	}

	/// Returns the template store.
	pub fn templates(&self) -> &dyn TemplateStore {
		self.templates.as_ref()
	}

	/// Returns an indentation engine over the document.
	pub fn indentation(&mut self) -> IndentationEngine<'_> {
		IndentationEngine::new(&mut self.doc, self.options.indent())
	}

	/// Returns a template expander over the document.
	pub fn template_expander(&mut self) -> TemplateExpander<'_> {
		TemplateExpander::new(&mut self.doc, &self.options)
	}

	/// Expands the word before the caret if it names a template.
	pub fn try_expand_template(&mut self) -> bool {
		TemplateExpander::new(&mut self.doc, &self.options).try_expand(self.templates.as_ref(), &self.file)
	}

	/// Re-indents `line` according to the configured style.
	///
	/// Returns the new indent width, or `None` when the style is
	/// [`IndentStyle::None`] and no formatter override is set.
	pub fn format_line(&mut self, line: usize) -> Result<Option<usize>, EditError> {
		let mut engine = IndentationEngine::new(&mut self.doc, self.options.indent());
		if let Some(formatter) = &self.formatter {
			return engine.format_line(formatter.as_ref(), line).map(Some);
		}
		let strategy = match self.options.indent_style {
			IndentStyle::None => return Ok(None),
			IndentStyle::Auto => DefaultFormattingStrategy::auto(),
			IndentStyle::Smart => DefaultFormattingStrategy::smart(),
		};
		engine.format_line(&strategy, line).map(Some)
	}
}

impl KeyTarget for EditorCore {
	fn forward_to_widget(&mut self, key: Key) -> bool {
		self.widget.handle_key(&mut self.doc, key)
	}

	fn begin_action(&mut self) {
		self.doc.begin_atomic();
	}

	/// Commits the action's edits as one undo step, or reverts them all.
	fn end_action(&mut self, commit: bool) {
		let closed = if commit { self.doc.end_atomic() } else { self.doc.abort_atomic() };
		if let Err(e) = closed {
			warn!(error = %e, "Action scope was not open");
		}
	}
}
