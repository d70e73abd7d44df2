use quill_primitives::{Bias, CharIdx, Document, EditError, rope};
use tracing::{debug, debug_span, trace, warn};

use super::{CodeTemplate, TemplateStore};
use crate::config::{EditorOptions, IndentOptions};
use crate::file::FileId;
use crate::indent::IndentationEngine;

/// Follows the final caret through the re-indent pass.
const CARET_MARK: &str = "template_caret";

/// One unit of a template body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateToken {
	/// Inserted verbatim.
	Literal(char),
	/// A tab character.
	Tab,
	/// A line feed; the new line is re-indented afterwards.
	Newline,
	/// Final caret position; inserts nothing.
	Caret,
	/// Ignored.
	CarriageReturn,
}

/// Splits a template body into tokens.
pub fn tokenize(body: &str) -> impl Iterator<Item = TemplateToken> + '_ {
	body.chars().map(|c| match c {
		'\t' => TemplateToken::Tab,
		'\n' => TemplateToken::Newline,
		'\r' => TemplateToken::CarriageReturn,
		'|' => TemplateToken::Caret,
		c => TemplateToken::Literal(c),
	})
}

/// Expands templates into a document at the caret.
#[derive(Debug)]
pub struct TemplateExpander<'a> {
	doc: &'a mut Document,
	indent: IndentOptions,
	enabled: bool,
}

impl<'a> TemplateExpander<'a> {
	/// Creates an expander honoring `options.auto_insert_templates`.
	pub fn new(doc: &'a mut Document, options: &EditorOptions) -> Self {
		Self {
			doc,
			indent: options.indent(),
			enabled: options.auto_insert_templates,
		}
	}

	/// Returns the run of non-whitespace chars that ends at the caret.
	pub fn word_before_caret(&self) -> String {
		let caret = self.doc.cursor();
		let mut chars = self.doc.rope().chars_at(caret);
		let mut word: Vec<char> = Vec::new();
		while let Some(c) = chars.prev() {
			if c.is_whitespace() {
				break;
			}
			word.push(c);
		}
		word.iter().rev().collect()
	}

	/// Deletes [`word_before_caret`](Self::word_before_caret) and returns its length.
	pub fn delete_word_before_caret(&mut self) -> Result<usize, EditError> {
		let len = self.word_before_caret().chars().count();
		let caret = self.doc.cursor();
		self.doc.delete(caret - len, caret)?;
		Ok(len)
	}

	/// Expands the word before the caret if it names a template for `file`.
	///
	/// Returns false without touching the document when templates are
	/// disabled, the word is empty, or nothing matches.
	pub fn try_expand(&mut self, store: &dyn TemplateStore, file: &FileId) -> bool {
		if !self.enabled {
			return false;
		}
		let word = self.word_before_caret();
		if word.is_empty() {
			return false;
		}
		let Some(template) = store.template_group(file).and_then(|group| group.find(&word)) else {
			trace!(word, "No template for word");
			return false;
		};

		self.doc.begin_atomic();
		let result = self.delete_word_before_caret().and_then(|_| self.expand(template));
		let closed = self.doc.end_atomic();
		match result.and(closed) {
			Ok(()) => true,
			Err(e) => {
				warn!(shortcut = %template.shortcut, error = %e, "Template expansion failed");
				false
			}
		}
	}

	/// Inserts `template` at the caret and moves the caret to its marker.
	///
	/// Runs as one undo step.
	pub fn expand(&mut self, template: &CodeTemplate) -> Result<(), EditError> {
		let span = debug_span!("expand_template", shortcut = %template.shortcut);
		let _guard = span.enter();

		self.doc.begin_atomic();
		let result = self.expand_inner(template);
		self.doc.end_atomic()?;
		let caret = result?;
		debug!(caret, "Expanded template");
		Ok(())
	}

	fn expand_inner(&mut self, template: &CodeTemplate) -> Result<CharIdx, EditError> {
		let begin = self.doc.cursor();
		let begin_line = self.doc.line_of(begin)?;
		let leading = rope::leading_whitespace(self.doc.line(begin_line)?);

		let mut text = String::with_capacity(template.text.len());
		let mut offset = begin;
		let mut end_line = begin_line;
		let mut caret = None;
		for token in tokenize(&template.text) {
			match token {
				TemplateToken::Literal(c) => {
					text.push(c);
					offset += 1;
				}
				TemplateToken::Tab => {
					text.push('\t');
					offset += 1;
				}
				TemplateToken::Newline => {
					text.push('\n');
					offset += 1;
					end_line += 1;
				}
				TemplateToken::Caret => caret = Some(offset),
				TemplateToken::CarriageReturn => {}
			}
		}
		self.doc.insert(begin, &text)?;
		self.doc.set_mark(CARET_MARK, caret.unwrap_or(offset), Bias::Right)?;

		if end_line > begin_line && !leading.is_empty() {
			IndentationEngine::new(&mut *self.doc, self.indent).indent_lines_with(begin_line + 1, end_line, &leading)?;
		}

		let caret = self.doc.remove_mark(CARET_MARK).unwrap_or(offset);
		self.doc.place_cursor(caret)?;
		Ok(caret)
	}
}
