//! Maps a document offset to a language item through an external symbol service.
//!
//! A missing parser context or an empty expression is a normal outcome and
//! yields `None`.

use std::fmt::Debug;

use quill_primitives::{CharIdx, Document};
use ropey::Rope;
use tracing::trace;

use crate::file::FileId;

/// Everything a symbol service needs to resolve one expression.
#[derive(Debug, Clone, Copy)]
pub struct IdentifierQuery<'a> {
	/// Expression text ending at the queried offset.
	pub expression: &'a str,
	/// One-based line.
	pub line: usize,
	/// One-based column.
	pub column: usize,
	/// The file being edited.
	pub file: &'a FileId,
	/// Full document text.
	pub text: &'a str,
}

/// Language-specific extraction of the expression around an offset.
pub trait ExpressionFinder {
	/// Returns the full expression that ends at `offset` (a char index into `text`).
	fn find_full_expression(&self, text: &str, offset: CharIdx) -> Option<String>;
}

/// Parsed state of a file or project.
pub trait ParserContext {
	/// Resolved symbol handle.
	type Item;

	/// Returns the expression finder registered for `file`'s language.
	fn expression_finder(&self, _file: &FileId) -> Option<&dyn ExpressionFinder> {
		None
	}

	/// Resolves an expression to a language item.
	fn resolve_identifier(&self, query: &IdentifierQuery<'_>) -> Option<Self::Item>;
}

/// Entry point to the parser/symbol collaborator.
pub trait SymbolService {
	/// Opaque handle compared by identity to suppress duplicate tooltips.
	type Item: Clone + PartialEq + Debug + 'static;

	/// Returns the parser context for `file`, or `None` if it is not parsed yet.
	fn parser_context(&self, file: &FileId) -> Option<&dyn ParserContext<Item = Self::Item>>;
}

/// Returns the whitespace-delimited run of chars that ends at `offset`.
pub fn expression_before_offset(text: &Rope, offset: CharIdx) -> String {
	let offset = offset.min(text.len_chars());
	let mut chars = text.chars_at(offset);
	let mut start = offset;
	while let Some(c) = chars.prev() {
		if c.is_whitespace() {
			break;
		}
		start -= 1;
	}
	text.slice(start..offset).to_string()
}

/// Resolves offsets in one file to language items.
#[derive(Debug)]
pub struct LanguageItemResolver<'a, S: ?Sized> {
	symbols: &'a S,
	file: &'a FileId,
}

impl<'a, S: SymbolService + ?Sized> LanguageItemResolver<'a, S> {
	/// Creates a resolver for `file`.
	pub fn new(symbols: &'a S, file: &'a FileId) -> Self {
		Self { symbols, file }
	}

	/// Resolves the expression ending at `offset`.
	pub fn resolve(&self, doc: &Document, offset: CharIdx) -> Option<S::Item> {
		let Some(context) = self.symbols.parser_context(self.file) else {
			trace!(file = %self.file, "No parser context");
			return None;
		};
		let position = doc.position(offset).ok()?;
		let text = doc.to_string();
		let expression = match context.expression_finder(self.file) {
			Some(finder) => finder.find_full_expression(&text, offset)?,
			None => expression_before_offset(doc.rope(), offset),
		};
		if expression.is_empty() {
			return None;
		}

		let (line, column) = position.one_based();
		trace!(%expression, line, column, "Resolving identifier");
		context.resolve_identifier(&IdentifierQuery {
			expression: &expression,
			line,
			column,
			file: self.file,
			text: &text,
		})
	}
}

/// Resolves the item at the caret, as used for documentation lookup.
pub fn language_item_at_caret<S: SymbolService + ?Sized>(symbols: &S, file: &FileId, doc: &Document) -> Option<S::Item> {
	LanguageItemResolver::new(symbols, file).resolve(doc, doc.cursor())
}
