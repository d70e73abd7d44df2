//! Code templates: shortcuts expanded into multi-line text.
//!
//! A template body is plain text with three special characters:
//!
//! * `\t` and `\n` are inserted as-is; each newline opens a line that is later
//!   re-indented to match the line the expansion started on
//! * `|` marks where the caret ends up; the last one wins
//! * `\r` is dropped
//!
//! Templates are grouped by file extension and looked up through a
//! [`TemplateStore`].

mod expand;
mod store;

pub use expand::{TemplateExpander, TemplateToken, tokenize};
use serde::Deserialize;
pub use store::TomlTemplateStore;

use crate::file::FileId;

/// A named snippet of text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeTemplate {
	/// Word that triggers the template.
	pub shortcut: String,
	/// Human-readable summary.
	#[serde(default)]
	pub description: String,
	/// Body in the template mini-language.
	pub text: String,
}

impl CodeTemplate {
	/// Creates a template without a description.
	pub fn new(shortcut: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			shortcut: shortcut.into(),
			description: String::new(),
			text: text.into(),
		}
	}
}

/// Templates that apply to a set of file extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateGroup {
	/// Extensions without the dot, compared case-insensitively.
	#[serde(default)]
	pub extensions: Vec<String>,
	/// Templates in declaration order.
	#[serde(default, rename = "template")]
	pub templates: Vec<CodeTemplate>,
}

impl TemplateGroup {
	/// Returns the first template whose shortcut equals `shortcut`.
	pub fn find(&self, shortcut: &str) -> Option<&CodeTemplate> {
		self.templates.iter().find(|t| t.shortcut == shortcut)
	}

	/// Returns true if the group applies to files with `extension`.
	pub fn matches_extension(&self, extension: &str) -> bool {
		self.extensions.iter().any(|ext| ext.eq_ignore_ascii_case(extension))
	}
}

/// Read-only source of template groups.
pub trait TemplateStore {
	/// Returns the group for `file`, if any.
	fn template_group(&self, file: &FileId) -> Option<&TemplateGroup>;
}
