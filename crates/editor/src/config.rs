//! Editor options loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Largest accepted `tab_width`.
pub const MAX_TAB_WIDTH: u32 = 16;

/// Errors raised while loading [`EditorOptions`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The TOML text could not be parsed.
	#[error("failed to parse editor options: {0}")]
	Toml(#[from] toml::de::Error),

	/// The options file could not be read.
	#[error("I/O error reading {path}: {source}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		#[source]
		source: std::io::Error,
	},

	/// A value parsed but is outside its accepted range.
	#[error("invalid value for option '{key}': {reason}")]
	InvalidOption {
		/// The option key.
		key: &'static str,
		/// Why it was rejected.
		reason: String,
	},
}

/// How a freshly opened line is indented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
	/// New lines start at column 0.
	None,
	/// New lines copy the previous non-blank line's indentation.
	Auto,
	/// Like `Auto`, plus one level after `{` and dedent for a leading `}`.
	#[default]
	Smart,
}

/// User-facing editor settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorOptions {
	/// Visual width of a tab, and the number of spaces in one indent unit.
	pub tab_width: u32,
	/// Indent with spaces instead of a tab character.
	pub insert_spaces: bool,
	/// Indentation applied after Enter.
	pub indent_style: IndentStyle,
	/// Expand the word before the caret as a template on Tab.
	pub auto_insert_templates: bool,
	/// Whether the completion popup may be triggered.
	pub enable_code_completion: bool,
	/// Hover debounce interval in milliseconds.
	pub hover_delay_ms: u64,
}

impl Default for EditorOptions {
	fn default() -> Self {
		Self {
			tab_width: 4,
			insert_spaces: false,
			indent_style: IndentStyle::default(),
			auto_insert_templates: true,
			enable_code_completion: true,
			hover_delay_ms: 800,
		}
	}
}

impl EditorOptions {
	/// Parses options from TOML text. Missing keys keep their defaults.
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		let options: Self = toml::from_str(text)?;
		options.validate()?;
		Ok(options)
	}

	/// Reads and parses an options file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&text)
	}

	/// Rejects values that parse but make no sense.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !(1..=MAX_TAB_WIDTH).contains(&self.tab_width) {
			return Err(ConfigError::InvalidOption {
				key: "tab_width",
				reason: format!("{} is not in 1..={MAX_TAB_WIDTH}", self.tab_width),
			});
		}
		Ok(())
	}

	/// Returns the hover debounce interval.
	pub fn hover_delay(&self) -> Duration {
		Duration::from_millis(self.hover_delay_ms)
	}

	/// Returns the indentation-relevant subset.
	pub fn indent(&self) -> IndentOptions {
		IndentOptions {
			tab_width: self.tab_width as usize,
			insert_spaces: self.insert_spaces,
		}
	}
}

/// Tab width and tab/space policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentOptions {
	/// Spaces per indent unit, and the most spaces one unindent removes.
	pub tab_width: usize,
	/// Indent with spaces instead of a tab.
	pub insert_spaces: bool,
}

impl Default for IndentOptions {
	fn default() -> Self {
		EditorOptions::default().indent()
	}
}

impl IndentOptions {
	/// Returns one indent unit: a tab, or `tab_width` spaces.
	pub fn unit(&self) -> String {
		if self.insert_spaces {
			" ".repeat(self.tab_width)
		} else {
			"\t".to_string()
		}
	}
}
