use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::{TemplateGroup, TemplateStore};
use crate::config::ConfigError;
use crate::file::FileId;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TemplateFile {
	#[serde(default, rename = "group")]
	groups: Vec<TemplateGroup>,
}

/// Template groups loaded once from TOML.
///
/// ```toml
/// [[group]]
/// extensions = ["cs"]
///
/// [[group.template]]
/// shortcut = "if"
/// description = "if statement"
/// text = "if (|) {\n\t\n}"
/// ```
#[derive(Debug, Clone, Default)]
pub struct TomlTemplateStore {
	groups: Vec<TemplateGroup>,
}

impl TomlTemplateStore {
	/// Wraps already-built groups.
	pub fn new(groups: Vec<TemplateGroup>) -> Self {
		Self {
			groups: groups.into_iter().map(normalize).collect(),
		}
	}

	/// Parses a template file.
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		let file: TemplateFile = toml::from_str(text)?;
		let store = Self::new(file.groups);
		debug!(
			groups = store.groups.len(),
			templates = store.groups.iter().map(|g| g.templates.len()).sum::<usize>(),
			"Loaded templates"
		);
		Ok(store)
	}

	/// Reads and parses a template file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&text)
	}

	/// Returns every group in load order.
	pub fn groups(&self) -> &[TemplateGroup] {
		&self.groups
	}
}

impl TemplateStore for TomlTemplateStore {
	fn template_group(&self, file: &FileId) -> Option<&TemplateGroup> {
		let extension = file.extension()?;
		self.groups.iter().find(|g| g.matches_extension(extension))
	}
}

fn normalize(mut group: TemplateGroup) -> TemplateGroup {
	for template in &mut group.templates {
		if template.text.contains('\r') {
			template.text = template.text.replace("\r\n", "\n");
		}
	}
	group
}
