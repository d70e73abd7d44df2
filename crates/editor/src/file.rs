use std::fmt;
use std::path::{Path, PathBuf};

/// Identity of the file a view is editing.
///
/// Templates, expression finders, and symbol queries are all keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileId {
	path: PathBuf,
	untitled: bool,
}

impl FileId {
	/// Identifies a file on disk.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			untitled: false,
		}
	}

	/// Identifies an unsaved buffer. The name still carries an extension hint.
	pub fn untitled(name: impl Into<PathBuf>) -> Self {
		Self {
			path: name.into(),
			untitled: true,
		}
	}

	/// Returns the path, or the display name of an untitled buffer.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Returns true for buffers that were never saved.
	pub fn is_untitled(&self) -> bool {
		self.untitled
	}

	/// Returns the file extension without the dot.
	pub fn extension(&self) -> Option<&str> {
		self.path.extension().and_then(|ext| ext.to_str())
	}
}

impl fmt::Display for FileId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.path.display())
	}
}
