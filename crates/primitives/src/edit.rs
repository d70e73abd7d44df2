//! Edit operation errors.

use crate::range::CharIdx;

/// Error returned by document mutations and coordinate conversions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
	/// A char offset past the end of the document.
	#[error("offset {offset} is out of range (document has {len} chars)")]
	OffsetOutOfRange {
		/// The rejected offset.
		offset: CharIdx,
		/// Document length in chars.
		len: usize,
	},
	/// A line index past the last line.
	#[error("line {line} is out of range (document has {lines} lines)")]
	LineOutOfRange {
		/// The rejected line index.
		line: usize,
		/// Number of lines in the document.
		lines: usize,
	},
	/// A range whose start lies after its end.
	#[error("invalid range {start}..{end}")]
	InvalidRange {
		/// Range start.
		start: CharIdx,
		/// Range end.
		end: CharIdx,
	},
	/// A mark name that was never set.
	#[error("unknown mark '{0}'")]
	UnknownMark(String),
	/// `end_atomic` without a matching `begin_atomic`.
	#[error("end of atomic edit without a matching begin")]
	UnbalancedAtomicEdit,
}
