#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Core types for text editing: keys, positions, ranges, and the document facade.

/// Rope-backed document with marks, atomic edits, and undo history.
pub mod document;
/// Edit errors.
pub mod edit;
/// Key and pointer event types.
pub mod key;
/// Line/column/offset positions.
pub mod position;
/// Text range types.
pub mod range;
/// Rope utilities and extensions.
pub mod rope;

pub use document::{Bias, Document, DocumentEvent, INSERT_MARK, SELECTION_BOUND_MARK};
pub use edit::EditError;
pub use key::{Key, KeyCode, Modifiers, MouseButton, ScreenPoint, ScreenRect};
pub use position::Position;
pub use range::{CharIdx, CharLen, Range};
pub use ropey::{Rope, RopeSlice};
