//! Keystroke entry point.


use std::fmt;

use quill_primitives::Key;
use tracing::trace;

use crate::action::ActionTable;
use crate::types::KeyTarget;

/// A pluggable key handler that replaces the local table when attached.
///
/// The extension receives the local table and may dispatch through it,
/// pre-empt it, or ignore it entirely.
pub trait KeyPressExtension<C> {
	/// Handles a key. Returns true if it was consumed.
	fn key_press(&mut self, ctx: &mut C, table: &ActionTable<C>, key: Key) -> bool;

	/// Called when the caret is moved by pointer or navigation.
	fn cursor_position_changed(&mut self) {}
}

/// Routes keystrokes to an attached extension or the local [`ActionTable`].
pub struct KeyPressDispatcher<C> {
	table: ActionTable<C>,
	extension: Option<Box<dyn KeyPressExtension<C>>>,
}

impl<C> Default for KeyPressDispatcher<C> {
	fn default() -> Self {
		Self {
			table: ActionTable::new(),
			extension: None,
		}
	}
}

impl<C> fmt::Debug for KeyPressDispatcher<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("KeyPressDispatcher")
			.field("table", &self.table)
			.field("extension", &self.extension.is_some())
			.finish()
	}
}

impl<C> KeyPressDispatcher<C> {
	/// Creates a dispatcher with an empty table and no extension.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a dispatcher around an existing table.
	pub fn with_table(table: ActionTable<C>) -> Self {
		Self { table, extension: None }
	}

	/// Returns the local action table.
	pub fn table(&self) -> &ActionTable<C> {
		&self.table
	}

	/// Returns the local action table for binding.
	pub fn table_mut(&mut self) -> &mut ActionTable<C> {
		&mut self.table
	}

	/// Attaches an extension, returning the one it replaces.
	pub fn attach_extension(&mut self, extension: impl KeyPressExtension<C> + 'static) -> Option<Box<dyn KeyPressExtension<C>>> {
		self.extension.replace(Box::new(extension))
	}

	/// Detaches the current extension.
	pub fn detach_extension(&mut self) -> Option<Box<dyn KeyPressExtension<C>>> {
		self.extension.take()
	}

	/// Returns true if an extension is attached.
	pub fn has_extension(&self) -> bool {
		self.extension.is_some()
	}

	/// Tells the attached extension that the caret moved.
	pub fn notify_cursor_position_changed(&mut self) {
		if let Some(extension) = self.extension.as_mut() {
			extension.cursor_position_changed();
		}
	}
}

impl<C: KeyTarget> KeyPressDispatcher<C> {
	/// Handles a keystroke. Returns true if it was consumed.
	pub fn handle(&mut self, ctx: &mut C, key: Key) -> bool {
		match self.extension.as_mut() {
			Some(extension) => {
				trace!(%key, "Delegating key to extension");
				extension.key_press(ctx, &self.table, key)
			}
			None => self.table.dispatch(ctx, key).consumed(),
		}
	}
}
