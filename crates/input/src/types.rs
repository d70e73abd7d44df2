use quill_primitives::Key;

/// The underlying widget's default key handling.
///
/// Implemented by whatever context edit actions run against, so the table
/// can forward raw keystrokes without owning the widget.
pub trait KeyTarget {
	/// Lets the widget process `key` as if no action were bound.
	///
	/// Returns true if the widget consumed it.
	fn forward_to_widget(&mut self, key: Key) -> bool;

	/// Opens a scope around an action's `execute` hook.
	fn begin_action(&mut self) {}

	/// Closes the scope opened by [`begin_action`](Self::begin_action).
	///
	/// With `commit` false the action failed, and every edit it made since
	/// the scope opened must be reverted before the widget sees the key.
	fn end_action(&mut self, _commit: bool) {}
}

/// How the local action table handled a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
	/// A bound action ran to completion.
	Executed {
		/// Name of the action.
		action: String,
	},
	/// No action was bound; the widget's answer is carried along.
	Forwarded {
		/// Whether the widget consumed the key.
		handled: bool,
	},
	/// A bound action failed and the key fell back to the widget.
	Failed {
		/// Name of the action.
		action: String,
		/// Whether the widget consumed the key on fallback.
		handled: bool,
	},
}

impl KeyResult {
	/// Returns true if the keystroke counts as consumed.
	pub fn consumed(&self) -> bool {
		match self {
			KeyResult::Executed { .. } => true,
			KeyResult::Forwarded { handled } | KeyResult::Failed { handled, .. } => *handled,
		}
	}
}
