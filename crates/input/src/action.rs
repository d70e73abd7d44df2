//! Edit actions and the table that binds them to keys.

use std::fmt;

use quill_primitives::{EditError, Key};
use rustc_hash::FxHashMap;
use tracing::{trace, trace_span, warn};

use crate::types::{KeyResult, KeyTarget};

/// Error raised by an action's `execute` hook.
///
/// Never escapes the dispatcher: it is logged and the key falls back to the widget.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
	/// A document operation was rejected.
	#[error(transparent)]
	Edit(#[from] EditError),
	/// The action gave up for its own reasons.
	#[error("{action}: {reason}")]
	Failed {
		/// Action name.
		action: String,
		/// Human-readable cause.
		reason: String,
	},
}

/// Error raised when binding a key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
	/// The key already has an action; use [`ActionTable::rebind`] to replace it.
	#[error("{key} is already bound to '{existing}'")]
	AlreadyBound {
		/// The contested key.
		key: Key,
		/// Name of the action holding the binding.
		existing: String,
	},
}

/// An edit action bound to a key.
///
/// Hooks run in order `pre_execute`, `execute`, `post_execute`. When
/// [`passes_through`](Self::passes_through) is set, the raw key is also
/// forwarded to the widget right before and right after `execute`.
pub trait EditAction<C> {
	/// Stable name used in logs and error messages.
	fn name(&self) -> &str;

	/// Whether the raw key is forwarded to the widget around `execute`.
	fn passes_through(&self) -> bool {
		false
	}

	/// Runs before anything else.
	fn pre_execute(&self, _ctx: &mut C) {}

	/// Performs the action.
	fn execute(&self, ctx: &mut C) -> Result<(), ActionError>;

	/// Runs after a successful `execute`.
	fn post_execute(&self, _ctx: &mut C) {}
}

type ExecuteFn<C> = Box<dyn Fn(&mut C) -> Result<(), ActionError>>;

/// An [`EditAction`] built from a closure.
pub struct FnAction<C> {
	name: String,
	pass_through: bool,
	execute: ExecuteFn<C>,
}

impl<C> FnAction<C> {
	/// Creates an action that runs `execute`.
	pub fn new(name: impl Into<String>, execute: impl Fn(&mut C) -> Result<(), ActionError> + 'static) -> Self {
		Self {
			name: name.into(),
			pass_through: false,
			execute: Box::new(execute),
		}
	}

	/// Sets the widget pass-through flag.
	pub fn pass_through(mut self, pass_through: bool) -> Self {
		self.pass_through = pass_through;
		self
	}
}

impl<C> fmt::Debug for FnAction<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FnAction")
			.field("name", &self.name)
			.field("pass_through", &self.pass_through)
			.finish_non_exhaustive()
	}
}

impl<C> EditAction<C> for FnAction<C> {
	fn name(&self) -> &str {
		&self.name
	}

	fn passes_through(&self) -> bool {
		self.pass_through
	}

	fn execute(&self, ctx: &mut C) -> Result<(), ActionError> {
		(self.execute)(ctx)
	}
}

/// Edit actions keyed by exact `(key, modifiers)` match.
///
/// At most one action is bound per key, so dispatch is deterministic.
pub struct ActionTable<C> {
	actions: FxHashMap<Key, Box<dyn EditAction<C>>>,
}

impl<C> Default for ActionTable<C> {
	fn default() -> Self {
		Self {
			actions: FxHashMap::default(),
		}
	}
}

impl<C> fmt::Debug for ActionTable<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut map = f.debug_map();
		for (key, action) in &self.actions {
			map.entry(&key.to_string(), &action.name());
		}
		map.finish()
	}
}

impl<C> ActionTable<C> {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Binds `action` to `key`, refusing to shadow an existing binding.
	pub fn bind(&mut self, key: Key, action: impl EditAction<C> + 'static) -> Result<(), BindError> {
		if let Some(existing) = self.actions.get(&key) {
			return Err(BindError::AlreadyBound {
				key,
				existing: existing.name().to_string(),
			});
		}
		self.actions.insert(key, Box::new(action));
		Ok(())
	}

	/// Binds `action` to `key`, returning whatever was bound before.
	pub fn rebind(&mut self, key: Key, action: impl EditAction<C> + 'static) -> Option<Box<dyn EditAction<C>>> {
		let previous = self.actions.insert(key, Box::new(action));
		if let Some(previous) = &previous {
			trace!(%key, replaced = previous.name(), "Rebound key");
		}
		previous
	}

	/// Removes the binding for `key`.
	pub fn unbind(&mut self, key: Key) -> Option<Box<dyn EditAction<C>>> {
		self.actions.remove(&key)
	}

	/// Returns the action bound to `key`.
	pub fn get(&self, key: Key) -> Option<&dyn EditAction<C>> {
		self.actions.get(&key).map(|a| a.as_ref())
	}

	/// Returns true if `key` has a binding.
	pub fn contains(&self, key: Key) -> bool {
		self.actions.contains_key(&key)
	}

	/// Returns the number of bindings.
	pub fn len(&self) -> usize {
		self.actions.len()
	}

	/// Returns true if nothing is bound.
	pub fn is_empty(&self) -> bool {
		self.actions.is_empty()
	}
}

impl<C: KeyTarget> ActionTable<C> {
	/// Handles `key` with the bound action, or forwards it to the widget.
	///
	/// A failing `execute` is rolled back through [`KeyTarget::end_action`]
	/// and the widget sees the key exactly once: a pass-through action has
	/// already forwarded it, anything else forwards it now.
	pub fn dispatch(&self, ctx: &mut C, key: Key) -> KeyResult {
		let Some(action) = self.actions.get(&key) else {
			let handled = ctx.forward_to_widget(key);
			trace!(%key, handled, "No action bound; forwarded to widget");
			return KeyResult::Forwarded { handled };
		};

		let span = trace_span!("edit_action", name = action.name(), %key);
		let _guard = span.enter();

		action.pre_execute(ctx);
		let forwarded = action.passes_through().then(|| ctx.forward_to_widget(key));

		ctx.begin_action();
		let result = action.execute(ctx);
		ctx.end_action(result.is_ok());
		if let Err(e) = result {
			warn!(action = action.name(), %key, error = %e, "Edit action failed; falling back to widget");
			let handled = match forwarded {
				Some(handled) => handled,
				None => ctx.forward_to_widget(key),
			};
			return KeyResult::Failed {
				action: action.name().to_string(),
				handled,
			};
		}
		if action.passes_through() {
			ctx.forward_to_widget(key);
		}
		action.post_execute(ctx);

		trace!("Action completed");
		KeyResult::Executed {
			action: action.name().to_string(),
		}
	}
}
