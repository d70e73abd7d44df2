#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Keystroke dispatch.
//!
//! * [`KeyPressDispatcher`]: Routes a key to an attached extension or the local table
//! * [`ActionTable`]: Edit actions bound by exact `(key, modifiers)` match
//! * [`EditAction`]: Pre/execute/post hooks plus the widget pass-through flag
//! * [`KeyTarget`]: The widget's default handling, used for fallback and pass-through

pub mod action;
pub mod dispatcher;
pub mod types;

pub use action::{ActionError, ActionTable, BindError, EditAction, FnAction};
pub use dispatcher::{KeyPressDispatcher, KeyPressExtension};
pub use types::{KeyResult, KeyTarget};
