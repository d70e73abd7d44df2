//! Modifier set carried by a key press.

/// Modifier keys held during a key press.
///
/// Bindings match on the whole set: `Ctrl+Y` does not fire for `Ctrl+Shift+Y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	/// Control.
	pub ctrl: bool,
	/// Alt / Option.
	pub alt: bool,
	/// Shift.
	pub shift: bool,
	/// Super / Command.
	pub meta: bool,
}

impl Modifiers {
	/// No modifiers held.
	pub const NONE: Self = Self {
		ctrl: false,
		alt: false,
		shift: false,
		meta: false,
	};

	/// Control only.
	pub const CTRL: Self = Self { ctrl: true, ..Self::NONE };

	/// Alt only.
	pub const ALT: Self = Self { alt: true, ..Self::NONE };

	/// Shift only.
	pub const SHIFT: Self = Self { shift: true, ..Self::NONE };

	/// Super / Command only.
	pub const META: Self = Self { meta: true, ..Self::NONE };

	/// Returns a copy with Control added.
	pub const fn ctrl(self) -> Self {
		Self { ctrl: true, ..self }
	}

	/// Returns a copy with Alt added.
	pub const fn alt(self) -> Self {
		Self { alt: true, ..self }
	}

	/// Returns a copy with Shift added.
	pub const fn shift(self) -> Self {
		Self { shift: true, ..self }
	}

	/// Returns a copy with Super added.
	pub const fn meta(self) -> Self {
		Self { meta: true, ..self }
	}

	/// Returns the union of both sets.
	pub const fn union(self, other: Self) -> Self {
		Self {
			ctrl: self.ctrl || other.ctrl,
			alt: self.alt || other.alt,
			shift: self.shift || other.shift,
			meta: self.meta || other.meta,
		}
	}

	/// Returns true if nothing is held.
	pub const fn is_empty(self) -> bool {
		!self.ctrl && !self.alt && !self.shift && !self.meta
	}
}
