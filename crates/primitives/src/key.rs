//! Key, pointer, and screen coordinate types.

mod modifiers;

use std::fmt;

pub use modifiers::Modifiers;

/// Physical or logical key, independent of the toolkit delivering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
	/// A printable character.
	Char(char),
	/// Return / Enter.
	Enter,
	/// Tab. Shift+Tab arrives as `Tab` with the shift modifier.
	Tab,
	/// Backspace.
	Backspace,
	/// Forward delete.
	Delete,
	/// Escape.
	Escape,
	/// Left arrow.
	Left,
	/// Right arrow.
	Right,
	/// Up arrow.
	Up,
	/// Down arrow.
	Down,
	/// Home.
	Home,
	/// End.
	End,
	/// Page up.
	PageUp,
	/// Page down.
	PageDown,
	/// Function key `F1`..`F24`.
	F(u8),
}

/// A key together with the modifiers held while it was pressed.
///
/// This is the lookup key of the edit-action table: two keys are the same
/// binding only when both code and modifier set match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
	/// The key that was pressed.
	pub code: KeyCode,
	/// Modifiers held at press time.
	pub modifiers: Modifiers,
}

impl Key {
	/// Creates an unmodified key.
	pub const fn new(code: KeyCode) -> Self {
		Self {
			code,
			modifiers: Modifiers::NONE,
		}
	}

	/// Creates a key with explicit modifiers.
	pub const fn with_modifiers(code: KeyCode, modifiers: Modifiers) -> Self {
		Self { code, modifiers }
	}

	/// Creates an unmodified character key.
	pub const fn char(c: char) -> Self {
		Self::new(KeyCode::Char(c))
	}

	/// Returns a copy with Ctrl added.
	pub fn ctrl(self) -> Self {
		Self {
			modifiers: self.modifiers.ctrl(),
			..self
		}
	}

	/// Returns a copy with Alt added.
	pub fn alt(self) -> Self {
		Self {
			modifiers: self.modifiers.alt(),
			..self
		}
	}

	/// Returns a copy with Shift added.
	pub fn shift(self) -> Self {
		Self {
			modifiers: self.modifiers.shift(),
			..self
		}
	}

	/// Returns the character this key types, if it is a plain (or shifted) character.
	pub fn printable(&self) -> Option<char> {
		match self.code {
			KeyCode::Char(c) if !self.modifiers.ctrl && !self.modifiers.alt => Some(c),
			_ => None,
		}
	}
}

impl From<KeyCode> for Key {
	fn from(code: KeyCode) -> Self {
		Self::new(code)
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.modifiers.ctrl {
			f.write_str("C-")?;
		}
		if self.modifiers.alt {
			f.write_str("A-")?;
		}
		if self.modifiers.shift {
			f.write_str("S-")?;
		}
		match self.code {
			KeyCode::Char(' ') => f.write_str("space"),
			KeyCode::Char(c) => write!(f, "{c}"),
			KeyCode::Enter => f.write_str("enter"),
			KeyCode::Tab => f.write_str("tab"),
			KeyCode::Backspace => f.write_str("backspace"),
			KeyCode::Delete => f.write_str("del"),
			KeyCode::Escape => f.write_str("esc"),
			KeyCode::Left => f.write_str("left"),
			KeyCode::Right => f.write_str("right"),
			KeyCode::Up => f.write_str("up"),
			KeyCode::Down => f.write_str("down"),
			KeyCode::Home => f.write_str("home"),
			KeyCode::End => f.write_str("end"),
			KeyCode::PageUp => f.write_str("pageup"),
			KeyCode::PageDown => f.write_str("pagedown"),
			KeyCode::F(n) => write!(f, "F{n}"),
		}
	}
}

/// Pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
	/// Primary (usually left) button.
	Primary,
	/// Middle button.
	Middle,
	/// Secondary (usually right) button.
	Secondary,
}

/// A point in widget-relative screen coordinates (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenPoint {
	/// Horizontal coordinate.
	pub x: i32,
	/// Vertical coordinate.
	pub y: i32,
}

impl ScreenPoint {
	/// Creates a point.
	pub const fn new(x: i32, y: i32) -> Self {
		Self { x, y }
	}

	/// Returns the point moved by `(dx, dy)`.
	pub const fn offset(self, dx: i32, dy: i32) -> Self {
		Self {
			x: self.x.saturating_add(dx),
			y: self.y.saturating_add(dy),
		}
	}
}

/// A rectangle in screen coordinates, as reported for a glyph location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenRect {
	/// Top-left corner.
	pub origin: ScreenPoint,
	/// Width in pixels.
	pub width: u32,
	/// Height in pixels.
	pub height: u32,
}
