//! Debounced hover tooltips.
//!
//! The scheduler owns no timer. It records a deadline, and the event loop
//! polls [`HoverScheduler::next_deadline`] and calls [`HoverScheduler::tick`]
//! once it has passed. Every motion event pushes the deadline back, so the
//! tooltip appears only after the pointer settles. Once a tooltip is shown,
//! further motion re-resolves immediately.


use std::time::{Duration, Instant};

use quill_primitives::ScreenPoint;
use tracing::trace;

/// Default debounce interval.
pub const DEFAULT_HOVER_DELAY: Duration = Duration::from_millis(800);

/// Vertical distance between the pointer and the tooltip anchor.
pub const TOOLTIP_OFFSET_Y: i32 = 20;

/// Where the scheduler is in the show/dismiss cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TooltipState<I> {
	/// Nothing pending, nothing shown.
	Idle,
	/// Waiting for the pointer to settle.
	Scheduled {
		/// When resolution fires.
		deadline: Instant,
		/// Pointer location of the last motion event.
		pointer: ScreenPoint,
	},
	/// A tooltip is visible.
	Shown {
		/// Item the tooltip describes.
		item: I,
		/// Pointer location it was last resolved at.
		pointer: ScreenPoint,
	},
}

impl<I> Default for TooltipState<I> {
	fn default() -> Self {
		Self::Idle
	}
}

/// Collaborators the scheduler drives.
pub trait HoverHost<I> {
	/// Resolves the language item under `pointer`.
	fn resolve_at(&mut self, pointer: ScreenPoint) -> Option<I>;

	/// Shows a tooltip for `item` anchored at `anchor`.
	fn show_tooltip(&mut self, item: &I, anchor: ScreenPoint);

	/// Destroys the visible tooltip.
	fn destroy_tooltip(&mut self);
}

/// Single-flight hover state machine.
#[derive(Debug, Clone)]
pub struct HoverScheduler<I> {
	state: TooltipState<I>,
	delay: Duration,
}

impl<I> Default for HoverScheduler<I> {
	fn default() -> Self {
		Self::new(DEFAULT_HOVER_DELAY)
	}
}

impl<I> HoverScheduler<I> {
	/// Creates an idle scheduler with the given debounce interval.
	pub fn new(delay: Duration) -> Self {
		Self {
			state: TooltipState::Idle,
			delay,
		}
	}

	/// Returns the current state.
	pub fn state(&self) -> &TooltipState<I> {
		&self.state
	}

	/// Returns the debounce interval.
	pub fn delay(&self) -> Duration {
		self.delay
	}

	/// Changes the debounce interval. A pending deadline is left as is.
	pub fn set_delay(&mut self, delay: Duration) {
		self.delay = delay;
	}

	/// Returns true if nothing is pending or shown.
	pub fn is_idle(&self) -> bool {
		matches!(self.state, TooltipState::Idle)
	}

	/// Returns the item of the visible tooltip.
	pub fn shown_item(&self) -> Option<&I> {
		match &self.state {
			TooltipState::Shown { item, .. } => Some(item),
			_ => None,
		}
	}

	/// Returns the pending deadline, if any.
	pub fn next_deadline(&self) -> Option<Instant> {
		match self.state {
			TooltipState::Scheduled { deadline, .. } => Some(deadline),
			_ => None,
		}
	}
}

impl<I: PartialEq> HoverScheduler<I> {
	/// Handles pointer motion.
	///
	/// While idle or scheduled, (re)starts the debounce window. While a
	/// tooltip is shown, resolves again right away.
	pub fn on_pointer_move(&mut self, now: Instant, pointer: ScreenPoint, host: &mut impl HoverHost<I>) {
		if matches!(self.state, TooltipState::Shown { .. }) {
			self.resolve(pointer, host);
			return;
		}
		let deadline = now + self.delay;
		trace!(x = pointer.x, y = pointer.y, "Hover scheduled");
		self.state = TooltipState::Scheduled { deadline, pointer };
	}

	/// Fires the pending resolution if its deadline has passed.
	///
	/// Returns true if resolution ran.
	pub fn tick(&mut self, now: Instant, host: &mut impl HoverHost<I>) -> bool {
		match self.state {
			TooltipState::Scheduled { deadline, pointer } if now >= deadline => {
				self.resolve(pointer, host);
				true
			}
			_ => false,
		}
	}

	/// Cancels the pending timer and destroys any visible tooltip.
	pub fn dismiss(&mut self, host: &mut impl HoverHost<I>) {
		match std::mem::take(&mut self.state) {
			TooltipState::Idle => {}
			TooltipState::Scheduled { .. } => trace!("Hover cancelled"),
			TooltipState::Shown { .. } => {
				trace!("Tooltip dismissed");
				host.destroy_tooltip();
			}
		}
	}

	/// The pointer left the widget.
	pub fn on_leave(&mut self, host: &mut impl HoverHost<I>) {
		self.dismiss(host);
	}

	/// The view scrolled.
	pub fn on_scroll(&mut self, host: &mut impl HoverHost<I>) {
		self.dismiss(host);
	}

	/// A pointer button was pressed.
	pub fn on_button_press(&mut self, host: &mut impl HoverHost<I>) {
		self.dismiss(host);
	}

	fn resolve(&mut self, pointer: ScreenPoint, host: &mut impl HoverHost<I>) {
		let Some(item) = host.resolve_at(pointer) else {
			trace!("Nothing to hover");
			self.dismiss(host);
			return;
		};

		if let TooltipState::Shown { item: shown, pointer: at } = &mut self.state {
			if *shown == item {
				*at = pointer;
				return;
			}
			host.destroy_tooltip();
		}
		trace!(x = pointer.x, y = pointer.y, "Tooltip shown");
		host.show_tooltip(&item, pointer.offset(0, TOOLTIP_OFFSET_Y));
		self.state = TooltipState::Shown { item, pointer };
	}
}
