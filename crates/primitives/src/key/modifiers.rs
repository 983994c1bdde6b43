//! Key modifier types (Ctrl, Alt, Shift, Meta).

use super::Platform;

/// Key modifiers held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	/// Whether Ctrl is held.
	pub ctrl: bool,
	/// Whether Alt / Option is held.
	pub alt: bool,
	/// Whether Shift is held.
	pub shift: bool,
	/// Whether Meta / Command is held.
	pub meta: bool,
}

impl Modifiers {
	/// No modifiers pressed.
	pub const NONE: Self = Self {
		ctrl: false,
		alt: false,
		shift: false,
		meta: false,
	};

	/// Only Ctrl pressed.
	pub const CTRL: Self = Self { ctrl: true, ..Self::NONE };

	/// Only Meta pressed.
	pub const META: Self = Self { meta: true, ..Self::NONE };

	/// Returns a copy with Ctrl added.
	pub fn ctrl(self) -> Self {
		Self { ctrl: true, ..self }
	}

	/// Returns a copy with Shift added.
	pub fn shift(self) -> Self {
		Self { shift: true, ..self }
	}

	/// Returns true if the platform's "command" modifier is held.
	///
	/// Meta on macOS, Ctrl everywhere else.
	pub fn has_command(self, platform: Platform) -> bool {
		match platform {
			Platform::MacOs => self.meta,
			Platform::Other => self.ctrl,
		}
	}

	/// The modifier set containing only the platform's command modifier.
	pub fn command(platform: Platform) -> Self {
		match platform {
			Platform::MacOs => Self::META,
			Platform::Other => Self::CTRL,
		}
	}
}
