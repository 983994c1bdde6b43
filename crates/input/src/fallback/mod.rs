//! Window-scoped fallback key capture.
//!
//! Recognizes a minimal gesture set when the privileged channel cannot be
//! trusted: command+K toggles the command bar, Escape runs the escape
//! priority chain, and Enter in the command-bar input submits its text.
//! Every other key passes through to the focused element.

use std::sync::atomic::{AtomicBool, Ordering};

use vuno_primitives::{Modifiers, Platform};

use crate::state::OverlayState;
use crate::surface::UiSurface;

/// What kind of element holds focus when a key arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusKind {
	/// Any non-text element (editor chrome, a plain `<div>`).
	Other,
	/// An input, textarea, or content-editable element.
	TextEntry,
	/// The command-bar input, carrying its current value.
	CommandInput(String),
}

impl FocusKind {
	pub fn is_text_entry(&self) -> bool {
		matches!(self, Self::TextEntry | Self::CommandInput(_))
	}
}

/// Key-down observed by the window listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowKeyEvent {
	/// DOM-style key name (`"k"`, `"Escape"`, `"Enter"`).
	pub key: String,
	pub modifiers: Modifiers,
	pub target: FocusKind,
}

impl WindowKeyEvent {
	pub fn new(key: impl Into<String>, modifiers: Modifiers, target: FocusKind) -> Self {
		Self {
			key: key.into(),
			modifiers,
			target,
		}
	}
}

/// Whether the listener consumed the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
	/// The default action must be suppressed.
	Handled,
	PassThrough,
}

/// Recognized fallback gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Gesture {
	ToggleCommandBar,
	Escape,
	/// Enter in the command input with non-empty trimmed text.
	Submit(String),
	/// Enter in the command input with nothing to submit.
	SwallowEnter,
}

/// Installation guard and gesture recognizer for the fallback listener.
#[derive(Debug)]
pub struct FallbackCapturer {
	platform: Platform,
	installed: AtomicBool,
}

impl FallbackCapturer {
	pub fn new(platform: Platform) -> Self {
		Self {
			platform,
			installed: AtomicBool::new(false),
		}
	}

	pub fn is_installed(&self) -> bool {
		self.installed.load(Ordering::Acquire)
	}

	/// Attaches the window listener unless already attached.
	///
	/// Returns true only for the call that performed the attachment.
	pub fn install(&self, surface: &dyn UiSurface) -> bool {
		if self.installed.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_err() {
			return false;
		}
		surface.attach_key_listener();
		tracing::info!(platform = ?self.platform, "fallback.installed");
		true
	}

	/// Detaches the listener at session end.
	pub fn uninstall(&self, surface: &dyn UiSurface) {
		if self.installed.swap(false, Ordering::AcqRel) {
			surface.detach_key_listener();
			tracing::debug!("fallback.uninstalled");
		}
	}

	/// Maps a key-down to a gesture, or `None` to let it pass through.
	pub(crate) fn recognize(&self, event: &WindowKeyEvent, state: &OverlayState) -> Option<Gesture> {
		let in_text = event.target.is_text_entry();

		if event.modifiers.has_command(self.platform) && event.key.eq_ignore_ascii_case("k") && !in_text {
			return Some(Gesture::ToggleCommandBar);
		}

		if event.key == "Escape" && (!in_text || state.any_overlay_open()) {
			return Some(Gesture::Escape);
		}

		if state.command_bar_open
			&& event.key == "Enter"
			&& let FocusKind::CommandInput(value) = &event.target
		{
			let command = value.trim();
			return Some(if command.is_empty() {
				Gesture::SwallowEnter
			} else {
				Gesture::Submit(command.to_string())
			});
		}

		None
	}
}

#[cfg(test)]
mod tests;
