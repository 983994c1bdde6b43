//! Overlay state machine: escape priority, toggles, and forced close.
//!
//! Transitions are read-modify-write updates on the shared [`StateStore`];
//! focus side effects are scheduled afterwards so layout can settle.
//!
//! [`StateStore`]: crate::state::StateStore

use std::sync::Arc;
use std::time::Duration;

use crate::bus::UiEvent;
use crate::router::RouterInner;
use crate::schedule::{self, Timer};

/// Outcome of one escape press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EscapeStep {
	DismissedToasts,
	ClosedHelp,
	ClosedCommandBar,
	ClosedTutorial,
	OpenedCommandBar,
}

impl RouterInner {
	/// Flips the command bar and always closes the tutorial.
	///
	/// Opening also closes help so the open path keeps overlays exclusive.
	pub(crate) fn toggle_command_bar(self: &Arc<Self>) {
		let opened = self.store.update(|s| {
			s.command_bar_open = !s.command_bar_open;
			s.tutorial_open = false;
			if s.command_bar_open {
				s.help_open = false;
			}
			s.command_bar_open
		});
		tracing::debug!(open = opened, "overlay.toggle_command_bar");
		if opened {
			self.request_command_input_focus();
		}
	}

	/// Opens help by toggling, closes it by direct set.
	///
	/// A close never toggles, so a stale toggle racing a close cannot reopen
	/// the help window.
	pub(crate) fn toggle_help(self: &Arc<Self>) {
		let opened = self.store.update(|s| {
			if s.help_open {
				s.help_open = false;
			} else {
				s.clear_command_bar();
				s.tutorial_open = false;
				s.help_open = true;
			}
			s.help_open
		});
		tracing::debug!(open = opened, "overlay.toggle_help");
	}

	/// Runs the escape priority chain; the first matching step wins.
	pub(crate) fn escape(self: &Arc<Self>) -> EscapeStep {
		if self.notifications.visible() > 0 {
			self.notifications.dismiss_all();
			self.bus.emit(UiEvent::ToastCloseAll);
			tracing::debug!("overlay.escape_dismissed_toasts");
			return EscapeStep::DismissedToasts;
		}

		let step = self.store.update(|s| {
			if s.help_open {
				s.help_open = false;
				Some(EscapeStep::ClosedHelp)
			} else if s.command_bar_open {
				s.clear_command_bar();
				Some(EscapeStep::ClosedCommandBar)
			} else if s.tutorial_open {
				s.tutorial_open = false;
				Some(EscapeStep::ClosedTutorial)
			} else {
				None
			}
		});
		tracing::debug!(?step, "overlay.escape");

		let Some(step) = step else {
			self.toggle_command_bar();
			return EscapeStep::OpenedCommandBar;
		};
		match step {
			EscapeStep::ClosedHelp => self.schedule_editor_refocus(self.config.help_close_refocus()),
			EscapeStep::ClosedCommandBar => self.schedule_editor_refocus(self.config.command_bar_close_refocus()),
			_ => {}
		}
		step
	}

	/// Closes the command bar on the monitor's request, then re-asserts the
	/// closed state on each configured delay so a racing reopen loses.
	pub(crate) fn force_close_command_bar(self: &Arc<Self>) {
		tracing::debug!("overlay.force_close_command_bar");
		self.store.update(|s| s.clear_command_bar());
		for (i, delay) in self.config.force_close_reassert().enumerate() {
			let inner = Arc::clone(self);
			schedule::after(&self.runtime, Timer::ForceCloseReassert, delay, move || {
				inner.store.update(|s| s.command_bar_open = false);
				if i == 0 {
					inner.refocus_editor();
				}
			});
		}
	}

	/// Emits a command typed into the fallback command input and closes the bar.
	pub(crate) fn submit_command(&self, command: String) {
		tracing::debug!(%command, "overlay.submit_command");
		self.bus.emit(UiEvent::Command { command });
		self.store.update(|s| {
			s.command_bar_open = false;
			s.command_text.clear();
		});
		self.surface.clear_command_input();
	}

	/// Focuses the command input once layout settles, or asks a collaborator
	/// to create it when it is not attached.
	fn request_command_input_focus(self: &Arc<Self>) {
		if !self.surface.command_input_attached() {
			self.bus.emit(UiEvent::CommandInputFocusRequested);
			return;
		}
		let inner = Arc::clone(self);
		schedule::after(&self.runtime, Timer::CommandInputFocus, self.config.command_input_focus_delay(), move || {
			if inner.surface.command_input_attached() {
				inner.surface.focus_command_input();
			}
		});
	}

	fn schedule_editor_refocus(self: &Arc<Self>, delay: Duration) {
		let inner = Arc::clone(self);
		schedule::after(&self.runtime, Timer::EditorRefocus, delay, move || inner.refocus_editor());
	}

	pub(crate) fn refocus_editor(&self) {
		self.surface.focus_editor();
		self.bus.emit(UiEvent::EditorFocusRequested);
	}
}
