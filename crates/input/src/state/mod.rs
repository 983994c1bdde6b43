//! Shared application state: what overlay is visible plus transient fields.
//!
//! There is exactly one [`StateStore`] per application. Every writer goes
//! through [`StateStore::update`], which runs the mutation against the latest
//! snapshot and publishes the result to all subscribers in one step.

use std::sync::Arc;

use tokio::sync::watch;

/// Command-bar title shown when no save flow is active.
pub const DEFAULT_COMMAND_BAR_TITLE: &str = "What would you like to do today?";

/// Snapshot of overlay visibility and command-bar fields.
///
/// The overlay flags are independent booleans rather than a single tag:
/// external writers may set more than one in the same tick. The router keeps
/// at most one of command bar, help, and tutorial open on its own open paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayState {
	pub command_bar_open: bool,
	pub help_open: bool,
	pub tutorial_open: bool,
	pub save_confirmation_open: bool,
	pub command_text: String,
	pub suggestions: Vec<String>,
	pub command_execution_in_progress: bool,
	pub ai_loading: bool,
	pub status_message: String,
	pub command_bar_title: String,
	pub pending_action: Option<String>,
	pub pending_args: Option<String>,
	pub is_saving: bool,
	pub save_filename: String,
	pub has_unsaved_changes: bool,
}

impl Default for OverlayState {
	fn default() -> Self {
		Self {
			command_bar_open: false,
			help_open: false,
			tutorial_open: false,
			save_confirmation_open: false,
			command_text: String::new(),
			suggestions: Vec::new(),
			command_execution_in_progress: false,
			ai_loading: false,
			status_message: String::new(),
			command_bar_title: DEFAULT_COMMAND_BAR_TITLE.to_string(),
			pending_action: None,
			pending_args: None,
			is_saving: false,
			save_filename: String::new(),
			has_unsaved_changes: false,
		}
	}
}

impl OverlayState {
	/// Number of open exclusive overlays (command bar, help, tutorial).
	pub fn open_overlay_count(&self) -> usize {
		[self.command_bar_open, self.help_open, self.tutorial_open].into_iter().filter(|open| *open).count()
	}

	pub fn any_overlay_open(&self) -> bool {
		self.open_overlay_count() > 0
	}

	/// Returns true if at most one exclusive overlay is open.
	pub fn is_exclusive(&self) -> bool {
		self.open_overlay_count() <= 1
	}

	/// Closes the command bar and drops its transient fields.
	pub fn clear_command_bar(&mut self) {
		self.command_bar_open = false;
		self.command_text.clear();
		self.suggestions.clear();
		self.command_execution_in_progress = false;
		self.ai_loading = false;
	}
}

/// Process-wide, observable holder of [`OverlayState`].
#[derive(Debug, Clone)]
pub struct StateStore {
	tx: Arc<watch::Sender<OverlayState>>,
}

impl Default for StateStore {
	fn default() -> Self {
		Self::new()
	}
}

impl StateStore {
	pub fn new() -> Self {
		let (tx, _) = watch::channel(OverlayState::default());
		Self { tx: Arc::new(tx) }
	}

	/// Clones the latest snapshot.
	pub fn snapshot(&self) -> OverlayState {
		self.tx.borrow().clone()
	}

	/// Reads the latest snapshot without cloning it.
	pub fn read<R>(&self, f: impl FnOnce(&OverlayState) -> R) -> R {
		f(&self.tx.borrow())
	}

	/// Receiver notified on every published snapshot.
	pub fn subscribe(&self) -> watch::Receiver<OverlayState> {
		self.tx.subscribe()
	}

	/// Applies `f` to the latest snapshot and publishes the result.
	///
	/// `f` must not call back into the store.
	pub fn update<R>(&self, f: impl FnOnce(&mut OverlayState) -> R) -> R {
		let mut out = None;
		let mut before = (false, false);
		let mut after = (false, false);
		self.tx.send_modify(|state| {
			before = (state.command_bar_open, state.help_open);
			out = Some(f(state));
			after = (state.command_bar_open, state.help_open);
		});
		tracing::debug!(
			command_bar.before = before.0,
			command_bar.after = after.0,
			help.before = before.1,
			help.after = after.1,
			"state.update"
		);
		match out {
			Some(out) => out,
			None => unreachable!("send_modify always runs the closure"),
		}
	}

	pub fn set_command_text(&self, text: impl Into<String>) {
		let text = text.into();
		self.update(|s| s.command_text = text);
	}

	pub fn set_suggestions(&self, suggestions: Vec<String>) {
		self.update(|s| s.suggestions = suggestions);
	}

	pub fn set_status_message(&self, message: impl Into<String>) {
		let message = message.into();
		self.update(|s| s.status_message = message);
	}

	pub fn set_has_unsaved_changes(&self, dirty: bool) {
		self.update(|s| s.has_unsaved_changes = dirty);
	}

	pub fn open_tutorial(&self) {
		self.update(|s| {
			s.clear_command_bar();
			s.help_open = false;
			s.tutorial_open = true;
		});
	}

	/// Enters the "save as" flow in the command bar.
	pub fn start_saving(&self, filename: impl Into<String>) {
		let filename = filename.into();
		self.update(|s| {
			s.is_saving = true;
			s.save_filename = filename;
			s.command_bar_title = "Save as...".to_string();
		});
	}

	pub fn finish_saving(&self) {
		self.update(|s| {
			s.is_saving = false;
			s.save_filename.clear();
			s.command_bar_title = DEFAULT_COMMAND_BAR_TITLE.to_string();
			s.has_unsaved_changes = false;
		});
	}

	/// Asks the user whether to save before running `action`.
	pub fn show_save_confirmation(&self, action: impl Into<String>, args: impl Into<String>) {
		let (action, args) = (action.into(), args.into());
		self.update(|s| {
			s.save_confirmation_open = true;
			s.pending_action = Some(action);
			s.pending_args = Some(args);
			s.command_bar_title = "Would you like to save first?".to_string();
		});
	}

	pub fn clear_save_confirmation(&self) {
		self.update(|s| {
			s.save_confirmation_open = false;
			s.pending_action = None;
			s.pending_args = None;
			s.command_bar_title = DEFAULT_COMMAND_BAR_TITLE.to_string();
		});
	}

	/// Restores the initial state (logout or explicit reset).
	pub fn reset(&self) {
		self.tx.send_replace(OverlayState::default());
		tracing::debug!("state.reset");
	}
}

#[cfg(test)]
mod tests;
