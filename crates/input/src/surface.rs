//! Capabilities supplied by the UI collaborator.
//!
//! The router never reaches into concrete UI internals; focus changes and
//! listener attachment go through these traits.

/// Focus and listener control over the live window.
pub trait UiSurface: Send + Sync {
	/// Moves keyboard focus to the main editor.
	fn focus_editor(&self);

	/// Returns true if the command-bar input is attached to the live UI tree.
	fn command_input_attached(&self) -> bool;

	fn focus_command_input(&self);

	/// Empties the command-bar input element.
	fn clear_command_input(&self);

	/// Attaches the window-scoped key listener that feeds
	/// [`crate::KeyRouter::handle_window_key`].
	fn attach_key_listener(&self);

	fn detach_key_listener(&self);
}

/// Transient notifications (toasts) currently on screen.
pub trait Notifications: Send + Sync {
	/// Number of notifications currently displayed.
	fn visible(&self) -> usize;

	fn dismiss_all(&self);
}
