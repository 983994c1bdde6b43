//! Outbound UI broadcasts consumed by rendering collaborators.

use std::num::NonZeroUsize;

use tokio::sync::broadcast;
use vuno_primitives::MonitoringMode;

use crate::editor::BufferId;

/// Application-level broadcast. [`UiEvent::name`] is the wire contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
	FileSaved { buffer_id: BufferId },
	NewFileCreated { buffer_id: BufferId },
	OpenFileDialog,
	/// A command submitted from the fallback command-bar input.
	Command { command: String },
	EditorFocusRequested,
	/// The command input is not attached; a collaborator should (re)create it.
	CommandInputFocusRequested,
	AccessibilityPermissionRequired { error: String },
	KeyMonitoringModeChanged { mode: MonitoringMode },
	ToastCloseAll,
	/// An action the router has no built-in semantics for.
	KeyAction { action: String },
}

impl UiEvent {
	pub fn name(&self) -> &'static str {
		match self {
			Self::FileSaved { .. } => "file_saved",
			Self::NewFileCreated { .. } => "new_file_created",
			Self::OpenFileDialog => "open_file_dialog",
			Self::Command { .. } => "command",
			Self::EditorFocusRequested => "editor-focus-requested",
			Self::CommandInputFocusRequested => "command-input-focus-requested",
			Self::AccessibilityPermissionRequired { .. } => "accessibility-permission-required",
			Self::KeyMonitoringModeChanged { .. } => "key-monitoring-mode-changed",
			Self::ToastCloseAll => "toast-close-all",
			Self::KeyAction { .. } => "key_action",
		}
	}
}

/// Fan-out channel for [`UiEvent`]s.
///
/// Emitting with no subscribers is not an error; slow subscribers lag and
/// lose the oldest events.
#[derive(Debug, Clone)]
pub struct UiBus {
	tx: broadcast::Sender<UiEvent>,
}

impl Default for UiBus {
	fn default() -> Self {
		Self::new(Self::DEFAULT_CAPACITY)
	}
}

impl UiBus {
	pub const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::MIN.saturating_add(63);

	pub fn new(capacity: NonZeroUsize) -> Self {
		let (tx, _) = broadcast::channel(capacity.get());
		Self { tx }
	}

	pub fn emit(&self, event: UiEvent) {
		tracing::trace!(event = event.name(), "bus.emit");
		let _ = self.tx.send(event);
	}

	pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
		self.tx.subscribe()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn emit_without_subscribers_is_silent() {
		UiBus::default().emit(UiEvent::ToastCloseAll);
	}

	#[test]
	fn subscribers_see_events_in_order() {
		let bus = UiBus::default();
		let mut rx = bus.subscribe();
		bus.emit(UiEvent::OpenFileDialog);
		bus.emit(UiEvent::Command { command: "ls".into() });
		assert_eq!(rx.try_recv().unwrap().name(), "open_file_dialog");
		assert_eq!(rx.try_recv().unwrap(), UiEvent::Command { command: "ls".into() });
		assert!(rx.try_recv().is_err());
	}
}
