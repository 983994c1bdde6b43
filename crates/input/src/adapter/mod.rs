//! Boundary to the privileged, out-of-process key monitor.
//!
//! The adapter emits named events over an ordered stream and accepts a small
//! command set. Decoding the named wire events into [`AdapterEvent`] lives in
//! [`wire`].

mod wire;

use async_trait::async_trait;
use tokio::sync::mpsc;
use vuno_primitives::{KeyBinding, KeyEvent, MonitoringMode};

use crate::error::AdapterError;

/// Ordered stream of events from one adapter listener registration.
pub type AdapterEvents = mpsc::UnboundedReceiver<AdapterEvent>;

/// Inbound event from the privileged channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterEvent {
	/// A recognized gesture, already mapped to an action name.
	KeyAction { action: String },
	/// Raw key event, informational only.
	KeyEvent(KeyEvent),
	KeyMonitoringError { error: String },
	KeyMonitoringStopped,
	KeyMonitoringMode { mode: MonitoringMode },
	ForceCloseCommandBar,
	WindowWillClose,
}

impl AdapterEvent {
	/// Wire name of the event.
	pub fn name(&self) -> &'static str {
		match self {
			Self::KeyAction { .. } => "key_action",
			Self::KeyEvent(_) => "key_event",
			Self::KeyMonitoringError { .. } => "key_monitoring_error",
			Self::KeyMonitoringStopped => "key_monitoring_stopped",
			Self::KeyMonitoringMode { .. } => "key_monitoring_mode",
			Self::ForceCloseCommandBar => "force_close_command_bar",
			Self::WindowWillClose => "window-will-close",
		}
	}
}

/// Command surface of the privileged key monitor.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
	/// Attaches event listeners. Each call yields an independent stream.
	fn listen(&self) -> Result<AdapterEvents, AdapterError>;

	async fn start_key_monitoring_with_fallback(&self) -> Result<(), AdapterError>;

	async fn start_key_monitoring(&self) -> Result<(), AdapterError>;

	async fn stop_key_monitoring(&self) -> Result<(), AdapterError>;

	/// Returns whether OS accessibility / input-monitoring permission is granted.
	async fn check_accessibility_permissions(&self) -> Result<bool, AdapterError>;

	async fn register_key_binding(&self, binding: KeyBinding) -> Result<(), AdapterError>;

	async fn unregister_key_binding(&self, id: &str) -> Result<(), AdapterError>;

	async fn get_key_bindings(&self) -> Result<Vec<KeyBinding>, AdapterError>;
}
