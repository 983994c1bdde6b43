//! Keyboard input routing for the editor shell.
//!
//! Key gestures reach the editor through one of two capture channels: the
//! privileged, out-of-process monitor behind [`ChannelAdapter`], or the
//! window-scoped fallback listener fed through [`KeyRouter::handle_window_key`].
//! Both channels funnel into the same action router, which drives the overlay
//! state machine (command bar, help, tutorial) published by [`StateStore`].

pub mod adapter;
pub mod bus;
pub mod config;
pub mod editor;
pub mod error;
pub mod fallback;
pub mod health;
mod overlay;
pub mod router;
mod schedule;
pub mod state;
pub mod surface;
#[cfg(any(test, feature = "test-support"))]
pub mod test_helpers;
pub mod toast;

pub use adapter::{AdapterEvent, AdapterEvents, ChannelAdapter};
pub use bus::{UiBus, UiEvent};
pub use config::RouterConfig;
pub use editor::{BufferId, BufferInfo, EditorCommands};
pub use error::{AdapterError, ConfigError, RouterError, WireError};
pub use fallback::{FocusKind, KeyDisposition, WindowKeyEvent};
pub use health::{ChannelHealth, FallbackReason};
pub use router::{Collaborators, KeyRouter};
pub use state::{OverlayState, StateStore};
pub use surface::{Notifications, UiSurface};
pub use toast::{Toast, ToastKind, ToastQueue};
pub use vuno_primitives::{
	Action, ActionName, Channel, ChannelState, KeyBinding, KeyEvent, Modifiers, MonitoringMode, Permission, Platform, default_key_bindings,
};
