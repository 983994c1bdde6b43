//! Core types for keyboard input routing: actions, channels, and key bindings.

/// Named actions and the channel they arrived from.
pub mod action;
/// Channel lifecycle and OS permission state.
pub mod channel;
/// Key binding, key event, and modifier types.
pub mod key;

pub use action::{Action, ActionName, Channel};
pub use channel::{ChannelState, MonitoringMode, Permission};
pub use key::{KeyBinding, KeyEvent, KeyPhase, Modifiers, Platform, default_key_bindings};
