use std::sync::Arc;
use std::time::Duration;

use vuno_primitives::{Action, ChannelState, Modifiers};

use crate::adapter::AdapterEvent;
use crate::fallback::{FocusKind, KeyDisposition, WindowKeyEvent};
use crate::health::FallbackReason;
use crate::test_helpers::{Harness, MockAdapter, ready};

/// Must attach the fallback window listener at most once per session.
///
/// - Enforced in: `FallbackCapturer::install`, `ChannelHealth::install_fallback`
/// - Failure symptom: Every shortcut fires twice; command+K opens and closes the bar in one press.
#[cfg_attr(test, tokio::test(flavor = "current_thread", start_paused = true))]
pub(crate) async fn test_fallback_installed_once() {
	let h = Harness::new();
	let adapter = Arc::new(MockAdapter::default().deny_permission());
	h.router.initialize(ready(&adapter)).await.expect("initialize");

	adapter.send(AdapterEvent::KeyMonitoringStopped);
	adapter.send(AdapterEvent::KeyMonitoringError { error: "tap disabled".into() });
	tokio::time::sleep(Duration::from_millis(1)).await;
	h.router.install_fallback(FallbackReason::ReadyTimeout);

	assert_eq!(h.surface.listeners_attached(), 1);

	let key = WindowKeyEvent::new("k", Modifiers::CTRL, FocusKind::Other);
	assert_eq!(h.router.handle_window_key(&key), KeyDisposition::Handled);
	assert!(h.state().command_bar_open, "one press must flip the bar exactly once");
}

/// Must never return the channel state from fallback to backend within a session.
///
/// - Enforced in: `ChannelHealth::advance`
/// - Failure symptom: Privileged and window listeners both route keys after a degraded mode report.
#[cfg_attr(test, tokio::test(flavor = "current_thread", start_paused = true))]
pub(crate) async fn test_channel_state_forward_only() {
	let h = Harness::new();
	h.router.install_fallback(FallbackReason::ReadyTimeout);

	assert!(!h.router.inner().health.mark_backend_active());
	assert_eq!(h.router.channel_state(), ChannelState::FallbackActive);
}

/// Must install the fallback before reporting a listener attachment failure.
///
/// - Enforced in: `KeyRouter::initialize`
/// - Failure symptom: Keyboard shortcuts are dead after the event bridge fails to attach.
#[cfg_attr(test, tokio::test(flavor = "current_thread", start_paused = true))]
pub(crate) async fn test_listener_failure_leaves_fallback() {
	let h = Harness::new();
	let adapter = Arc::new(MockAdapter::default().fail_listen());
	assert!(h.router.initialize(ready(&adapter)).await.is_err());
	assert!(h.router.fallback_installed());
}

/// Must keep at most one of command bar, help, and tutorial open after a router transition.
///
/// - Enforced in: `RouterInner::toggle_command_bar`, `RouterInner::toggle_help`, `StateStore::open_tutorial`
/// - Failure symptom: Help renders over the command bar and escape closes the wrong overlay.
#[cfg_attr(test, tokio::test(flavor = "current_thread", start_paused = true))]
pub(crate) async fn test_router_transitions_exclusive() {
	let h = Harness::new();
	for name in ["toggle_command_bar", "toggle_help", "toggle_command_bar", "escape", "escape", "toggle_help"] {
		h.router.handle(Action::backend(name)).await;
		assert!(h.state().is_exclusive(), "{name} broke exclusivity: {:?}", h.state());
	}
	h.router.state().open_tutorial();
	assert!(h.state().is_exclusive());
}

/// Must produce the same transition for an action name regardless of its channel.
///
/// - Enforced in: `RouterInner::dispatch_sync`
/// - Failure symptom: A shortcut behaves differently once the fallback takes over.
#[cfg_attr(test, tokio::test(flavor = "current_thread", start_paused = true))]
pub(crate) async fn test_channel_agnostic_dispatch() {
	let backend = Harness::new();
	let fallback = Harness::new();
	for name in ["toggle_help", "escape", "escape", "toggle_command_bar"] {
		backend.router.handle(Action::backend(name)).await;
		fallback.router.handle(Action::fallback(name)).await;
		assert_eq!(backend.state(), fallback.state());
	}
}

/// Must act once when both channels observe the same overlay key press.
///
/// - Enforced in: `RouterInner::fallback_owns`
/// - Failure symptom: Escape opens the command bar and the duplicate closes it again.
#[cfg_attr(test, tokio::test(flavor = "current_thread", start_paused = true))]
pub(crate) async fn test_no_duplicate_gesture_after_switch() {
	let h = Harness::new();
	let adapter = Arc::new(MockAdapter::default());
	h.router.initialize(ready(&adapter)).await.expect("initialize");
	adapter.send(AdapterEvent::KeyMonitoringStopped);
	tokio::time::sleep(Duration::from_millis(1)).await;

	adapter.send(AdapterEvent::KeyAction { action: "toggle_command_bar".into() });
	let key = WindowKeyEvent::new("k", Modifiers::CTRL, FocusKind::Other);
	h.router.handle_window_key(&key);
	tokio::time::sleep(Duration::from_millis(1)).await;
	assert!(h.state().command_bar_open);
}

/// Must close help by direct assignment, never by toggling.
///
/// - Enforced in: `RouterInner::toggle_help`, `RouterInner::escape`
/// - Failure symptom: Help reopens after escape when a stale toggle lands.
#[cfg_attr(test, tokio::test(flavor = "current_thread", start_paused = true))]
pub(crate) async fn test_help_close_is_direct() {
	let h = Harness::new();
	h.router.handle(Action::backend("toggle_help")).await;
	h.router.handle(Action::backend("escape")).await;
	assert!(!h.state().help_open);
	h.router.handle(Action::backend("escape")).await;
	assert!(!h.state().help_open, "escape must not reopen help");
}
