//! End-to-end routing through the public API with recording collaborators.

use std::sync::Arc;
use std::time::Duration;

use vuno_input::test_helpers::{Harness, MockAdapter, RecordingEditor, ready};
use vuno_input::{
	AdapterEvent, ChannelState, FocusKind, KeyDisposition, Modifiers, MonitoringMode, Platform, RouterConfig, UiEvent,
	WindowKeyEvent, default_key_bindings,
};

const CONFIG: &str = r#"
ready_timeout_ms = 200
platform = "macos"
force_close_reassert_ms = [25, 50]
"#;

fn cmd_k(target: FocusKind) -> WindowKeyEvent {
	WindowKeyEvent::new("k", Modifiers::command(Platform::MacOs), target)
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn degraded_session_switches_to_window_capture() {
	let config = RouterConfig::from_toml_str(CONFIG).expect("config");
	let mut h = Harness::with_config(config, RecordingEditor::with_buffers(&[1]));
	let adapter = Arc::new(MockAdapter::default());

	h.router.initialize(ready(&adapter)).await.expect("initialize");
	for binding in default_key_bindings(Platform::MacOs) {
		h.router.register_key_binding(binding).await.expect("register");
	}
	assert_eq!(h.router.get_key_bindings().await.len(), 5);
	assert_eq!(h.router.channel_state(), ChannelState::BackendActive);

	assert_eq!(h.router.handle_window_key(&cmd_k(FocusKind::Other)), KeyDisposition::PassThrough);

	adapter.send(AdapterEvent::KeyAction {
		action: "save_file".into(),
	});
	adapter.send(AdapterEvent::KeyMonitoringMode {
		mode: MonitoringMode::WindowFocusedOnly,
	});
	tokio::time::sleep(Duration::from_millis(1)).await;

	assert_eq!(h.router.channel_state(), ChannelState::FallbackActive);
	assert_eq!(h.state().status_message, "File saved successfully");

	assert_eq!(
		h.router.handle_window_key(&WindowKeyEvent::new("k", Modifiers::CTRL, FocusKind::Other)),
		KeyDisposition::PassThrough
	);
	assert_eq!(h.router.handle_window_key(&cmd_k(FocusKind::Other)), KeyDisposition::Handled);
	assert!(h.state().command_bar_open);

	let escape = WindowKeyEvent::new("Escape", Modifiers::NONE, FocusKind::CommandInput(String::new()));
	assert_eq!(h.router.handle_window_key(&escape), KeyDisposition::Handled);
	assert!(!h.state().command_bar_open);
	tokio::time::sleep(Duration::from_millis(60)).await;

	let names: Vec<_> = h.drain_events().iter().map(UiEvent::name).collect();
	assert_eq!(
		names,
		vec!["file_saved", "key-monitoring-mode-changed", "editor-focus-requested"]
	);
	assert_eq!(h.surface.editor_focus_count(), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn slow_adapter_times_out_into_fallback() {
	let config = RouterConfig::from_toml_str(CONFIG).expect("config");
	let h = Harness::with_config(config, RecordingEditor::default());
	let adapter = Arc::new(MockAdapter::default());
	let late = {
		let adapter = Arc::clone(&adapter);
		async move {
			tokio::time::sleep(Duration::from_millis(500)).await;
			ready(&adapter).await
		}
	};

	h.router.initialize(late).await.expect("initialize");
	assert!(h.router.fallback_installed());
	assert!(adapter.calls().is_empty());
	assert!(h.router.get_key_bindings().await.is_empty());
}
