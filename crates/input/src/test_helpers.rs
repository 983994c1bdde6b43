//! Recording collaborator doubles for router tests.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc};
use vuno_primitives::{KeyBinding, Platform};

use crate::adapter::{AdapterEvent, AdapterEvents, ChannelAdapter};
use crate::bus::UiEvent;
use crate::config::RouterConfig;
use crate::editor::{BufferId, BufferInfo, EditorCommands};
use crate::error::AdapterError;
use crate::router::{Collaborators, KeyRouter};
use crate::state::OverlayState;
use crate::surface::UiSurface;
use crate::toast::ToastQueue;

/// UI surface that counts every call.
#[derive(Debug, Default)]
pub struct RecordingSurface {
	editor_focus: AtomicUsize,
	command_focus: AtomicUsize,
	input_clears: AtomicUsize,
	attached: AtomicUsize,
	detached: AtomicUsize,
	command_input_missing: AtomicBool,
}

impl RecordingSurface {
	pub fn set_command_input_attached(&self, attached: bool) {
		self.command_input_missing.store(!attached, Ordering::SeqCst);
	}

	pub fn editor_focus_count(&self) -> usize {
		self.editor_focus.load(Ordering::SeqCst)
	}

	pub fn command_input_focus_count(&self) -> usize {
		self.command_focus.load(Ordering::SeqCst)
	}

	pub fn command_input_clears(&self) -> usize {
		self.input_clears.load(Ordering::SeqCst)
	}

	pub fn listeners_attached(&self) -> usize {
		self.attached.load(Ordering::SeqCst)
	}

	pub fn listeners_detached(&self) -> usize {
		self.detached.load(Ordering::SeqCst)
	}
}

impl UiSurface for RecordingSurface {
	fn focus_editor(&self) {
		self.editor_focus.fetch_add(1, Ordering::SeqCst);
	}

	fn command_input_attached(&self) -> bool {
		!self.command_input_missing.load(Ordering::SeqCst)
	}

	fn focus_command_input(&self) {
		self.command_focus.fetch_add(1, Ordering::SeqCst);
	}

	fn clear_command_input(&self) {
		self.input_clears.fetch_add(1, Ordering::SeqCst);
	}

	fn attach_key_listener(&self) {
		self.attached.fetch_add(1, Ordering::SeqCst);
	}

	fn detach_key_listener(&self) {
		self.detached.fetch_add(1, Ordering::SeqCst);
	}
}

/// Editor backend with scripted buffers and an optional failure.
#[derive(Debug, Default)]
pub struct RecordingEditor {
	buffers: Mutex<Vec<BufferInfo>>,
	current: Mutex<Option<BufferId>>,
	saved: Mutex<Vec<BufferId>>,
	created: AtomicUsize,
	next_id: AtomicU64,
	failure: Mutex<Option<String>>,
}

impl RecordingEditor {
	pub fn with_buffers(ids: &[u64]) -> Self {
		let editor = Self::default();
		*editor.buffers.lock() = ids
			.iter()
			.map(|&id| BufferInfo {
				id: BufferId(id),
				path: Some(PathBuf::from(format!("/tmp/buffer-{id}.txt"))),
				modified: true,
			})
			.collect();
		editor.next_id.store(ids.iter().copied().max().unwrap_or(0), Ordering::SeqCst);
		editor
	}

	pub fn set_current(&self, id: Option<u64>) {
		*self.current.lock() = id.map(BufferId);
	}

	/// Makes save and create fail with `message`.
	pub fn fail_with(&self, message: &str) {
		*self.failure.lock() = Some(message.to_string());
	}

	pub fn saved(&self) -> Vec<BufferId> {
		self.saved.lock().clone()
	}

	pub fn created(&self) -> usize {
		self.created.load(Ordering::SeqCst)
	}

	fn check(&self, command: &str) -> Result<(), AdapterError> {
		match self.failure.lock().as_ref() {
			Some(message) => Err(AdapterError::command(command, message.clone())),
			None => Ok(()),
		}
	}
}

#[async_trait]
impl EditorCommands for RecordingEditor {
	async fn list_buffers(&self) -> Result<Vec<BufferInfo>, AdapterError> {
		Ok(self.buffers.lock().clone())
	}

	async fn current_buffer(&self) -> Result<Option<BufferId>, AdapterError> {
		Ok(*self.current.lock())
	}

	async fn save_file(&self, buffer: BufferId, _path: Option<PathBuf>) -> Result<(), AdapterError> {
		self.check("save_file")?;
		self.saved.lock().push(buffer);
		Ok(())
	}

	async fn create_new_buffer(&self) -> Result<BufferId, AdapterError> {
		self.check("create_new_buffer")?;
		self.created.fetch_add(1, Ordering::SeqCst);
		Ok(BufferId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1))
	}
}

/// Scriptable stand-in for the privileged key monitor.
#[derive(Debug)]
pub struct MockAdapter {
	tx: Mutex<Option<mpsc::UnboundedSender<AdapterEvent>>>,
	permission: Mutex<Result<bool, AdapterError>>,
	start_with_fallback_error: Mutex<Option<AdapterError>>,
	start_error: Mutex<Option<AdapterError>>,
	listen_error: Mutex<Option<AdapterError>>,
	binding_error: Mutex<Option<AdapterError>>,
	bindings: Mutex<Vec<KeyBinding>>,
	calls: Mutex<Vec<String>>,
}

impl Default for MockAdapter {
	fn default() -> Self {
		Self {
			tx: Mutex::new(None),
			permission: Mutex::new(Ok(true)),
			start_with_fallback_error: Mutex::new(None),
			start_error: Mutex::new(None),
			listen_error: Mutex::new(None),
			binding_error: Mutex::new(None),
			bindings: Mutex::new(Vec::new()),
			calls: Mutex::new(Vec::new()),
		}
	}
}

impl MockAdapter {
	pub fn deny_permission(self) -> Self {
		*self.permission.lock() = Ok(false);
		self
	}

	pub fn fail_permission_probe(self) -> Self {
		*self.permission.lock() = Err(AdapterError::command("check_accessibility_permissions", "probe crashed"));
		self
	}

	pub fn fail_start_with_fallback(self) -> Self {
		*self.start_with_fallback_error.lock() = Some(AdapterError::command("start_key_monitoring_with_fallback", "unsupported"));
		self
	}

	pub fn fail_start(self) -> Self {
		*self.start_error.lock() = Some(AdapterError::command("start_key_monitoring", "no event tap"));
		self
	}

	pub fn fail_listen(self) -> Self {
		*self.listen_error.lock() = Some(AdapterError::Listen("event bridge closed".into()));
		self
	}

	pub fn fail_bindings(self, message: &str) -> Self {
		*self.binding_error.lock() = Some(AdapterError::command("register_key_binding", message));
		self
	}

	/// Pushes an event to the attached listener. Returns false if none is attached.
	pub fn send(&self, event: AdapterEvent) -> bool {
		self.tx.lock().as_ref().is_some_and(|tx| tx.send(event).is_ok())
	}

	/// Commands received so far, by wire name.
	pub fn calls(&self) -> Vec<String> {
		self.calls.lock().clone()
	}

	pub fn bindings(&self) -> Vec<KeyBinding> {
		self.bindings.lock().clone()
	}

	fn record(&self, call: &str) {
		self.calls.lock().push(call.to_string());
	}

	fn scripted(&self, slot: &Mutex<Option<AdapterError>>) -> Result<(), AdapterError> {
		match slot.lock().clone() {
			Some(error) => Err(error),
			None => Ok(()),
		}
	}
}

#[async_trait]
impl ChannelAdapter for MockAdapter {
	fn listen(&self) -> Result<AdapterEvents, AdapterError> {
		self.record("listen");
		self.scripted(&self.listen_error)?;
		let (tx, rx) = mpsc::unbounded_channel();
		*self.tx.lock() = Some(tx);
		Ok(rx)
	}

	async fn start_key_monitoring_with_fallback(&self) -> Result<(), AdapterError> {
		self.record("start_key_monitoring_with_fallback");
		self.scripted(&self.start_with_fallback_error)
	}

	async fn start_key_monitoring(&self) -> Result<(), AdapterError> {
		self.record("start_key_monitoring");
		self.scripted(&self.start_error)
	}

	async fn stop_key_monitoring(&self) -> Result<(), AdapterError> {
		self.record("stop_key_monitoring");
		Ok(())
	}

	async fn check_accessibility_permissions(&self) -> Result<bool, AdapterError> {
		self.record("check_accessibility_permissions");
		self.permission.lock().clone()
	}

	async fn register_key_binding(&self, binding: KeyBinding) -> Result<(), AdapterError> {
		self.record("register_key_binding");
		self.scripted(&self.binding_error)?;
		let mut bindings = self.bindings.lock();
		bindings.retain(|b| b.id != binding.id);
		bindings.push(binding);
		Ok(())
	}

	async fn unregister_key_binding(&self, id: &str) -> Result<(), AdapterError> {
		self.record("unregister_key_binding");
		self.scripted(&self.binding_error)?;
		self.bindings.lock().retain(|b| b.id != id);
		Ok(())
	}

	async fn get_key_bindings(&self) -> Result<Vec<KeyBinding>, AdapterError> {
		self.record("get_key_bindings");
		self.scripted(&self.binding_error)?;
		Ok(self.bindings())
	}
}

/// Readiness future resolving immediately to `adapter`.
pub fn ready(adapter: &Arc<MockAdapter>) -> impl Future<Output = Option<Arc<dyn ChannelAdapter>>> + use<> {
	let adapter: Arc<dyn ChannelAdapter> = adapter.clone();
	std::future::ready(Some(adapter))
}

/// Router wired to recording collaborators.
pub struct Harness {
	pub router: KeyRouter,
	pub surface: Arc<RecordingSurface>,
	pub editor: Arc<RecordingEditor>,
	pub toasts: Arc<ToastQueue>,
	pub events: broadcast::Receiver<UiEvent>,
}

impl Harness {
	/// Must be called inside a Tokio runtime.
	pub fn new() -> Self {
		Self::with_editor(RecordingEditor::default())
	}

	pub fn with_editor(editor: RecordingEditor) -> Self {
		Self::with_config(
			RouterConfig {
				platform: Platform::Other,
				..RouterConfig::default()
			},
			editor,
		)
	}

	pub fn with_config(config: RouterConfig, editor: RecordingEditor) -> Self {
		let surface = Arc::new(RecordingSurface::default());
		let editor = Arc::new(editor);
		let toasts = Arc::new(ToastQueue::new(ToastQueue::DEFAULT_CAPACITY));
		let router = KeyRouter::new(
			config,
			Collaborators {
				surface: surface.clone(),
				editor: editor.clone(),
				notifications: toasts.clone(),
			},
		);
		let events = router.bus().subscribe();
		Self {
			router,
			surface,
			editor,
			toasts,
			events,
		}
	}

	pub fn state(&self) -> OverlayState {
		self.router.state().snapshot()
	}

	/// Takes every broadcast emitted since the last drain.
	pub fn drain_events(&mut self) -> Vec<UiEvent> {
		let mut out = Vec::new();
		loop {
			match self.events.try_recv() {
				Ok(event) => out.push(event),
				Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
				Err(_) => break,
			}
		}
		out
	}

	pub fn drain_event_names(&mut self) -> Vec<&'static str> {
		self.drain_events().iter().map(UiEvent::name).collect()
	}
}

impl Default for Harness {
	fn default() -> Self {
		Self::new()
	}
}
