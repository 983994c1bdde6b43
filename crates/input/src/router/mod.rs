//! Action router: the composition point of both capture channels.
//!
//! # Purpose
//!
//! * Decides which capture channel supplies key events: the privileged monitor behind [`ChannelAdapter`] or the window-scoped fallback.
//! * Translates actions from either channel into overlay transitions and delegated file commands.
//! * Degrades to the fallback when the privileged channel is missing, denied, or reports trouble.
//!
//! # Mental model
//!
//! * [`KeyRouter`] is a clonable handle owned by the composition root; there is no global accessor.
//! * Privileged actions arrive through an event pump spawned by [`KeyRouter::initialize`]; fallback keys arrive through [`KeyRouter::handle_window_key`].
//! * Both paths end in `RouterInner::dispatch_sync` (reached from `RouterInner::handle` for backend actions), the single place action semantics are defined.
//! * Once the fallback is live it owns the overlay gestures; backend `toggle_command_bar` and `escape` are dropped so one press acts once.
//!
//! # Key types
//!
//! | Type | Meaning | Constraints | Constructed / mutated in |
//! |---|---|---|---|
//! | [`ChannelState`] | Which channel is live | Moves forward only within a session | `ChannelHealth::mark_backend_active`, `ChannelHealth::install_fallback` |
//! | [`crate::OverlayState`] | What overlay is visible | At most one of command bar, help, tutorial open on router paths | overlay transitions |
//! | [`AdapterEvent`] | Inbound privileged signal | Processed in emission order | event pump |
//! | [`UiEvent`] | Outbound UI broadcast | Fire-and-forget | [`UiBus::emit`] |
//!
//! # Invariants
//!
//! * Must attach the fallback listener at most once per session.
//! * Must never move the channel state from `FallbackActive` back to `BackendActive`.
//! * Must produce identical transitions for the same action name on both channels.
//! * Must install the fallback before returning a listener attachment error.
//! * Must not run an overlay gesture twice when both channels observe one key press.
//! * Must connect at most once when `initialize` calls overlap.
//!
//! # Data flow
//!
//! 1. `initialize` waits (bounded) for the adapter, attaches listeners, starts monitoring, then probes permission.
//! 2. Adapter events feed the pump; `key_action` goes to `handle`, health signals may install the fallback.
//! 3. Overlay transitions publish a new [`crate::StateStore`] snapshot and schedule focus side effects.
//! 4. `window-will-close` or [`KeyRouter::cleanup`] stops monitoring and detaches every listener.

mod delegate;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use vuno_primitives::{Action, ActionName, ChannelState, KeyBinding, KeyPhase, Permission};

use crate::adapter::{AdapterEvent, AdapterEvents, ChannelAdapter};
use crate::bus::{UiBus, UiEvent};
use crate::config::RouterConfig;
use crate::editor::EditorCommands;
use crate::error::{RouterError, WireError};
use crate::fallback::{Gesture, KeyDisposition, WindowKeyEvent};
use crate::health::{ChannelHealth, FallbackReason};
use crate::state::StateStore;
use crate::surface::{Notifications, UiSurface};

/// Error string the monitor reports when OS permission is missing.
const ACCESSIBILITY_PERMISSION_REQUIRED: &str = "accessibility_permission_required";

/// External collaborators injected by the composition root.
#[derive(Clone)]
pub struct Collaborators {
	pub surface: Arc<dyn UiSurface>,
	pub editor: Arc<dyn EditorCommands>,
	pub notifications: Arc<dyn Notifications>,
}

pub(crate) struct RouterInner {
	pub(crate) config: RouterConfig,
	pub(crate) store: StateStore,
	pub(crate) bus: UiBus,
	pub(crate) surface: Arc<dyn UiSurface>,
	pub(crate) editor: Arc<dyn EditorCommands>,
	pub(crate) notifications: Arc<dyn Notifications>,
	pub(crate) health: ChannelHealth,
	pub(crate) runtime: Handle,
	adapter: RwLock<Option<Arc<dyn ChannelAdapter>>>,
	initialized: AtomicBool,
	initializing: AtomicBool,
	pump: Mutex<Option<CancellationToken>>,
}

/// Handle to the input router.
#[derive(Clone)]
pub struct KeyRouter {
	inner: Arc<RouterInner>,
}

impl KeyRouter {
	/// Creates a router with a fresh state store and bus.
	///
	/// # Panics
	///
	/// Panics if called outside a Tokio runtime; timers and the adapter event
	/// pump are spawned on the runtime current at construction.
	pub fn new(config: RouterConfig, collaborators: Collaborators) -> Self {
		Self::with_state(config, collaborators, StateStore::new(), UiBus::default())
	}

	/// Creates a router over an existing state store and bus.
	pub fn with_state(config: RouterConfig, collaborators: Collaborators, store: StateStore, bus: UiBus) -> Self {
		let Collaborators {
			surface,
			editor,
			notifications,
		} = collaborators;
		Self {
			inner: Arc::new(RouterInner {
				health: ChannelHealth::new(config.platform),
				config,
				store,
				bus,
				surface,
				editor,
				notifications,
				runtime: Handle::current(),
				adapter: RwLock::new(None),
				initialized: AtomicBool::new(false),
				initializing: AtomicBool::new(false),
				pump: Mutex::new(None),
			}),
		}
	}

	pub fn state(&self) -> &StateStore {
		&self.inner.store
	}

	pub fn bus(&self) -> &UiBus {
		&self.inner.bus
	}

	pub fn config(&self) -> &RouterConfig {
		&self.inner.config
	}

	pub fn channel_state(&self) -> ChannelState {
		self.inner.health.state()
	}

	pub fn permission(&self) -> Permission {
		self.inner.health.permission()
	}

	pub fn fallback_installed(&self) -> bool {
		self.inner.health.fallback_installed()
	}

	pub fn is_initialized(&self) -> bool {
		self.inner.initialized.load(Ordering::Acquire)
	}

	/// Connects to the privileged channel, or installs the fallback if it
	/// cannot be trusted.
	///
	/// `ready` resolves to the adapter once it is available, or `None` if it
	/// never will be. It is awaited for at most
	/// [`RouterConfig::ready_timeout`]. Only a listener attachment failure is
	/// returned as an error, and the fallback is installed before returning it.
	///
	/// Calls made while a session is up or another call is still connecting
	/// return `Ok(())` without touching the adapter.
	pub async fn initialize<F>(&self, ready: F) -> Result<(), RouterError>
	where
		F: Future<Output = Option<Arc<dyn ChannelAdapter>>>,
	{
		let Some(_connecting) = ConnectingGuard::acquire(&self.inner.initializing) else {
			tracing::debug!("router.initialize_in_progress");
			return Ok(());
		};
		if self.is_initialized() {
			return Ok(());
		}
		self.connect(ready).await
	}

	async fn connect<F>(&self, ready: F) -> Result<(), RouterError>
	where
		F: Future<Output = Option<Arc<dyn ChannelAdapter>>>,
	{
		let inner = &self.inner;

		let adapter = match tokio::time::timeout(inner.config.ready_timeout(), ready).await {
			Ok(Some(adapter)) => adapter,
			Ok(None) => {
				tracing::warn!("router.adapter_unavailable");
				inner.install_fallback(FallbackReason::ReadyTimeout);
				inner.initialized.store(true, Ordering::Release);
				return Ok(());
			}
			Err(_) => {
				tracing::warn!(timeout_ms = inner.config.ready_timeout_ms, "router.adapter_ready_timeout");
				inner.install_fallback(FallbackReason::ReadyTimeout);
				inner.initialized.store(true, Ordering::Release);
				return Ok(());
			}
		};

		let events = match adapter.listen() {
			Ok(events) => events,
			Err(error) => {
				tracing::error!(%error, "router.listen_failed");
				inner.install_fallback(FallbackReason::ListenerAttachFailed);
				inner.initialized.store(false, Ordering::Release);
				return Err(RouterError::ListenerAttach(error));
			}
		};
		*inner.adapter.write() = Some(Arc::clone(&adapter));
		inner.spawn_pump(events);

		let started = match adapter.start_key_monitoring_with_fallback().await {
			Ok(()) => true,
			Err(error) => {
				tracing::warn!(%error, "router.start_with_fallback_failed");
				match adapter.start_key_monitoring().await {
					Ok(()) => true,
					Err(error) => {
						tracing::warn!(%error, "router.start_failed");
						false
					}
				}
			}
		};
		if started {
			inner.health.mark_backend_active();
		} else {
			inner.install_fallback(FallbackReason::MonitoringStartFailed);
		}

		inner.initialized.store(true, Ordering::Release);
		tracing::info!(channel = inner.health.state().as_str(), "router.initialized");

		let probe = adapter.check_accessibility_permissions().await;
		if let Some(reason) = inner.health.record_permission(&probe) {
			inner.install_fallback(reason);
		}
		Ok(())
	}

	/// Re-reads the OS permission flag.
	pub async fn probe_permissions(&self) -> Permission {
		let Some(adapter) = self.inner.adapter() else {
			return Permission::Unknown;
		};
		let probe = adapter.check_accessibility_permissions().await;
		if let Some(reason) = self.inner.health.record_permission(&probe) {
			self.inner.install_fallback(reason);
		}
		self.inner.health.permission()
	}

	/// Installs the fallback listener; returns false if it already was.
	pub fn install_fallback(&self, reason: FallbackReason) -> bool {
		self.inner.install_fallback(reason)
	}

	/// Dispatches a named action from either channel.
	pub async fn handle(&self, action: Action) {
		self.inner.handle(action).await;
	}

	/// Feeds an adapter event as if it arrived on the event stream.
	pub async fn dispatch_event(&self, event: AdapterEvent) {
		self.inner.on_adapter_event(event).await;
	}

	/// Decodes and dispatches a named wire event.
	pub async fn dispatch_wire(&self, name: &str, payload: &str) -> Result<(), WireError> {
		let event = AdapterEvent::from_wire(name, payload)?;
		self.dispatch_event(event).await;
		Ok(())
	}

	/// Entry point of the window-scoped listener.
	///
	/// Keys pass through untouched while the fallback is not installed.
	pub fn handle_window_key(&self, event: &WindowKeyEvent) -> KeyDisposition {
		let inner = &self.inner;
		if !inner.health.fallback_installed() {
			return KeyDisposition::PassThrough;
		}
		let gesture = inner.store.read(|state| inner.health.fallback().recognize(event, state));
		let Some(gesture) = gesture else {
			return KeyDisposition::PassThrough;
		};
		tracing::debug!(key = %event.key, ?gesture, "fallback.gesture");
		let action = match gesture {
			Gesture::ToggleCommandBar => Action::fallback(ActionName::ToggleCommandBar),
			Gesture::Escape => Action::fallback(ActionName::Escape),
			Gesture::Submit(command) => {
				inner.submit_command(command);
				return KeyDisposition::Handled;
			}
			Gesture::SwallowEnter => return KeyDisposition::Handled,
		};
		inner.dispatch_sync(&action);
		KeyDisposition::Handled
	}

	pub async fn register_key_binding(&self, binding: KeyBinding) -> Result<(), RouterError> {
		let adapter = self.inner.adapter().ok_or(RouterError::ChannelUnavailable)?;
		let id = binding.id.clone();
		adapter.register_key_binding(binding).await.inspect_err(|error| {
			tracing::error!(%id, %error, "router.register_binding_failed");
		})?;
		tracing::debug!(%id, "router.binding_registered");
		Ok(())
	}

	pub async fn unregister_key_binding(&self, id: &str) -> Result<(), RouterError> {
		let adapter = self.inner.adapter().ok_or(RouterError::ChannelUnavailable)?;
		adapter.unregister_key_binding(id).await.inspect_err(|error| {
			tracing::error!(%id, %error, "router.unregister_binding_failed");
		})?;
		tracing::debug!(%id, "router.binding_unregistered");
		Ok(())
	}

	/// Lists the monitor's bindings; empty when the channel is unavailable.
	pub async fn get_key_bindings(&self) -> Vec<KeyBinding> {
		let Some(adapter) = self.inner.adapter() else {
			return Vec::new();
		};
		adapter.get_key_bindings().await.unwrap_or_else(|error| {
			tracing::warn!(%error, "router.list_bindings_failed");
			Vec::new()
		})
	}

	/// Tears the session down: stops monitoring, detaches every listener.
	pub async fn cleanup(&self) {
		self.inner.cleanup().await;
	}

	/// Restores the initial overlay state.
	pub fn reset(&self) {
		self.inner.store.reset();
	}

	#[cfg(test)]
	pub(crate) fn inner(&self) -> &Arc<RouterInner> {
		&self.inner
	}
}

impl RouterInner {
	pub(crate) fn adapter(&self) -> Option<Arc<dyn ChannelAdapter>> {
		self.adapter.read().clone()
	}

	pub(crate) fn install_fallback(&self, reason: FallbackReason) -> bool {
		self.health.install_fallback(&*self.surface, reason)
	}

	fn spawn_pump(self: &Arc<Self>, mut events: AdapterEvents) {
		let token = CancellationToken::new();
		if let Some(previous) = self.pump.lock().replace(token.clone()) {
			previous.cancel();
		}
		let inner = Arc::clone(self);
		self.runtime.spawn(async move {
			loop {
				tokio::select! {
					biased;
					_ = token.cancelled() => break,
					event = events.recv() => match event {
						Some(event) => inner.on_adapter_event(event).await,
						None => {
							tracing::debug!("router.adapter_stream_closed");
							break;
						}
					},
				}
			}
			tracing::debug!("router.pump_stopped");
		});
	}

	pub(crate) async fn on_adapter_event(self: &Arc<Self>, event: AdapterEvent) {
		tracing::trace!(event = event.name(), "router.adapter_event");
		match event {
			AdapterEvent::KeyAction { action } => {
				let action = Action::backend(action.as_str());
				if self.fallback_owns(&action.name) {
					tracing::debug!(action = %action.name, "router.backend_action_dropped");
				} else {
					self.handle(action).await;
				}
			}
			AdapterEvent::KeyEvent(key) => {
				if key.phase == KeyPhase::Press {
					tracing::trace!(key = %key.key, modifiers = %key.modifiers.join("+"), "router.key_pressed");
				}
			}
			AdapterEvent::KeyMonitoringError { error } => {
				tracing::warn!(%error, "router.monitoring_error");
				if error == ACCESSIBILITY_PERMISSION_REQUIRED {
					self.bus.emit(UiEvent::AccessibilityPermissionRequired { error });
				}
				self.install_fallback(FallbackReason::MonitoringError);
			}
			AdapterEvent::KeyMonitoringStopped => {
				tracing::warn!("router.monitoring_stopped");
				self.install_fallback(FallbackReason::MonitoringStopped);
			}
			AdapterEvent::KeyMonitoringMode { mode } => {
				let reason = self.health.assess_mode(&mode);
				self.bus.emit(UiEvent::KeyMonitoringModeChanged { mode });
				if let Some(reason) = reason {
					self.install_fallback(reason);
				}
			}
			AdapterEvent::ForceCloseCommandBar => self.force_close_command_bar(),
			AdapterEvent::WindowWillClose => self.cleanup().await,
		}
	}

	/// Dispatches purely on the action name; the channel is diagnostic only.
	pub(crate) async fn handle(self: &Arc<Self>, action: Action) {
		if self.dispatch_sync(&action) {
			return;
		}
		match action.name {
			ActionName::SaveFile => self.save_current_file().await,
			ActionName::NewFile => self.create_new_file().await,
			_ => {}
		}
	}

	/// Runs actions that need no editor round trip. Returns false for the rest.
	pub(crate) fn dispatch_sync(self: &Arc<Self>, action: &Action) -> bool {
		tracing::debug!(action = %action.name, channel = action.channel.as_str(), "router.dispatch");
		match &action.name {
			ActionName::ToggleCommandBar => self.toggle_command_bar(),
			ActionName::ToggleHelp => self.toggle_help(),
			ActionName::Escape => {
				self.escape();
			}
			ActionName::OpenFile => self.open_file_dialog(),
			ActionName::Custom(action) => {
				tracing::debug!(%action, "router.custom_action");
				self.bus.emit(UiEvent::KeyAction { action: action.clone() });
			}
			ActionName::SaveFile | ActionName::NewFile => return false,
		}
		true
	}

	/// Overlay gestures belong to the window listener once it is the live channel.
	fn fallback_owns(&self, name: &ActionName) -> bool {
		self.health.state() == ChannelState::FallbackActive
			&& matches!(name, ActionName::ToggleCommandBar | ActionName::Escape)
	}

	async fn cleanup(&self) {
		let adapter = self.adapter.write().take();
		if let Some(adapter) = adapter
			&& let Err(error) = adapter.stop_key_monitoring().await
		{
			tracing::warn!(%error, "router.stop_failed");
		}
		if let Some(token) = self.pump.lock().take() {
			token.cancel();
		}
		self.health.end_session(&*self.surface);
		self.initialized.store(false, Ordering::Release);
		tracing::info!("router.cleaned_up");
	}
}

/// Holds the connecting flag for one `initialize` call.
struct ConnectingGuard<'a>(&'a AtomicBool);

impl<'a> ConnectingGuard<'a> {
	fn acquire(flag: &'a AtomicBool) -> Option<Self> {
		flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.ok()
			.map(|_| Self(flag))
	}
}

impl Drop for ConnectingGuard<'_> {
	fn drop(&mut self) {
		self.0.store(false, Ordering::Release);
	}
}

#[cfg(test)]
mod invariants;
