//! Channel health monitoring.
//!
//! Tracks which capture channel is live and decides when the fallback
//! listener has to take over. There is no acknowledgement protocol with the
//! privileged monitor, so degradation is inferred from readiness timeouts,
//! the permission probe, and the monitor's own error/stop/mode signals.

use parking_lot::Mutex;
use vuno_primitives::{ChannelState, MonitoringMode, Permission, Platform};

use crate::error::AdapterError;
use crate::fallback::FallbackCapturer;
use crate::surface::UiSurface;

/// Why the fallback listener was installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackReason {
	/// The adapter never became ready within the bounded wait.
	ReadyTimeout,
	/// Attaching adapter listeners failed during initialization.
	ListenerAttachFailed,
	/// Neither start command succeeded.
	MonitoringStartFailed,
	PermissionDenied,
	/// The permission probe itself failed; assume the worst.
	PermissionProbeFailed,
	MonitoringError,
	MonitoringStopped,
	/// The monitor degraded to window-focused-only capture.
	WindowFocusedOnly,
}

impl FallbackReason {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::ReadyTimeout => "ready_timeout",
			Self::ListenerAttachFailed => "listener_attach_failed",
			Self::MonitoringStartFailed => "monitoring_start_failed",
			Self::PermissionDenied => "permission_denied",
			Self::PermissionProbeFailed => "permission_probe_failed",
			Self::MonitoringError => "monitoring_error",
			Self::MonitoringStopped => "monitoring_stopped",
			Self::WindowFocusedOnly => "window_focused_only",
		}
	}
}

/// Session-scoped view of channel and permission health.
#[derive(Debug)]
pub struct ChannelHealth {
	state: Mutex<ChannelState>,
	permission: Mutex<Permission>,
	fallback: FallbackCapturer,
}

impl ChannelHealth {
	pub fn new(platform: Platform) -> Self {
		Self {
			state: Mutex::new(ChannelState::Unknown),
			permission: Mutex::new(Permission::Unknown),
			fallback: FallbackCapturer::new(platform),
		}
	}

	pub fn state(&self) -> ChannelState {
		*self.state.lock()
	}

	pub fn permission(&self) -> Permission {
		*self.permission.lock()
	}

	pub fn fallback(&self) -> &FallbackCapturer {
		&self.fallback
	}

	pub fn fallback_installed(&self) -> bool {
		self.fallback.is_installed()
	}

	/// Moves the channel state forward. Backward moves are ignored.
	fn advance(&self, next: ChannelState) -> bool {
		let mut state = self.state.lock();
		if !state.can_advance_to(next) {
			return false;
		}
		tracing::debug!(from = state.as_str(), to = next.as_str(), "health.transition");
		*state = next;
		true
	}

	/// Records that the privileged channel accepted a start command.
	pub fn mark_backend_active(&self) -> bool {
		self.advance(ChannelState::BackendActive)
	}

	/// Installs the fallback listener at most once per session.
	///
	/// Returns true only for the call that performed the installation.
	pub fn install_fallback(&self, surface: &dyn UiSurface, reason: FallbackReason) -> bool {
		if !self.fallback.install(surface) {
			tracing::trace!(reason = reason.as_str(), "health.fallback_already_installed");
			return false;
		}
		self.advance(ChannelState::FallbackActive);
		tracing::warn!(reason = reason.as_str(), "health.fallback_installed");
		true
	}

	/// Records the permission probe result; returns a reason if the fallback is needed.
	pub fn record_permission(&self, probe: &Result<bool, AdapterError>) -> Option<FallbackReason> {
		match probe {
			Ok(granted) => {
				let permission = Permission::from(*granted);
				*self.permission.lock() = permission;
				tracing::debug!(?permission, "health.permission");
				(!granted).then_some(FallbackReason::PermissionDenied)
			}
			Err(error) => {
				*self.permission.lock() = Permission::Unknown;
				tracing::warn!(%error, "health.permission_probe_failed");
				Some(FallbackReason::PermissionProbeFailed)
			}
		}
	}

	/// Returns a reason if the reported mode means the fallback is needed.
	pub fn assess_mode(&self, mode: &MonitoringMode) -> Option<FallbackReason> {
		tracing::debug!(mode = mode.as_str(), "health.mode");
		mode.is_degraded().then_some(FallbackReason::WindowFocusedOnly)
	}

	/// Ends the session: detaches the fallback and forgets channel and permission state.
	pub fn end_session(&self, surface: &dyn UiSurface) {
		self.fallback.uninstall(surface);
		*self.state.lock() = ChannelState::Unknown;
		*self.permission.lock() = Permission::Unknown;
	}
}
