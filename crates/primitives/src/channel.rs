use serde::{Deserialize, Serialize};

/// Which capture channel currently supplies key events.
///
/// Moves forward only: `Unknown -> BackendActive -> FallbackActive`, or
/// `Unknown -> FallbackActive` directly. There is no way back to
/// `BackendActive` within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelState {
	#[default]
	Unknown,
	BackendActive,
	FallbackActive,
}

impl ChannelState {
	const fn rank(self) -> u8 {
		match self {
			Self::Unknown => 0,
			Self::BackendActive => 1,
			Self::FallbackActive => 2,
		}
	}

	/// Returns true if moving from `self` to `next` is a legal forward step.
	pub const fn can_advance_to(self, next: ChannelState) -> bool {
		next.rank() > self.rank()
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Unknown => "unknown",
			Self::BackendActive => "backend_active",
			Self::FallbackActive => "fallback_active",
		}
	}
}

/// OS accessibility / input-monitoring permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Permission {
	Granted,
	Denied,
	#[default]
	Unknown,
}

impl From<bool> for Permission {
	fn from(granted: bool) -> Self {
		if granted { Self::Granted } else { Self::Denied }
	}
}

/// Capture scope reported by the privileged monitor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MonitoringMode {
	/// Keys are observed system-wide.
	Global,
	/// The monitor only sees keys while the window is focused.
	WindowFocusedOnly,
	Other(String),
}

impl MonitoringMode {
	pub fn as_str(&self) -> &str {
		match self {
			Self::Global => "global",
			Self::WindowFocusedOnly => "window_focused_only",
			Self::Other(mode) => mode,
		}
	}

	/// Returns true when the privileged channel can no longer be relied on.
	pub fn is_degraded(&self) -> bool {
		matches!(self, Self::WindowFocusedOnly)
	}
}

impl From<String> for MonitoringMode {
	fn from(mode: String) -> Self {
		match mode.as_str() {
			"global" => Self::Global,
			"window_focused_only" => Self::WindowFocusedOnly,
			_ => Self::Other(mode),
		}
	}
}

impl From<MonitoringMode> for String {
	fn from(mode: MonitoringMode) -> Self {
		mode.as_str().to_string()
	}
}
