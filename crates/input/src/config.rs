//! Router timing and platform configuration.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use vuno_primitives::Platform;

use crate::error::ConfigError;

/// Tunables for the input router. All durations are milliseconds.
///
/// ```toml
/// ready_timeout_ms = 5000
/// force_close_reassert_ms = [25, 50]
/// platform = "macos"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
	/// Bounded wait for the channel adapter to become ready.
	pub ready_timeout_ms: u64,
	/// Delay before focusing the command input after the bar opens.
	pub command_input_focus_delay_ms: u64,
	/// Delay before refocusing the editor after help closes.
	pub help_close_refocus_ms: u64,
	/// Delay before refocusing the editor after the command bar closes.
	pub command_bar_close_refocus_ms: u64,
	/// Delays at which a forced close re-asserts the closed state.
	pub force_close_reassert_ms: Vec<u64>,
	/// Selects the fallback's command modifier.
	pub platform: Platform,
}

impl Default for RouterConfig {
	fn default() -> Self {
		Self {
			ready_timeout_ms: 5000,
			command_input_focus_delay_ms: 50,
			help_close_refocus_ms: 100,
			command_bar_close_refocus_ms: 50,
			force_close_reassert_ms: vec![25, 50],
			platform: Platform::current(),
		}
	}
}

impl RouterConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(src)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses, and validates a TOML file.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let src = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::from_toml_str(&src)?;
		tracing::debug!(path = %path.display(), "config.loaded");
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.ready_timeout_ms == 0 {
			return Err(ConfigError::Invalid("ready_timeout_ms must be > 0".into()));
		}
		if self.force_close_reassert_ms.is_empty() {
			return Err(ConfigError::Invalid("force_close_reassert_ms must not be empty".into()));
		}
		Ok(())
	}

	pub fn ready_timeout(&self) -> Duration {
		Duration::from_millis(self.ready_timeout_ms)
	}

	pub fn command_input_focus_delay(&self) -> Duration {
		Duration::from_millis(self.command_input_focus_delay_ms)
	}

	pub fn help_close_refocus(&self) -> Duration {
		Duration::from_millis(self.help_close_refocus_ms)
	}

	pub fn command_bar_close_refocus(&self) -> Duration {
		Duration::from_millis(self.command_bar_close_refocus_ms)
	}

	pub fn force_close_reassert(&self) -> impl Iterator<Item = Duration> + '_ {
		self.force_close_reassert_ms.iter().copied().map(Duration::from_millis)
	}
}
