//! Error types for the input router and its collaborators.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reported across the collaborator boundary (channel adapter or
/// editor commands).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
	/// The privileged channel is not reachable.
	#[error("channel adapter unavailable")]
	Unavailable,
	/// A command round-trip failed.
	#[error("{message}")]
	Command {
		/// Wire name of the failed command.
		command: String,
		/// Failure reported by the collaborator.
		message: String,
	},
	/// Event listeners could not be attached.
	#[error("failed to listen for adapter events: {0}")]
	Listen(String),
}

impl AdapterError {
	pub fn command(command: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Command {
			command: command.into(),
			message: message.into(),
		}
	}
}

/// Errors surfaced by [`crate::KeyRouter`] to its callers.
#[derive(Debug, Error)]
pub enum RouterError {
	/// No channel adapter is connected.
	#[error("key channel is not available")]
	ChannelUnavailable,
	/// Listener attachment failed during initialization. The fallback is
	/// already installed when this is returned.
	#[error("failed to attach channel listeners: {0}")]
	ListenerAttach(#[source] AdapterError),
	/// A binding management command failed.
	#[error(transparent)]
	Adapter(#[from] AdapterError),
}

/// Errors decoding a named adapter event from the wire.
#[derive(Debug, Error)]
pub enum WireError {
	#[error("unknown adapter event: {0}")]
	UnknownEvent(String),
	#[error("malformed payload for {event}: {source}")]
	Payload {
		event: &'static str,
		#[source]
		source: serde_json::Error,
	},
}

/// Errors loading [`crate::RouterConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
	/// Error parsing TOML syntax or types.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),
	/// A value parsed but is out of range.
	#[error("invalid router config: {0}")]
	Invalid(String),
}
