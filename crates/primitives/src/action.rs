use std::fmt;

/// Capture channel an action arrived from.
///
/// Only used for diagnostics; both channels drive identical transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
	/// Out-of-process, OS-level key monitor.
	Backend,
	/// In-process, window-scoped key listener.
	Fallback,
}

impl Channel {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Backend => "backend",
			Self::Fallback => "fallback",
		}
	}
}

/// Symbolic action name.
///
/// Names outside the built-in set are carried as [`ActionName::Custom`] so
/// other collaborators can extend the action vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionName {
	ToggleCommandBar,
	ToggleHelp,
	Escape,
	SaveFile,
	NewFile,
	OpenFile,
	Custom(String),
}

impl ActionName {
	/// Parses a wire action name. Never fails.
	pub fn parse(name: &str) -> Self {
		match name {
			"toggle_command_bar" => Self::ToggleCommandBar,
			"toggle_help" => Self::ToggleHelp,
			"escape" => Self::Escape,
			"save_file" => Self::SaveFile,
			"new_file" => Self::NewFile,
			"open_file" => Self::OpenFile,
			other => Self::Custom(other.to_string()),
		}
	}

	/// Returns the wire name.
	pub fn as_str(&self) -> &str {
		match self {
			Self::ToggleCommandBar => "toggle_command_bar",
			Self::ToggleHelp => "toggle_help",
			Self::Escape => "escape",
			Self::SaveFile => "save_file",
			Self::NewFile => "new_file",
			Self::OpenFile => "open_file",
			Self::Custom(name) => name,
		}
	}

	pub fn is_custom(&self) -> bool {
		matches!(self, Self::Custom(_))
	}
}

impl From<&str> for ActionName {
	fn from(name: &str) -> Self {
		Self::parse(name)
	}
}

impl fmt::Display for ActionName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A transient, channel-tagged action. Never queued beyond one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
	pub name: ActionName,
	pub channel: Channel,
}

impl Action {
	pub fn new(name: impl Into<ActionName>, channel: Channel) -> Self {
		Self {
			name: name.into(),
			channel,
		}
	}

	pub fn backend(name: impl Into<ActionName>) -> Self {
		Self::new(name, Channel::Backend)
	}

	pub fn fallback(name: impl Into<ActionName>) -> Self {
		Self::new(name, Channel::Fallback)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builtin_names_survive_parse() {
		for name in ["toggle_command_bar", "toggle_help", "escape", "save_file", "new_file", "open_file"] {
			let parsed = ActionName::parse(name);
			assert!(!parsed.is_custom(), "{name} should be a builtin");
			assert_eq!(parsed.as_str(), name);
		}
	}

	#[test]
	fn unknown_names_are_custom_not_rejected() {
		let parsed = ActionName::parse("toggle_minimap");
		assert_eq!(parsed, ActionName::Custom("toggle_minimap".into()));
		assert_eq!(parsed.to_string(), "toggle_minimap");
	}
}
