mod modifiers;

pub use modifiers::Modifiers;
use serde::{Deserialize, Serialize};

/// Host platform, as far as key conventions are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
	MacOs,
	Other,
}

impl Platform {
	/// Platform this binary was compiled for.
	pub const fn current() -> Self {
		#[cfg(target_os = "macos")]
		{
			Self::MacOs
		}
		#[cfg(not(target_os = "macos"))]
		{
			Self::Other
		}
	}

	/// Human-facing name of the command modifier.
	pub const fn command_label(self) -> &'static str {
		match self {
			Self::MacOs => "Command",
			Self::Other => "Control",
		}
	}
}

impl Default for Platform {
	fn default() -> Self {
		Self::current()
	}
}

/// Key binding owned by the privileged monitor.
///
/// The router only forwards registration requests; it never stores these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
	pub id: String,
	pub keys: Vec<String>,
	pub action: String,
	pub description: String,
	/// Scope such as `global`, `editor`, or `command_bar`.
	pub context: String,
}

impl KeyBinding {
	pub fn new(id: &str, keys: &[&str], action: &str, description: impl Into<String>, context: &str) -> Self {
		Self {
			id: id.to_string(),
			keys: keys.iter().map(|k| k.to_string()).collect(),
			action: action.to_string(),
			description: description.into(),
			context: context.to_string(),
		}
	}
}

/// Press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPhase {
	Press,
	Release,
}

/// Raw key event reported by the privileged monitor. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
	pub key: String,
	pub modifiers: Vec<String>,
	#[serde(rename = "action")]
	pub phase: KeyPhase,
	pub timestamp: u64,
}

/// Bindings the privileged monitor ships with.
///
/// The command bar has no default chord here: Escape and the fallback's
/// command+K cover it.
pub fn default_key_bindings(platform: Platform) -> Vec<KeyBinding> {
	let cmd = platform.command_label();
	vec![
		KeyBinding::new("help", &["f1"], "toggle_help", "Toggle help (F1)", "global"),
		KeyBinding::new("escape", &["escape"], "escape", "Close dialogs/menus (Escape)", "global"),
		KeyBinding::new("save_file", &["cmdorctrl", "s"], "save_file", format!("Save file ({cmd}+S)"), "editor"),
		KeyBinding::new("new_file", &["cmdorctrl", "n"], "new_file", format!("New file ({cmd}+N)"), "global"),
		KeyBinding::new("open_file", &["cmdorctrl", "o"], "open_file", format!("Open file ({cmd}+O)"), "global"),
	]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn command_modifier_follows_platform() {
		assert!(Modifiers::META.has_command(Platform::MacOs));
		assert!(!Modifiers::CTRL.has_command(Platform::MacOs));
		assert!(Modifiers::CTRL.has_command(Platform::Other));
		assert!(!Modifiers::META.has_command(Platform::Other));
		assert!(Modifiers::NONE.shift().ctrl().has_command(Platform::Other));
	}

	#[test]
	fn key_event_uses_wire_field_names() {
		let json = r#"{"key":"k","modifiers":["meta"],"action":"press","timestamp":42}"#;
		let event: KeyEvent = serde_json::from_str(json).unwrap();
		assert_eq!(event.phase, KeyPhase::Press);
		assert_eq!(event.modifiers, vec!["meta".to_string()]);
		assert_eq!(serde_json::to_string(&event).unwrap(), json);
	}

	#[test]
	fn default_bindings_have_unique_ids() {
		let bindings = default_key_bindings(Platform::Other);
		let mut ids: Vec<_> = bindings.iter().map(|b| b.id.as_str()).collect();
		ids.sort_unstable();
		ids.dedup();
		assert_eq!(ids.len(), bindings.len());
		assert!(bindings.iter().all(|b| b.action != "toggle_command_bar"));
		assert_eq!(default_key_bindings(Platform::MacOs)[2].description, "Save file (Command+S)");
	}
}
