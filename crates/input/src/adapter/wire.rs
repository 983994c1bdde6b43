use serde::Deserialize;
use serde_json::Value;
use vuno_primitives::{KeyEvent, MonitoringMode};

use super::AdapterEvent;
use crate::error::WireError;

#[derive(Deserialize)]
struct ActionPayload {
	action: String,
}

#[derive(Deserialize)]
struct ModePayload {
	mode: MonitoringMode,
}

fn parse<T: for<'de> Deserialize<'de>>(event: &'static str, payload: &str) -> Result<T, WireError> {
	serde_json::from_str(payload).map_err(|source| WireError::Payload { event, source })
}

/// Error payloads arrive as a bare string, an object with an `error` field,
/// or something else entirely; the last case keeps the raw JSON.
fn error_text(payload: &str) -> String {
	match serde_json::from_str::<Value>(payload) {
		Ok(Value::String(s)) => s,
		Ok(Value::Object(map)) => match map.get("error") {
			Some(Value::String(s)) => s.clone(),
			_ => payload.to_string(),
		},
		_ => payload.to_string(),
	}
}

impl AdapterEvent {
	/// Decodes a named adapter event with its JSON payload.
	///
	/// Payloads of signal-only events are ignored.
	pub fn from_wire(name: &str, payload: &str) -> Result<Self, WireError> {
		Ok(match name {
			"key_action" => Self::KeyAction {
				action: parse::<ActionPayload>("key_action", payload)?.action,
			},
			"key_event" => Self::KeyEvent(parse::<KeyEvent>("key_event", payload)?),
			"key_monitoring_error" => Self::KeyMonitoringError { error: error_text(payload) },
			"key_monitoring_stopped" => Self::KeyMonitoringStopped,
			"key_monitoring_mode" => Self::KeyMonitoringMode {
				mode: parse::<ModePayload>("key_monitoring_mode", payload)?.mode,
			},
			"force_close_command_bar" => Self::ForceCloseCommandBar,
			"window-will-close" => Self::WindowWillClose,
			other => return Err(WireError::UnknownEvent(other.to_string())),
		})
	}
}
