//! Editor-state collaborator used by the save/new delegation actions.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AdapterError;

/// Identifier of an open editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BufferId(pub u64);

/// Entry in the editor's buffer listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferInfo {
	pub id: BufferId,
	#[serde(default)]
	pub path: Option<PathBuf>,
	#[serde(default)]
	pub modified: bool,
}

/// Request/response surface of the editor backend.
#[async_trait]
pub trait EditorCommands: Send + Sync {
	async fn list_buffers(&self) -> Result<Vec<BufferInfo>, AdapterError>;

	/// Buffer that currently has focus, when the backend tracks one.
	async fn current_buffer(&self) -> Result<Option<BufferId>, AdapterError> {
		Ok(None)
	}

	/// Saves `buffer`; `None` keeps its existing path.
	async fn save_file(&self, buffer: BufferId, path: Option<PathBuf>) -> Result<(), AdapterError>;

	async fn create_new_buffer(&self) -> Result<BufferId, AdapterError>;
}
