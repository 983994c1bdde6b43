//! File actions delegated to the editor backend.
//!
//! Failures land in the status message and are never retried or re-thrown.

use crate::bus::UiEvent;
use crate::editor::BufferId;
use crate::error::AdapterError;
use crate::router::RouterInner;

impl RouterInner {
	/// Picks the buffer to save: the backend's current buffer when it is
	/// listed, otherwise the first listed buffer.
	async fn active_buffer(&self) -> Result<Option<BufferId>, AdapterError> {
		let buffers = self.editor.list_buffers().await?;
		let Some(first) = buffers.first() else {
			return Ok(None);
		};
		let current = self.editor.current_buffer().await?;
		Ok(Some(match current {
			Some(id) if buffers.iter().any(|b| b.id == id) => id,
			_ => first.id,
		}))
	}

	pub(crate) async fn save_current_file(&self) {
		let result = async {
			let Some(buffer_id) = self.active_buffer().await? else {
				tracing::debug!("router.save_no_buffers");
				return Ok(None);
			};
			self.editor.save_file(buffer_id, None).await?;
			Ok::<_, AdapterError>(Some(buffer_id))
		}
		.await;

		match result {
			Ok(None) => {}
			Ok(Some(buffer_id)) => {
				self.store.set_status_message("File saved successfully");
				self.bus.emit(UiEvent::FileSaved { buffer_id });
				tracing::info!(buffer = buffer_id.0, "router.file_saved");
			}
			Err(error) => {
				tracing::error!(%error, "router.save_failed");
				self.store.set_status_message(format!("Error saving file: {error}"));
			}
		}
	}

	pub(crate) async fn create_new_file(&self) {
		match self.editor.create_new_buffer().await {
			Ok(buffer_id) => {
				self.bus.emit(UiEvent::NewFileCreated { buffer_id });
				self.store.set_status_message("New file created");
				tracing::info!(buffer = buffer_id.0, "router.new_file_created");
			}
			Err(error) => {
				tracing::error!(%error, "router.new_file_failed");
				self.store.set_status_message(format!("Error creating new file: {error}"));
			}
		}
	}

	pub(crate) fn open_file_dialog(&self) {
		self.bus.emit(UiEvent::OpenFileDialog);
	}
}
