//! Bounded toast queue.

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use crate::surface::Notifications;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastKind {
	#[default]
	Info,
	Success,
	Warning,
	Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
	pub id: u64,
	pub message: String,
	pub kind: ToastKind,
	pub duration: Duration,
}

/// FIFO of displayed toasts; the oldest entry is dropped when full.
#[derive(Debug)]
pub struct ToastQueue {
	capacity: NonZeroUsize,
	next_id: AtomicU64,
	items: Mutex<VecDeque<Toast>>,
}

impl ToastQueue {
	pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

	pub const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::MIN.saturating_add(7);

	pub fn new(capacity: NonZeroUsize) -> Self {
		Self {
			capacity,
			next_id: AtomicU64::new(1),
			items: Mutex::new(VecDeque::with_capacity(capacity.get())),
		}
	}

	/// Queues a toast and returns its id.
	pub fn push(&self, message: impl Into<String>, kind: ToastKind) -> u64 {
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		let mut items = self.items.lock();
		if items.len() == self.capacity.get() {
			items.pop_front();
		}
		items.push_back(Toast {
			id,
			message: message.into(),
			kind,
			duration: Self::DEFAULT_DURATION,
		});
		id
	}

	/// Removes a toast by id. Returns false if it was already gone.
	pub fn remove(&self, id: u64) -> bool {
		let mut items = self.items.lock();
		let before = items.len();
		items.retain(|t| t.id != id);
		items.len() != before
	}

	pub fn snapshot(&self) -> Vec<Toast> {
		self.items.lock().iter().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.items.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Notifications for ToastQueue {
	fn visible(&self) -> usize {
		self.len()
	}

	fn dismiss_all(&self) {
		self.items.lock().clear();
	}
}
