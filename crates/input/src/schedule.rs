use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Named one-shot timers used for refocus and re-assertion.
///
/// Timers are fire-and-forget: a later action does not cancel a pending one,
/// so callbacks must tolerate state that changed in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Timer {
	CommandInputFocus,
	EditorRefocus,
	ForceCloseReassert,
}

impl Timer {
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::CommandInputFocus => "command_input_focus",
			Self::EditorRefocus => "editor_refocus",
			Self::ForceCloseReassert => "force_close_reassert",
		}
	}
}

/// Runs `f` on `runtime` after `delay`.
pub(crate) fn after<F>(runtime: &Handle, timer: Timer, delay: Duration, f: F) -> JoinHandle<()>
where
	F: FnOnce() + Send + 'static,
{
	tracing::trace!(timer = timer.as_str(), delay_ms = delay.as_millis() as u64, "router.schedule");
	runtime.spawn(async move {
		tokio::time::sleep(delay).await;
		tracing::trace!(timer = timer.as_str(), "router.timer_fired");
		f();
	})
}
