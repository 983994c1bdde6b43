use pretty_assertions::assert_eq;

use super::*;

#[test]
fn update_publishes_to_subscribers() {
	let store = StateStore::new();
	let mut rx = store.subscribe();
	assert!(!rx.has_changed().unwrap());

	let opened = store.update(|s| {
		s.command_bar_open = true;
		s.command_bar_open
	});

	assert!(opened);
	assert!(rx.has_changed().unwrap());
	assert!(rx.borrow_and_update().command_bar_open);
}

#[test]
fn clear_command_bar_drops_transient_fields() {
	let mut state = OverlayState {
		command_bar_open: true,
		command_text: "git st".into(),
		suggestions: vec!["git status".into()],
		command_execution_in_progress: true,
		ai_loading: true,
		status_message: "kept".into(),
		..OverlayState::default()
	};
	state.clear_command_bar();
	assert_eq!(
		state,
		OverlayState {
			status_message: "kept".into(),
			..OverlayState::default()
		}
	);
}

#[test]
fn save_flow_round_trip_restores_title() {
	let store = StateStore::new();
	store.set_has_unsaved_changes(true);
	store.start_saving("notes.md");
	let s = store.snapshot();
	assert!(s.is_saving);
	assert_eq!(s.save_filename, "notes.md");
	assert_eq!(s.command_bar_title, "Save as...");

	store.finish_saving();
	let s = store.snapshot();
	assert!(!s.is_saving);
	assert!(!s.has_unsaved_changes);
	assert_eq!(s.command_bar_title, DEFAULT_COMMAND_BAR_TITLE);
}

#[test]
fn save_confirmation_tracks_pending_action() {
	let store = StateStore::new();
	store.show_save_confirmation("open", "README.md");
	store.read(|s| {
		assert!(s.save_confirmation_open);
		assert_eq!(s.pending_action.as_deref(), Some("open"));
		assert_eq!(s.pending_args.as_deref(), Some("README.md"));
	});

	store.clear_save_confirmation();
	store.read(|s| {
		assert!(!s.save_confirmation_open);
		assert_eq!(s.pending_action, None);
		assert_eq!(s.command_bar_title, DEFAULT_COMMAND_BAR_TITLE);
	});
}

#[test]
fn open_tutorial_keeps_overlays_exclusive() {
	let store = StateStore::new();
	store.update(|s| s.command_bar_open = true);
	store.open_tutorial();
	let s = store.snapshot();
	assert!(s.tutorial_open);
	assert!(!s.command_bar_open);
	assert!(s.is_exclusive());
}

#[test]
fn reset_restores_initial_state() {
	let store = StateStore::new();
	store.set_command_text("ls");
	store.set_suggestions(vec!["ls -la".into()]);
	store.set_status_message("File saved successfully");
	store.update(|s| s.help_open = true);
	store.reset();
	assert_eq!(store.snapshot(), OverlayState::default());
}

#[test]
fn exclusivity_counts_only_modal_overlays() {
	let state = OverlayState {
		help_open: true,
		save_confirmation_open: true,
		..OverlayState::default()
	};
	assert_eq!(state.open_overlay_count(), 1);
	assert!(state.is_exclusive());

	let contrived = OverlayState {
		help_open: true,
		command_bar_open: true,
		..OverlayState::default()
	};
	assert!(!contrived.is_exclusive());
}
