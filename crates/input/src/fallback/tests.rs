use rstest::rstest;

use super::*;
use crate::test_helpers::RecordingSurface;

fn open(command_bar: bool, help: bool) -> OverlayState {
	OverlayState {
		command_bar_open: command_bar,
		help_open: help,
		..OverlayState::default()
	}
}

fn key(key: &str, modifiers: Modifiers, target: FocusKind) -> WindowKeyEvent {
	WindowKeyEvent::new(key, modifiers, target)
}

#[test]
fn install_attaches_exactly_once() {
	let surface = RecordingSurface::default();
	let capturer = FallbackCapturer::new(Platform::Other);

	assert!(capturer.install(&surface));
	assert!(!capturer.install(&surface));
	assert!(capturer.is_installed());
	assert_eq!(surface.listeners_attached(), 1);

	capturer.uninstall(&surface);
	capturer.uninstall(&surface);
	assert_eq!(surface.listeners_detached(), 1);
	assert!(!capturer.is_installed());
}

#[rstest]
#[case::div_ctrl(Platform::Other, Modifiers::CTRL, FocusKind::Other, Some(Gesture::ToggleCommandBar))]
#[case::div_meta_mac(Platform::MacOs, Modifiers::META, FocusKind::Other, Some(Gesture::ToggleCommandBar))]
#[case::meta_on_linux(Platform::Other, Modifiers::META, FocusKind::Other, None)]
#[case::in_textarea(Platform::Other, Modifiers::CTRL, FocusKind::TextEntry, None)]
#[case::in_command_input(Platform::Other, Modifiers::CTRL, FocusKind::CommandInput(String::new()), None)]
#[case::no_modifier(Platform::Other, Modifiers::NONE, FocusKind::Other, None)]
fn command_k(#[case] platform: Platform, #[case] modifiers: Modifiers, #[case] target: FocusKind, #[case] expected: Option<Gesture>) {
	let capturer = FallbackCapturer::new(platform);
	assert_eq!(capturer.recognize(&key("k", modifiers, target.clone()), &open(false, false)), expected);
	assert_eq!(capturer.recognize(&key("K", modifiers, target), &open(false, false)), expected);
}

#[rstest]
#[case::div_nothing_open(FocusKind::Other, open(false, false), true)]
#[case::text_nothing_open(FocusKind::TextEntry, open(false, false), false)]
#[case::text_help_open(FocusKind::TextEntry, open(false, true), true)]
#[case::command_input_bar_open(FocusKind::CommandInput("git".into()), open(true, false), true)]
#[case::text_tutorial_open(FocusKind::TextEntry, OverlayState { tutorial_open: true, ..OverlayState::default() }, true)]
fn escape(#[case] target: FocusKind, #[case] state: OverlayState, #[case] intercepted: bool) {
	let capturer = FallbackCapturer::new(Platform::Other);
	let gesture = capturer.recognize(&key("Escape", Modifiers::NONE, target), &state);
	assert_eq!(gesture.is_some(), intercepted);
	if intercepted {
		assert_eq!(gesture, Some(Gesture::Escape));
	}
}

#[test]
fn enter_submits_trimmed_text() {
	let capturer = FallbackCapturer::new(Platform::Other);
	let ev = key("Enter", Modifiers::NONE, FocusKind::CommandInput("  git status ".into()));
	assert_eq!(capturer.recognize(&ev, &open(true, false)), Some(Gesture::Submit("git status".into())));
}

#[test]
fn enter_with_blank_text_is_swallowed() {
	let capturer = FallbackCapturer::new(Platform::Other);
	let ev = key("Enter", Modifiers::NONE, FocusKind::CommandInput("   ".into()));
	assert_eq!(capturer.recognize(&ev, &open(true, false)), Some(Gesture::SwallowEnter));
}

#[test]
fn enter_outside_open_command_bar_passes_through() {
	let capturer = FallbackCapturer::new(Platform::Other);
	let in_input = key("Enter", Modifiers::NONE, FocusKind::CommandInput("ls".into()));
	assert_eq!(capturer.recognize(&in_input, &open(false, false)), None);
	let in_textarea = key("Enter", Modifiers::NONE, FocusKind::TextEntry);
	assert_eq!(capturer.recognize(&in_textarea, &open(true, false)), None);
}

#[test]
fn other_keys_pass_through() {
	let capturer = FallbackCapturer::new(Platform::Other);
	for k in ["a", "ArrowRight", "F1", "s"] {
		assert_eq!(capturer.recognize(&key(k, Modifiers::CTRL, FocusKind::Other), &open(true, true)), None, "{k}");
	}
}
