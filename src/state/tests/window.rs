use super::common::{state_with_untitled, write_file};
use crate::command::Cycle;
use crate::command_table::CommandTable;
use crate::key::Side;
use crate::state::{EditorState, OverlayView, Prompt, WindowClose};

#[test]
fn new_window_takes_focus() {
	let (state, ids) = state_with_untitled(3);
	assert_eq!(state.focused(), Some(ids[2]));
	assert_eq!(state.focused_count(), 1);
	assert_eq!(state.window_title(ids[0]), "New File 1");
	assert_eq!(state.window_title(ids[2]), "New File 3");
}

#[test]
fn closing_focused_window_falls_back_to_previous() {
	let (mut state, ids) = state_with_untitled(3);
	state.focus_window(ids[1]);

	assert_eq!(state.close_window(ids[1]), WindowClose::Remaining(ids[0]));
	assert_eq!(state.focused(), Some(ids[0]));
	assert_eq!(state.focused_count(), 1);

	assert_eq!(state.close_window(ids[0]), WindowClose::Remaining(ids[2]));
	assert_eq!(state.close_window(ids[2]), WindowClose::LastClosed);
	assert_eq!(state.focused(), None);
	assert_eq!(state.focused_count(), 0);
	assert_eq!(state.close_window(ids[2]), WindowClose::NotFound);
}

#[test]
fn closing_unfocused_window_keeps_focus() {
	let (mut state, ids) = state_with_untitled(2);
	assert_eq!(state.close_window(ids[0]), WindowClose::Remaining(ids[1]));
	assert_eq!(state.focused(), Some(ids[1]));
}

#[test]
fn cycle_focus_wraps_around() {
	let (mut state, ids) = state_with_untitled(3);
	state.cycle_focus(Cycle::Next);
	assert_eq!(state.focused(), Some(ids[0]));
	state.cycle_focus(Cycle::Prev);
	assert_eq!(state.focused(), Some(ids[2]));
	state.cycle_focus(Cycle::Prev);
	assert_eq!(state.focused(), Some(ids[1]));
	assert_eq!(state.focused_count(), 1);
}

#[test]
fn failed_open_creates_no_window() {
	let dir = tempfile::tempdir().expect("tempdir");
	let mut state = EditorState::default();
	assert!(state.open_window(Some(&dir.path().join("nope.txt"))).is_err());
	assert!(state.windows.is_empty());
	assert!(state.focused().is_none());
	assert!(state.status_bar.message.starts_with("Unable to load"));
}

#[test]
fn titles_disambiguate_same_basename_and_mark_dirty() {
	let dir = tempfile::tempdir().expect("tempdir");
	std::fs::create_dir(dir.path().join("a")).expect("mkdir a");
	std::fs::create_dir(dir.path().join("b")).expect("mkdir b");
	let first = write_file(&dir.path().join("a"), "notes.txt", "one");
	let second = write_file(&dir.path().join("b"), "notes.txt", "two");
	let other = write_file(dir.path(), "todo.txt", "");

	let mut state = EditorState::default();
	let first = state.open_window(Some(&first)).expect("open first");
	let second = state.open_window(Some(&second)).expect("open second");
	let other = state.open_window(Some(&other)).expect("open other");

	assert!(state.window_title(first).ends_with("a/notes.txt"));
	assert!(state.window_title(second).ends_with("b/notes.txt"));
	assert_eq!(state.window_title(other), "todo.txt");

	state.focused_window_mut().expect("focused").buffer.insert_text("x");
	assert_eq!(state.window_title(other), "✍ todo.txt");
}

#[test]
fn overlay_only_on_focused_window() {
	let table = CommandTable::with_defaults().expect("default table");
	let (mut state, ids) = state_with_untitled(2);
	state.set_overlay(Some(OverlayView { side: Side::Left, keys: table.slice(Side::Left) }));
	assert!(state.windows[ids[1]].overlay.is_some());
	assert!(state.windows[ids[0]].overlay.is_none());

	state.focus_window(ids[0]);
	assert!(state.windows[ids[1]].overlay.is_none());
	assert!(state.overlay().is_none());
}

#[test]
fn closing_a_window_drops_prompts_aimed_at_it() {
	let (mut state, ids) = state_with_untitled(2);
	state.prompt = Some(Prompt::ConfirmClose { window: ids[1] });
	state.close_window(ids[1]);
	assert!(state.prompt.is_none());

	state.prompt = Some(Prompt::Language { window: ids[0], input: "rust".to_string() });
	state.open_window(None).expect("untitled window");
	state.close_window(ids[0]);
	assert!(state.prompt.is_none());

	state.prompt = Some(Prompt::Open { input: "x".to_string() });
	let third = state.open_window(None).expect("untitled window");
	state.close_window(third);
	assert!(state.prompt.is_some());
}

#[test]
fn cursor_label_is_one_based() {
	let (mut state, _) = state_with_untitled(1);
	state.focused_window_mut().expect("focused").buffer.insert_text("ab\ncd");
	assert_eq!(state.cursor_position_label().as_deref(), Some("Line 2, Column 3"));
}
