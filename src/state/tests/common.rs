use std::path::{Path, PathBuf};

use crate::state::{Buffer, EditorState, WindowId};

pub(super) fn buffer_with(text: &str) -> Buffer {
	Buffer::from_text(text)
}

pub(super) fn write_file(dir: &Path, name: &str, text: &str) -> PathBuf {
	let path = dir.join(name);
	std::fs::write(&path, text).expect("write fixture");
	path
}

pub(super) fn state_with_untitled(count: usize) -> (EditorState, Vec<WindowId>) {
	let mut state = EditorState::default();
	let ids = (0..count).map(|_| state.open_window(None).expect("untitled window")).collect();
	(state, ids)
}
