use std::path::Path;

use slotmap::{SlotMap, new_key_type};

use crate::clipboard::Clipboard;
use crate::command_table::OverlayKey;
use crate::config::EditorSettings;
use crate::key::Side;

mod buffer;
mod window;

pub use buffer::{Buffer, BufferError, Cursor};
pub use window::WindowClose;
pub(crate) use window::error_chain;

new_key_type! { pub struct WindowId; }

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
	pub side: Side,
	pub keys: Vec<OverlayKey>,
}

#[derive(Debug, Clone)]
pub struct Window {
	pub buffer:          Buffer,
	pub overlay:         Option<OverlayView>,
	pub focused:         bool,
	pub untitled_number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
	Open { input: String },
	SaveAs { window: WindowId, input: String, close_after: bool },
	ConfirmClose { window: WindowId },
	Language { window: WindowId, input: String },
}

impl Prompt {
	pub fn text(&self) -> String {
		match self {
			Prompt::Open { input } => format!("Open file: {}", input),
			Prompt::SaveAs { input, .. } => format!("Save as: {}", input),
			Prompt::Language { input, .. } => format!("Language (or plain): {}", input),
			Prompt::ConfirmClose { .. } => {
				"Unsaved changes. [s] save and close, [d] discard, [esc] cancel".to_string()
			}
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBarState {
	pub message: String,
}

#[derive(Debug)]
pub struct EditorState {
	pub title:      String,
	pub windows:    SlotMap<WindowId, Window>,
	pub window_order: Vec<WindowId>,
	pub clipboard:  Clipboard,
	pub settings:   EditorSettings,
	pub prompt:     Option<Prompt>,
	pub status_bar: StatusBarState,
	focused:        Option<WindowId>,
	next_untitled:  u32,
}

impl Default for EditorState {
	fn default() -> Self {
		Self::new(EditorSettings::default())
	}
}

impl EditorState {
	pub fn new(settings: EditorSettings) -> Self {
		Self {
			title: "chordpad".to_string(),
			windows: SlotMap::with_key(),
			window_order: Vec::new(),
			clipboard: Clipboard::new(),
			settings,
			prompt: None,
			status_bar: StatusBarState::default(),
			focused: None,
			next_untitled: 1,
		}
	}

	pub fn focused(&self) -> Option<WindowId> {
		self.focused
	}

	pub fn focused_window(&self) -> Option<&Window> {
		self.focused.and_then(|id| self.windows.get(id))
	}

	pub fn focused_window_mut(&mut self) -> Option<&mut Window> {
		self.focused.and_then(|id| self.windows.get_mut(id))
	}

	pub fn focused_buffer(&self) -> Option<&Buffer> {
		self.focused_window().map(|window| &window.buffer)
	}

	pub fn focused_buffer_and_clipboard(&mut self) -> Option<(&mut Buffer, &mut Clipboard)> {
		let window = self.focused.and_then(|id| self.windows.get_mut(id))?;
		Some((&mut window.buffer, &mut self.clipboard))
	}

	pub fn cursor_position_label(&self) -> Option<String> {
		let cursor = self.focused_buffer()?.cursor();
		Some(format!("Line {}, Column {}", cursor.line + 1, cursor.column + 1))
	}

	pub fn status_line(&self) -> String {
		match &self.prompt {
			Some(prompt) => prompt.text(),
			None => self.status_bar.message.clone(),
		}
	}

	pub fn notify(&mut self, message: impl Into<String>) {
		self.status_bar.message = message.into();
	}

	pub fn set_overlay(&mut self, overlay: Option<OverlayView>) {
		let focused = self.focused;
		for (id, window) in &mut self.windows {
			window.overlay = if Some(id) == focused { overlay.clone() } else { None };
		}
	}

	pub fn overlay(&self) -> Option<&OverlayView> {
		self.focused_window().and_then(|window| window.overlay.as_ref())
	}
}

fn buffer_name_from_path(path: &Path) -> Option<String> {
	path.file_name().map(|name| name.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests;
