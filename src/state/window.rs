use std::path::Path;

use tracing::{error, info};

use super::{Buffer, BufferError, EditorState, Prompt, Window, WindowId, buffer_name_from_path};
use crate::command::Cycle;
use crate::paths::{absolutize, home_substitute};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowClose {
	Remaining(WindowId),
	LastClosed,
	NotFound,
}

impl EditorState {
	pub fn open_window(&mut self, path: Option<&Path>) -> Result<WindowId, BufferError> {
		let (buffer, untitled_number) = match path {
			Some(path) => match Buffer::open(path) {
				Ok(buffer) => (buffer, None),
				Err(err) => {
					error!("open_window failed: {}", err);
					self.notify(format!("Unable to load: {}", error_chain(&err)));
					return Err(err);
				}
			},
			None => {
				let number = self.next_untitled;
				self.next_untitled += 1;
				(Buffer::new(), Some(number))
			}
		};

		let id = self.windows.insert(Window { buffer, overlay: None, focused: false, untitled_number });
		self.window_order.push(id);
		self.focus_window(id);
		info!("opened window {:?}: {}", id, self.window_title(id));
		Ok(id)
	}

	// Focus falls back to the previous window in order, or the next when the first closes.
	pub fn close_window(&mut self, id: WindowId) -> WindowClose {
		let Some(idx) = self.window_order.iter().position(|w| *w == id) else {
			return WindowClose::NotFound;
		};
		self.window_order.remove(idx);
		let _ = self.windows.remove(id);
		if matches!(&self.prompt, Some(prompt) if prompt_targets(prompt, id)) {
			self.prompt = None;
		}
		info!("closed window {:?}, {} remaining", id, self.window_order.len());

		if self.window_order.is_empty() {
			self.focused = None;
			return WindowClose::LastClosed;
		}
		let focused = match self.focused.filter(|focused| *focused != id) {
			Some(focused) => focused,
			None => {
				let fallback = self.window_order[idx.saturating_sub(1)];
				self.focus_window(fallback);
				fallback
			}
		};
		WindowClose::Remaining(focused)
	}

	pub fn focus_window(&mut self, id: WindowId) -> bool {
		if !self.windows.contains_key(id) {
			return false;
		}
		let previous = self.focused.replace(id);
		if let Some(previous) = previous.filter(|p| *p != id)
			&& let Some(window) = self.windows.get_mut(previous)
		{
			window.focused = false;
			window.overlay = None;
		}
		if let Some(window) = self.windows.get_mut(id) {
			window.focused = true;
		}
		true
	}

	pub fn cycle_focus(&mut self, cycle: Cycle) {
		let Some(current) = self.focused else {
			return;
		};
		let len = self.window_order.len();
		if len < 2 {
			return;
		}
		let idx = self.window_order.iter().position(|w| *w == current).unwrap_or(0);
		let target = match cycle {
			Cycle::Next => (idx + 1) % len,
			Cycle::Prev => (idx + len - 1) % len,
		};
		let target = self.window_order[target];
		self.focus_window(target);
	}

	pub fn window_title(&self, id: WindowId) -> String {
		let Some(window) = self.windows.get(id) else {
			return String::new();
		};
		let name = match window.buffer.path() {
			None => format!("New File {}", window.untitled_number.unwrap_or(0)),
			Some(path) => {
				let basename = buffer_name_from_path(path).unwrap_or_else(|| path.display().to_string());
				let clashes = self.windows.iter().any(|(other_id, other)| {
					other_id != id
						&& other.buffer.path().and_then(buffer_name_from_path).as_deref() == Some(basename.as_str())
				});
				if clashes { home_substitute(&absolutize(path)) } else { basename }
			}
		};
		if window.buffer.is_dirty() { format!("✍ {}", name) } else { name }
	}

	pub fn focused_count(&self) -> usize {
		self.windows.values().filter(|w| w.focused).count()
	}
}

fn prompt_targets(prompt: &Prompt, id: WindowId) -> bool {
	match prompt {
		Prompt::SaveAs { window, .. } | Prompt::ConfirmClose { window } | Prompt::Language { window, .. } => {
			*window == id
		}
		Prompt::Open { .. } => false,
	}
}

pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
	let mut text = err.to_string();
	let mut source = err.source();
	while let Some(cause) = source {
		text.push_str(": ");
		text.push_str(&cause.to_string());
		source = cause.source();
	}
	text
}
