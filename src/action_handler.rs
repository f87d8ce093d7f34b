use std::ops::ControlFlow;
use std::path::Path;

use tracing::{debug, error, info};

use crate::command::{Command, Direction};
use crate::command_table::CommandTable;
use crate::dispatcher::{ChordDispatcher, Effect};
use crate::key::{InputEvent, Key, NamedKey};
use crate::paths::{absolutize, expand_home};
use crate::state::{BufferError, EditorState, OverlayView, Prompt, WindowClose, WindowId, error_chain};
use crate::syntax::language_by_name;

pub struct ActionHandler {
	dispatcher: ChordDispatcher,
	table:      CommandTable,
}

impl ActionHandler {
	pub fn new(table: CommandTable) -> Self {
		Self { dispatcher: ChordDispatcher::new(), table }
	}

	pub fn dispatcher(&self) -> &ChordDispatcher {
		&self.dispatcher
	}

	pub fn apply(&mut self, state: &mut EditorState, event: InputEvent) -> ControlFlow<()> {
		let effect = self.dispatcher.dispatch(event, &self.table);
		let flow = match effect {
			Effect::Invoke(command) => self.run_command(state, command),
			Effect::PassThrough(key) => self.type_key(state, key),
			Effect::ShowOverlay(_) | Effect::HideOverlay | Effect::Absorbed | Effect::Ignored(_) => {
				ControlFlow::Continue(())
			}
		};
		self.sync_overlay(state);
		flow
	}

	fn sync_overlay(&self, state: &mut EditorState) {
		let wanted = self.dispatcher.overlay();
		if state.overlay().map(|overlay| overlay.side) == wanted {
			return;
		}
		state.set_overlay(wanted.map(|side| OverlayView { side, keys: self.table.slice(side) }));
	}

	pub fn run_command(&mut self, state: &mut EditorState, command: Command) -> ControlFlow<()> {
		debug!("run {}: {}", command, command.description());
		if command.needs_focused_window() && state.focused().is_none() {
			error!("command {} ignored: no focused window", command);
			return ControlFlow::Continue(());
		}

		match command {
			Command::MoveCursor(direction) => {
				if let Some(window) = state.focused_window_mut() {
					window.buffer.move_cursor(direction);
				}
			}
			Command::MoveWord(direction) => {
				if let Some(window) = state.focused_window_mut() {
					window.buffer.move_word(direction);
				}
			}
			Command::Undo => {
				let undone = state.focused_window_mut().is_some_and(|window| window.buffer.undo());
				if !undone {
					state.notify("Nothing to undo");
				}
			}
			Command::Cut => {
				if let Some((buffer, clipboard)) = state.focused_buffer_and_clipboard() {
					buffer.cut(clipboard);
					state.notify("Line cut");
				}
			}
			Command::Copy => {
				if let Some((buffer, clipboard)) = state.focused_buffer_and_clipboard() {
					buffer.copy(clipboard);
					state.notify("Line copied");
				}
			}
			Command::Paste => {
				let pasted = state.focused_buffer_and_clipboard().is_some_and(|(buffer, clipboard)| buffer.paste(clipboard));
				if !pasted {
					state.notify("Clipboard is empty");
				}
			}
			Command::OpenWindow => {
				if let Ok(id) = state.open_window(None) {
					let title = state.window_title(id);
					state.notify(format!("Opened {}", title));
				}
			}
			Command::OpenFile => {
				state.prompt = Some(Prompt::Open { input: String::new() });
			}
			Command::SaveFile => {
				if let Some(id) = state.focused() {
					return save_window(state, id, None, false);
				}
			}
			Command::CloseWindow => {
				let Some(id) = state.focused() else {
					return ControlFlow::Continue(());
				};
				let dirty = state.windows.get(id).is_some_and(|window| window.buffer.is_dirty());
				if dirty {
					state.prompt = Some(Prompt::ConfirmClose { window: id });
				} else {
					return close_window(state, id);
				}
			}
			Command::FocusWindow(cycle) => state.cycle_focus(cycle),
			Command::ToggleSpaces => {
				state.settings.use_spaces = !state.settings.use_spaces;
				let indent = if state.settings.use_spaces { "spaces" } else { "tabs" };
				info!("indenting with {}", indent);
				state.notify(format!("Indent with {}", indent));
			}
			Command::CycleTabWidth => {
				let width = state.settings.cycle_tab_width();
				info!("tab width set to {}", width);
				state.notify(format!("Tab width: {}", width));
			}
			Command::SetLanguage => {
				if let Some(id) = state.focused() {
					state.prompt = Some(Prompt::Language { window: id, input: String::new() });
				}
			}
		}
		ControlFlow::Continue(())
	}

	fn type_key(&mut self, state: &mut EditorState, key: Key) -> ControlFlow<()> {
		if state.prompt.is_some() {
			return prompt_key(state, key);
		}
		let indent = state.settings.indent_unit();
		let Some(window) = state.focused_window_mut() else {
			return ControlFlow::Continue(());
		};
		let buffer = &mut window.buffer;
		match key {
			Key::Char(c) => buffer.insert_text(c.encode_utf8(&mut [0; 4])),
			Key::Named(NamedKey::Enter) => buffer.insert_text("\n"),
			Key::Named(NamedKey::Tab) => buffer.insert_text(&indent),
			Key::Named(NamedKey::Backspace) => {
				buffer.delete_backward();
			}
			Key::Named(NamedKey::Delete) => {
				buffer.delete_forward();
			}
			Key::Named(NamedKey::Up) => buffer.move_cursor(Direction::Up),
			Key::Named(NamedKey::Down) => buffer.move_cursor(Direction::Down),
			Key::Named(NamedKey::Left) => buffer.move_cursor(Direction::Left),
			Key::Named(NamedKey::Right) => buffer.move_cursor(Direction::Right),
			Key::Named(NamedKey::Home) => buffer.move_line_start(),
			Key::Named(NamedKey::End) => buffer.move_line_end(),
			Key::Named(NamedKey::Esc) | Key::Control(_) | Key::OtherModifier => {}
		}
		ControlFlow::Continue(())
	}
}

fn prompt_key(state: &mut EditorState, key: Key) -> ControlFlow<()> {
	let Some(prompt) = state.prompt.as_mut() else {
		return ControlFlow::Continue(());
	};

	match (prompt, key) {
		(_, Key::Named(NamedKey::Esc)) => {
			state.prompt = None;
			state.notify("Cancelled");
		}
		(Prompt::ConfirmClose { window }, Key::Char(c)) => {
			let window = *window;
			match c.to_ascii_lowercase() {
				's' => {
					state.prompt = None;
					return save_window(state, window, None, true);
				}
				'd' => {
					state.prompt = None;
					info!("discarding changes in window {:?}", window);
					return close_window(state, window);
				}
				_ => {}
			}
		}
		(Prompt::Open { input } | Prompt::SaveAs { input, .. } | Prompt::Language { input, .. }, Key::Char(c)) => {
			input.push(c);
		}
		(
			Prompt::Open { input } | Prompt::SaveAs { input, .. } | Prompt::Language { input, .. },
			Key::Named(NamedKey::Backspace),
		) => {
			input.pop();
		}
		(_, Key::Named(NamedKey::Enter)) => return commit_prompt(state),
		_ => {}
	}
	ControlFlow::Continue(())
}

fn commit_prompt(state: &mut EditorState) -> ControlFlow<()> {
	let Some(prompt) = state.prompt.take() else {
		return ControlFlow::Continue(());
	};
	match prompt {
		Prompt::Open { input } => {
			let input = input.trim();
			if input.is_empty() {
				state.notify("Cancelled");
				return ControlFlow::Continue(());
			}
			let path = absolutize(&expand_home(input));
			if let Ok(id) = state.open_window(Some(&path)) {
				let title = state.window_title(id);
				state.notify(format!("Opened {}", title));
			}
		}
		Prompt::SaveAs { window, input, close_after } => {
			let input = input.trim();
			if input.is_empty() {
				state.prompt = Some(Prompt::SaveAs { window, input: String::new(), close_after });
				return ControlFlow::Continue(());
			}
			let path = absolutize(&expand_home(input));
			return save_window(state, window, Some(&path), close_after);
		}
		Prompt::ConfirmClose { window } => {
			state.prompt = Some(Prompt::ConfirmClose { window });
		}
		Prompt::Language { window, input } => set_language(state, window, input.trim()),
	}
	ControlFlow::Continue(())
}

fn save_window(state: &mut EditorState, id: WindowId, path: Option<&Path>, close_after: bool) -> ControlFlow<()> {
	let Some(window) = state.windows.get_mut(id) else {
		return ControlFlow::Continue(());
	};
	match window.buffer.save(path) {
		Ok(()) => {
			let title = state.window_title(id);
			state.notify(format!("Saved {}", title));
			if close_after {
				return close_window(state, id);
			}
		}
		Err(BufferError::NoPath) => {
			info!("window {:?} has no path, asking for one", id);
			state.prompt = Some(Prompt::SaveAs { window: id, input: String::new(), close_after });
		}
		Err(err) => {
			error!("save failed for window {:?}: {}", id, error_chain(&err));
			state.notify(format!("Unable to save: {}", error_chain(&err)));
		}
	}
	ControlFlow::Continue(())
}

fn set_language(state: &mut EditorState, id: WindowId, name: &str) {
	let language = if name.is_empty() || name.eq_ignore_ascii_case("plain") {
		None
	} else {
		match language_by_name(name) {
			Some(language) => Some(language),
			None => {
				state.notify(format!("Unknown language: {}", name));
				return;
			}
		}
	};
	let Some(window) = state.windows.get_mut(id) else {
		return;
	};
	window.buffer.set_language(language);
	debug!("window {:?} language set to {:?}", id, language);
	state.notify(format!("Language: {}", language.unwrap_or("plain")));
}

fn close_window(state: &mut EditorState, id: WindowId) -> ControlFlow<()> {
	match state.close_window(id) {
		WindowClose::LastClosed => ControlFlow::Break(()),
		WindowClose::Remaining(_) | WindowClose::NotFound => ControlFlow::Continue(()),
	}
}
