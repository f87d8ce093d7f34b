use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
	Up,
	Down,
	Left,
	Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizontal {
	Left,
	Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cycle {
	Next,
	Prev,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
	MoveCursor(Direction),
	MoveWord(Horizontal),
	Undo,
	Cut,
	Copy,
	Paste,
	OpenWindow,
	OpenFile,
	SaveFile,
	CloseWindow,
	FocusWindow(Cycle),
	ToggleSpaces,
	CycleTabWidth,
	SetLanguage,
}

impl Command {
	pub const ALL: [Command; 19] = [
		Command::MoveCursor(Direction::Up),
		Command::MoveCursor(Direction::Down),
		Command::MoveCursor(Direction::Left),
		Command::MoveCursor(Direction::Right),
		Command::MoveWord(Horizontal::Left),
		Command::MoveWord(Horizontal::Right),
		Command::Undo,
		Command::Cut,
		Command::Copy,
		Command::Paste,
		Command::OpenWindow,
		Command::OpenFile,
		Command::SaveFile,
		Command::CloseWindow,
		Command::FocusWindow(Cycle::Next),
		Command::FocusWindow(Cycle::Prev),
		Command::ToggleSpaces,
		Command::CycleTabWidth,
		Command::SetLanguage,
	];

	pub fn name(self) -> &'static str {
		match self {
			Command::MoveCursor(Direction::Up) => "move-up",
			Command::MoveCursor(Direction::Down) => "move-down",
			Command::MoveCursor(Direction::Left) => "move-left",
			Command::MoveCursor(Direction::Right) => "move-right",
			Command::MoveWord(Horizontal::Left) => "word-left",
			Command::MoveWord(Horizontal::Right) => "word-right",
			Command::Undo => "undo",
			Command::Cut => "cut",
			Command::Copy => "copy",
			Command::Paste => "paste",
			Command::OpenWindow => "new-window",
			Command::OpenFile => "open-file",
			Command::SaveFile => "save",
			Command::CloseWindow => "close-window",
			Command::FocusWindow(Cycle::Next) => "next-window",
			Command::FocusWindow(Cycle::Prev) => "previous-window",
			Command::ToggleSpaces => "toggle-spaces",
			Command::CycleTabWidth => "tab-width",
			Command::SetLanguage => "set-language",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Command::MoveCursor(Direction::Up) => "↑",
			Command::MoveCursor(Direction::Down) => "↓",
			Command::MoveCursor(Direction::Left) => "←",
			Command::MoveCursor(Direction::Right) => "→",
			Command::MoveWord(Horizontal::Left) => "← Word",
			Command::MoveWord(Horizontal::Right) => "→ Word",
			Command::Undo => "Undo",
			Command::Cut => "Cut",
			Command::Copy => "Copy",
			Command::Paste => "Paste",
			Command::OpenWindow => "New",
			Command::OpenFile => "Open…",
			Command::SaveFile => "Save",
			Command::CloseWindow => "Close",
			Command::FocusWindow(Cycle::Next) => "Next ⇥",
			Command::FocusWindow(Cycle::Prev) => "⇤ Prev",
			Command::ToggleSpaces => "Spaces",
			Command::CycleTabWidth => "Width",
			Command::SetLanguage => "Lang…",
		}
	}

	pub fn description(self) -> &'static str {
		match self {
			Command::MoveCursor(Direction::Up) => "Move the cursor up",
			Command::MoveCursor(Direction::Down) => "Move the cursor down",
			Command::MoveCursor(Direction::Left) => "Move the cursor left",
			Command::MoveCursor(Direction::Right) => "Move the cursor right",
			Command::MoveWord(Horizontal::Left) => "Move the cursor left by a word",
			Command::MoveWord(Horizontal::Right) => "Move the cursor right by a word",
			Command::Undo => "Undo the last edit",
			Command::Cut => "Cut the current line",
			Command::Copy => "Copy the current line",
			Command::Paste => "Paste at the cursor",
			Command::OpenWindow => "Create a new document",
			Command::OpenFile => "Open a file in a new window",
			Command::SaveFile => "Save the current document",
			Command::CloseWindow => "Close the current document",
			Command::FocusWindow(Cycle::Next) => "Switch to the next window",
			Command::FocusWindow(Cycle::Prev) => "Switch to the previous window",
			Command::ToggleSpaces => "Toggle indenting with spaces or tabs",
			Command::CycleTabWidth => "Cycle the tab width through 2, 4 and 8",
			Command::SetLanguage => "Set the language of the current document",
		}
	}

	pub fn needs_focused_window(self) -> bool {
		!matches!(
			self,
			Command::OpenWindow
				| Command::OpenFile
				| Command::FocusWindow(_)
				| Command::ToggleSpaces
				| Command::CycleTabWidth
		)
	}
}

impl fmt::Display for Command {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
	type Err = UnknownCommand;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let lowered = s.to_ascii_lowercase();
		Command::ALL
			.into_iter()
			.find(|command| command.name() == lowered)
			.ok_or_else(|| UnknownCommand(s.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_command_parses_back_from_its_name() {
		for command in Command::ALL {
			assert_eq!(command.name().parse::<Command>(), Ok(command));
		}
	}

	#[test]
	fn unknown_name_is_rejected() {
		assert_eq!("fly".parse::<Command>(), Err(UnknownCommand("fly".to_string())));
	}

	#[test]
	fn editor_wide_commands_run_without_a_window() {
		assert!(Command::Paste.needs_focused_window());
		assert!(Command::CloseWindow.needs_focused_window());
		assert!(Command::SetLanguage.needs_focused_window());
		assert!(!Command::OpenWindow.needs_focused_window());
		assert!(!Command::ToggleSpaces.needs_focused_window());
	}

	#[test]
	fn labels_fit_on_an_overlay_key() {
		for command in Command::ALL {
			assert!(command.label().chars().count() <= 6, "{} label too wide", command);
		}
	}
}
