use std::collections::HashMap;

use tracing::debug;

use crate::command::{Command, Cycle, Direction, Horizontal};
use crate::config::ConfigError;
use crate::key::{Key, Side, half_rows};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
	pub side:    Side,
	pub key:     Key,
	pub command: Command,
}

impl Binding {
	pub fn new(side: Side, key: char, command: Command) -> Self {
		Self { side, key: Key::Char(key), command }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayKey {
	pub key:     char,
	pub row:     usize,
	pub column:  usize,
	pub command: Option<Command>,
}

#[derive(Debug, Clone)]
pub struct CommandTable {
	bindings: HashMap<(Side, Key), Command>,
}

impl CommandTable {
	pub fn new(entries: impl IntoIterator<Item = Binding>) -> Result<Self, ConfigError> {
		let mut bindings = HashMap::new();
		for Binding { side, key, command } in entries {
			let key = key.normalized();
			if key.half() != Some(side.opposite()) {
				return Err(ConfigError::KeyOutsideHalf { side, key });
			}
			if bindings.insert((side, key), command).is_some() {
				return Err(ConfigError::DuplicateBinding { side, key });
			}
		}
		debug!("command table built with {} bindings", bindings.len());
		Ok(Self { bindings })
	}

	pub fn with_defaults() -> Result<Self, ConfigError> {
		Self::new(Self::default_bindings())
	}

	pub fn default_bindings() -> Vec<Binding> {
		vec![
			Binding::new(Side::Right, 'e', Command::MoveCursor(Direction::Up)),
			Binding::new(Side::Right, 's', Command::MoveCursor(Direction::Left)),
			Binding::new(Side::Right, 'd', Command::MoveCursor(Direction::Down)),
			Binding::new(Side::Right, 'f', Command::MoveCursor(Direction::Right)),
			Binding::new(Side::Right, 'w', Command::MoveWord(Horizontal::Left)),
			Binding::new(Side::Right, 'r', Command::MoveWord(Horizontal::Right)),
			Binding::new(Side::Right, 'z', Command::Undo),
			Binding::new(Side::Right, 'x', Command::Cut),
			Binding::new(Side::Right, 'c', Command::Copy),
			Binding::new(Side::Right, 'v', Command::Paste),
			Binding::new(Side::Left, 'n', Command::OpenWindow),
			Binding::new(Side::Left, 'i', Command::CloseWindow),
			Binding::new(Side::Left, 'o', Command::OpenFile),
			Binding::new(Side::Left, 'k', Command::SaveFile),
			Binding::new(Side::Left, 'h', Command::FocusWindow(Cycle::Prev)),
			Binding::new(Side::Left, 'l', Command::FocusWindow(Cycle::Next)),
			Binding::new(Side::Left, 'y', Command::ToggleSpaces),
			Binding::new(Side::Left, 'j', Command::CycleTabWidth),
			Binding::new(Side::Left, ';', Command::SetLanguage),
		]
	}

	pub fn resolve(&self, side: Side, key: Key) -> Option<Command> {
		self.bindings.get(&(side, key.normalized())).copied()
	}

	pub fn slice(&self, side: Side) -> Vec<OverlayKey> {
		half_rows(side.opposite())
			.iter()
			.enumerate()
			.flat_map(|(row, keys)| {
				keys.iter().enumerate().map(move |(column, key)| OverlayKey {
					key: *key,
					row,
					column,
					command: self.resolve(side, Key::Char(*key)),
				})
			})
			.collect()
	}

	pub fn binding_count(&self) -> usize {
		self.bindings.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_table_is_valid() {
		let table = CommandTable::with_defaults().expect("defaults should validate");
		assert_eq!(table.binding_count(), CommandTable::default_bindings().len());
		assert_eq!(table.resolve(Side::Right, Key::Char('d')), Some(Command::MoveCursor(Direction::Down)));
		assert_eq!(table.resolve(Side::Left, Key::Char('k')), Some(Command::SaveFile));
	}

	#[test]
	fn resolve_is_side_sensitive_and_case_folded() {
		let table = CommandTable::with_defaults().expect("defaults should validate");
		assert_eq!(table.resolve(Side::Right, Key::Char('X')), Some(Command::Cut));
		assert_eq!(table.resolve(Side::Left, Key::Char('x')), None);
		assert_eq!(table.resolve(Side::Right, Key::Char('q')), None);
	}

	#[test]
	fn duplicate_binding_on_one_side_is_rejected() {
		let result = CommandTable::new([
			Binding::new(Side::Right, 's', Command::MoveCursor(Direction::Down)),
			Binding::new(Side::Right, 'S', Command::Cut),
		]);
		assert!(matches!(
			result,
			Err(ConfigError::DuplicateBinding { side: Side::Right, key: Key::Char('s') })
		));
	}

	#[test]
	fn key_on_the_held_side_is_rejected() {
		let result = CommandTable::new([Binding::new(Side::Left, 's', Command::Cut)]);
		assert!(matches!(result, Err(ConfigError::KeyOutsideHalf { side: Side::Left, .. })));
	}

	#[test]
	fn slice_lists_whole_half_with_bound_commands() {
		let table = CommandTable::with_defaults().expect("defaults should validate");
		let slice = table.slice(Side::Right);
		assert_eq!(slice.len(), 15);
		assert_eq!(slice[0].key, 'q');
		assert_eq!(slice[0].command, None);
		let d = slice.iter().find(|k| k.key == 'd').expect("d is on the left half");
		assert_eq!((d.row, d.column), (1, 2));
		assert_eq!(d.command, Some(Command::MoveCursor(Direction::Down)));
	}

	#[test]
	fn style_commands_sit_under_left_ctrl() {
		let table = CommandTable::with_defaults().expect("defaults should validate");
		assert_eq!(table.resolve(Side::Left, Key::Char('y')), Some(Command::ToggleSpaces));
		assert_eq!(table.resolve(Side::Left, Key::Char('j')), Some(Command::CycleTabWidth));
		assert_eq!(table.resolve(Side::Left, Key::Char(';')), Some(Command::SetLanguage));
		assert_eq!(table.binding_count(), 19);
	}
}
