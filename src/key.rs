use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
	Left,
	Right,
}

impl Side {
	pub fn opposite(self) -> Self {
		match self {
			Side::Left => Side::Right,
			Side::Right => Side::Left,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			Side::Left => "left",
			Side::Right => "right",
		}
	}
}

impl fmt::Display for Side {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Side {
	type Err = KeyParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"left" => Ok(Side::Left),
			"right" => Ok(Side::Right),
			_ => Err(KeyParseError::UnknownSide(s.to_string())),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
	Enter,
	Backspace,
	Delete,
	Tab,
	Esc,
	Up,
	Down,
	Left,
	Right,
	Home,
	End,
}

impl NamedKey {
	const ALL: [NamedKey; 11] = [
		NamedKey::Enter,
		NamedKey::Backspace,
		NamedKey::Delete,
		NamedKey::Tab,
		NamedKey::Esc,
		NamedKey::Up,
		NamedKey::Down,
		NamedKey::Left,
		NamedKey::Right,
		NamedKey::Home,
		NamedKey::End,
	];

	pub fn name(self) -> &'static str {
		match self {
			NamedKey::Enter => "enter",
			NamedKey::Backspace => "backspace",
			NamedKey::Delete => "delete",
			NamedKey::Tab => "tab",
			NamedKey::Esc => "esc",
			NamedKey::Up => "up",
			NamedKey::Down => "down",
			NamedKey::Left => "left",
			NamedKey::Right => "right",
			NamedKey::Home => "home",
			NamedKey::End => "end",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
	Char(char),
	Named(NamedKey),
	Control(Side),
	// Shift, Alt and Super.
	OtherModifier,
}

impl Key {
	pub fn is_modifier(self) -> bool {
		matches!(self, Key::Control(_) | Key::OtherModifier)
	}

	pub fn normalized(self) -> Self {
		match self {
			Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
			other => other,
		}
	}

	pub fn half(self) -> Option<Side> {
		let Key::Char(c) = self.normalized() else {
			return None;
		};
		if LEFT_HALF_ROWS.iter().any(|row| row.contains(&c)) {
			Some(Side::Left)
		} else if RIGHT_HALF_ROWS.iter().any(|row| row.contains(&c)) {
			Some(Side::Right)
		} else {
			None
		}
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Key::Char(c) => write!(f, "{}", c),
			Key::Named(named) => f.write_str(named.name()),
			Key::Control(side) => write!(f, "{}-ctrl", side),
			Key::OtherModifier => f.write_str("modifier"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
	#[error("empty key name")]
	Empty,
	#[error("unknown key name: {0}")]
	UnknownKey(String),
	#[error("unknown side: {0} (expected left or right)")]
	UnknownSide(String),
}

impl FromStr for Key {
	type Err = KeyParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut chars = s.chars();
		match (chars.next(), chars.next()) {
			(None, _) => Err(KeyParseError::Empty),
			(Some(c), None) => Ok(Key::Char(c).normalized()),
			_ => {
				let lowered = s.to_ascii_lowercase();
				NamedKey::ALL
					.into_iter()
					.find(|named| named.name() == lowered)
					.map(Key::Named)
					.ok_or_else(|| KeyParseError::UnknownKey(s.to_string()))
			}
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
	KeyDown(Key),
	KeyUp(Key),
	FocusChanged(bool),
}

pub const LEFT_HALF_ROWS: [&[char]; 3] =
	[&['q', 'w', 'e', 'r', 't'], &['a', 's', 'd', 'f', 'g'], &['z', 'x', 'c', 'v', 'b']];

pub const RIGHT_HALF_ROWS: [&[char]; 3] = [
	&['y', 'u', 'i', 'o', 'p', '[', ']'],
	&['h', 'j', 'k', 'l', ';', '\''],
	&['n', 'm', ',', '.', '/'],
];

pub fn half_rows(half: Side) -> [&'static [char]; 3] {
	match half {
		Side::Left => LEFT_HALF_ROWS,
		Side::Right => RIGHT_HALF_ROWS,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_single_char_and_named_keys() {
		assert_eq!("S".parse::<Key>(), Ok(Key::Char('s')));
		assert_eq!(";".parse::<Key>(), Ok(Key::Char(';')));
		assert_eq!("Enter".parse::<Key>(), Ok(Key::Named(NamedKey::Enter)));
		assert_eq!("".parse::<Key>(), Err(KeyParseError::Empty));
		assert!(matches!("bogus".parse::<Key>(), Err(KeyParseError::UnknownKey(_))));
	}

	#[test]
	fn half_follows_keyboard_layout() {
		assert_eq!(Key::Char('s').half(), Some(Side::Left));
		assert_eq!(Key::Char('S').half(), Some(Side::Left));
		assert_eq!(Key::Char(';').half(), Some(Side::Right));
		assert_eq!(Key::Char('1').half(), None);
		assert_eq!(Key::Named(NamedKey::Enter).half(), None);
	}

	#[test]
	fn side_parses_case_insensitively() {
		assert_eq!("Right".parse::<Side>(), Ok(Side::Right));
		assert!("middle".parse::<Side>().is_err());
		assert_eq!(Side::Left.opposite(), Side::Right);
	}
}
