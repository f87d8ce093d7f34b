use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::command::{Command, UnknownCommand};
use crate::command_table::{Binding, CommandTable};
use crate::key::{Key, KeyParseError, Side};

const TAB_WIDTH_STEPS: [usize; 3] = [2, 4, 8];

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("read config file failed: {}", path.display())]
	Read {
		path:   PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("parse config file failed: {}", path.display())]
	Parse {
		path:   PathBuf,
		#[source]
		source: toml::de::Error,
	},
	#[error("invalid key in binding #{index}")]
	InvalidKey {
		index:  usize,
		#[source]
		source: KeyParseError,
	},
	#[error("invalid command in binding #{index}")]
	InvalidCommand {
		index:  usize,
		#[source]
		source: UnknownCommand,
	},
	#[error("key {key} is bound twice while holding {side} ctrl")]
	DuplicateBinding { side: Side, key: Key },
	#[error("key {key} is not on the keyboard half shown while holding {side} ctrl")]
	KeyOutsideHalf { side: Side, key: Key },
	#[error("tab width must be between 1 and 16, got {0}")]
	TabWidth(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
	pub tab_width:  usize,
	pub use_spaces: bool,
}

impl Default for EditorSettings {
	fn default() -> Self {
		Self { tab_width: 4, use_spaces: false }
	}
}

impl EditorSettings {
	pub fn indent_unit(&self) -> String {
		if self.use_spaces { " ".repeat(self.tab_width) } else { "\t".to_string() }
	}

	pub fn cycle_tab_width(&mut self) -> usize {
		self.tab_width = TAB_WIDTH_STEPS.into_iter().find(|width| *width > self.tab_width).unwrap_or(TAB_WIDTH_STEPS[0]);
		self.tab_width
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
	#[serde(default)]
	editor: RawEditor,
	#[serde(default)]
	bind:   Vec<RawBinding>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEditor {
	tab_width:  Option<usize>,
	use_spaces: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBinding {
	side:    Side,
	key:     String,
	command: String,
}

impl<'de> Deserialize<'de> for Side {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where D: serde::Deserializer<'de> {
		let raw = String::deserialize(deserializer)?;
		raw.parse().map_err(serde::de::Error::custom)
	}
}

#[derive(Debug, Clone, Default)]
pub struct Config {
	pub settings: EditorSettings,
	pub bindings: Vec<Binding>,
}

impl Config {
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = match std::fs::read_to_string(path) {
			Ok(text) => text,
			Err(err) if err.kind() == io::ErrorKind::NotFound => {
				info!("no config file at {}, using defaults", path.display());
				return Ok(Self::default());
			}
			Err(source) => return Err(ConfigError::Read { path: path.to_path_buf(), source }),
		};
		let config = Self::parse(&text).map_err(|err| match err {
			ConfigError::Parse { source, .. } => ConfigError::Parse { path: path.to_path_buf(), source },
			other => other,
		})?;
		info!("loaded config from {} ({} user bindings)", path.display(), config.bindings.len());
		Ok(config)
	}

	pub fn parse(text: &str) -> Result<Self, ConfigError> {
		let raw: RawConfig =
			toml::from_str(text).map_err(|source| ConfigError::Parse { path: PathBuf::new(), source })?;

		let defaults = EditorSettings::default();
		let tab_width = raw.editor.tab_width.unwrap_or(defaults.tab_width);
		if !(1..=16).contains(&tab_width) {
			return Err(ConfigError::TabWidth(tab_width));
		}
		let settings =
			EditorSettings { tab_width, use_spaces: raw.editor.use_spaces.unwrap_or(defaults.use_spaces) };

		let bindings = raw
			.bind
			.into_iter()
			.enumerate()
			.map(|(index, binding)| {
				let key = binding
					.key
					.parse::<Key>()
					.map_err(|source| ConfigError::InvalidKey { index, source })?;
				let command = binding
					.command
					.parse::<Command>()
					.map_err(|source| ConfigError::InvalidCommand { index, source })?;
				Ok(Binding { side: binding.side, key, command })
			})
			.collect::<Result<Vec<_>, ConfigError>>()?;

		Ok(Self { settings, bindings })
	}

	// User bindings replace defaults on the same chord.
	pub fn command_table(&self) -> Result<CommandTable, ConfigError> {
		let overridden =
			self.bindings.iter().map(|b| (b.side, b.key.normalized())).collect::<HashSet<_>>();
		let entries = CommandTable::default_bindings()
			.into_iter()
			.filter(|b| !overridden.contains(&(b.side, b.key.normalized())))
			.chain(self.bindings.iter().copied());
		CommandTable::new(entries)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::command::Direction;

	#[test]
	fn empty_config_uses_defaults() {
		let config = Config::parse("").expect("empty config parses");
		assert_eq!(config.settings, EditorSettings::default());
		let table = config.command_table().expect("defaults validate");
		assert_eq!(table.binding_count(), CommandTable::default_bindings().len());
	}

	#[test]
	fn user_binding_replaces_default_on_same_chord() {
		let config = Config::parse(
			r#"
			[[bind]]
			side = "right"
			key = "s"
			command = "move-down"
			"#,
		)
		.expect("config parses");
		let table = config.command_table().expect("table validates");
		assert_eq!(table.resolve(Side::Right, Key::Char('s')), Some(Command::MoveCursor(Direction::Down)));
		assert_eq!(table.binding_count(), CommandTable::default_bindings().len());
	}

	#[test]
	fn duplicate_user_bindings_fail() {
		let config = Config::parse(
			r#"
			[[bind]]
			side = "left"
			key = "j"
			command = "save"

			[[bind]]
			side = "left"
			key = "J"
			command = "undo"
			"#,
		)
		.expect("config parses");
		assert!(matches!(config.command_table(), Err(ConfigError::DuplicateBinding { side: Side::Left, .. })));
	}

	#[test]
	fn malformed_entries_are_reported() {
		let bad_command = Config::parse("[[bind]]\nside = \"left\"\nkey = \"j\"\ncommand = \"teleport\"\n");
		assert!(matches!(bad_command, Err(ConfigError::InvalidCommand { index: 0, .. })));

		let bad_side = Config::parse("[[bind]]\nside = \"up\"\nkey = \"j\"\ncommand = \"save\"\n");
		assert!(matches!(bad_side, Err(ConfigError::Parse { .. })));

		let bad_width = Config::parse("[editor]\ntab_width = 0\n");
		assert!(matches!(bad_width, Err(ConfigError::TabWidth(0))));
	}

	#[test]
	fn indent_unit_follows_settings() {
		let spaces = EditorSettings { tab_width: 2, use_spaces: true };
		assert_eq!(spaces.indent_unit(), "  ");
		assert_eq!(EditorSettings::default().indent_unit(), "\t");
	}

	#[test]
	fn tab_width_cycles_through_steps() {
		let mut settings = EditorSettings::default();
		assert_eq!(settings.cycle_tab_width(), 8);
		assert_eq!(settings.cycle_tab_width(), 2);
		assert_eq!(settings.cycle_tab_width(), 4);

		settings.tab_width = 12;
		assert_eq!(settings.cycle_tab_width(), 2);
		settings.tab_width = 3;
		assert_eq!(settings.cycle_tab_width(), 4);
	}

	#[test]
	fn missing_file_is_not_an_error() {
		let dir = tempfile::tempdir().expect("tempdir");
		let config = Config::load(&dir.path().join("absent.toml")).expect("missing file falls back");
		assert!(config.bindings.is_empty());
	}
}
