use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use ropey::Rope;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::clipboard::Clipboard;
use crate::command::{Direction, Horizontal};
use crate::syntax::detect_language;

const MAX_HISTORY_ENTRIES: usize = 256;

#[derive(Debug, Error)]
pub enum BufferError {
	#[error("buffer has no file path")]
	NoPath,
	#[error("read file failed: {}", path.display())]
	Read {
		path:   PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("decode utf-8 failed: {}", path.display())]
	Decode {
		path:   PathBuf,
		#[source]
		source: FromUtf8Error,
	},
	#[error("write file failed: {}", path.display())]
	Write {
		path:   PathBuf,
		#[source]
		source: io::Error,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
	pub line:   usize,
	pub column: usize,
}

#[derive(Debug, Clone)]
struct HistoryEntry {
	text:   Rope,
	cursor: Cursor,
}

#[derive(Debug, Clone)]
pub struct Buffer {
	text:             Rope,
	saved:            Rope,
	cursor:           Cursor,
	preferred_column: Option<usize>,
	path:             Option<PathBuf>,
	language:         Option<&'static str>,
	history:          VecDeque<HistoryEntry>,
}

impl Default for Buffer {
	fn default() -> Self {
		Self::new()
	}
}

impl Buffer {
	pub fn new() -> Self {
		Self::from_text("")
	}

	pub fn from_text(text: &str) -> Self {
		let text = Rope::from_str(text);
		Self {
			saved: text.clone(),
			text,
			cursor: Cursor::default(),
			preferred_column: None,
			path: None,
			language: None,
			history: VecDeque::new(),
		}
	}

	pub fn open(path: &Path) -> Result<Self, BufferError> {
		let mut buffer = Self::new();
		buffer.load(path)?;
		Ok(buffer)
	}

	pub fn text(&self) -> &Rope {
		&self.text
	}

	pub fn cursor(&self) -> Cursor {
		self.cursor
	}

	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	pub fn language(&self) -> Option<&'static str> {
		self.language
	}

	pub fn set_language(&mut self, language: Option<&'static str>) {
		self.language = language;
	}

	pub fn is_dirty(&self) -> bool {
		self.text != self.saved
	}

	pub fn line_count(&self) -> usize {
		self.text.len_lines()
	}

	pub fn line(&self, index: usize) -> String {
		if index >= self.line_count() {
			return String::new();
		}
		self.text.line(index).slice(..self.line_len(index)).to_string()
	}

	fn line_break(&self, index: usize) -> Option<String> {
		if index >= self.line_count() {
			return None;
		}
		let line_break = self.text.line(index).slice(self.line_len(index)..).to_string();
		(!line_break.is_empty()).then_some(line_break)
	}

	pub fn line_len(&self, index: usize) -> usize {
		let line = self.text.line(index);
		let mut len = line.len_chars();
		if len > 0 && is_line_break(line.char(len - 1)) {
			let last = line.char(len - 1);
			len -= 1;
			if last == '\n' && len > 0 && line.char(len - 1) == '\r' {
				len -= 1;
			}
		}
		len
	}

	pub fn move_cursor(&mut self, direction: Direction) {
		let Cursor { line, column } = self.cursor;
		match direction {
			Direction::Up | Direction::Down => {
				let target = match direction {
					Direction::Up if line > 0 => line - 1,
					Direction::Down if line + 1 < self.line_count() => line + 1,
					_ => return,
				};
				let wanted = *self.preferred_column.get_or_insert(column);
				self.cursor = Cursor { line: target, column: wanted.min(self.line_len(target)) };
			}
			Direction::Left => {
				self.preferred_column = None;
				self.cursor.column = column.saturating_sub(1);
			}
			Direction::Right => {
				self.preferred_column = None;
				self.cursor.column = (column + 1).min(self.line_len(line));
			}
		}
	}

	pub fn move_word(&mut self, direction: Horizontal) {
		let len = self.text.len_chars();
		let mut idx = self.cursor_char_index();
		match direction {
			Horizontal::Right => {
				while idx < len && !is_word_char(self.text.char(idx)) {
					idx += 1;
				}
				while idx < len && is_word_char(self.text.char(idx)) {
					idx += 1;
				}
			}
			Horizontal::Left => {
				while idx > 0 && !is_word_char(self.text.char(idx - 1)) {
					idx -= 1;
				}
				while idx > 0 && is_word_char(self.text.char(idx - 1)) {
					idx -= 1;
				}
			}
		}
		self.preferred_column = None;
		self.set_cursor_char_index(idx);
	}

	pub fn move_line_start(&mut self) {
		self.preferred_column = None;
		self.cursor.column = 0;
	}

	pub fn move_line_end(&mut self) {
		self.preferred_column = None;
		self.cursor.column = self.line_len(self.cursor.line);
	}

	pub fn insert_text(&mut self, text: &str) {
		if text.is_empty() {
			return;
		}
		self.push_history();
		let idx = self.cursor_char_index();
		self.text.insert(idx, text);
		self.preferred_column = None;
		self.set_cursor_char_index(idx + text.chars().count());
	}

	pub fn delete_backward(&mut self) -> bool {
		let end = self.cursor_char_index();
		if end == 0 {
			return false;
		}
		let mut start = end - 1;
		if self.text.char(start) == '\n' && start > 0 && self.text.char(start - 1) == '\r' {
			start -= 1;
		}
		self.push_history();
		self.text.remove(start..end);
		self.preferred_column = None;
		self.set_cursor_char_index(start);
		true
	}

	pub fn delete_forward(&mut self) -> bool {
		let start = self.cursor_char_index();
		let len = self.text.len_chars();
		if start >= len {
			return false;
		}
		let mut end = start + 1;
		if self.text.char(start) == '\r' && end < len && self.text.char(end) == '\n' {
			end += 1;
		}
		self.push_history();
		self.text.remove(start..end);
		self.preferred_column = None;
		self.set_cursor_char_index(start);
		true
	}

	// The last line borrows the break of the line above it.
	pub fn copy(&self, clipboard: &mut Clipboard) {
		let index = self.cursor.line;
		let line_break = self
			.line_break(index)
			.or_else(|| index.checked_sub(1).and_then(|above| self.line_break(above)))
			.unwrap_or_else(|| "\n".to_string());
		let mut line = self.line(index);
		line.push_str(&line_break);
		clipboard.set(line);
	}

	pub fn cut(&mut self, clipboard: &mut Clipboard) {
		self.copy(clipboard);
		let line = self.cursor.line;
		let line_start = self.text.line_to_char(line);
		let range = if line + 1 < self.line_count() {
			line_start..self.text.line_to_char(line + 1)
		} else if line > 0 {
			let break_len =
				if line_start >= 2 && self.text.char(line_start - 2) == '\r' && self.text.char(line_start - 1) == '\n' {
					2
				} else {
					1
				};
			line_start - break_len..self.text.len_chars()
		} else {
			0..self.text.len_chars()
		};
		if range.is_empty() {
			return;
		}

		self.push_history();
		self.text.remove(range);
		let line = line.min(self.line_count() - 1);
		self.cursor = Cursor { line, column: self.cursor.column.min(self.line_len(line)) };
		self.preferred_column = None;
	}

	pub fn paste(&mut self, clipboard: &Clipboard) -> bool {
		match clipboard.get() {
			Some(text) if !text.is_empty() => {
				self.insert_text(text);
				true
			}
			_ => false,
		}
	}

	pub fn undo(&mut self) -> bool {
		let Some(entry) = self.history.pop_back() else {
			return false;
		};
		self.text = entry.text;
		self.cursor = entry.cursor;
		self.preferred_column = None;
		true
	}

	pub fn save(&mut self, path: Option<&Path>) -> Result<(), BufferError> {
		let target = match (path, self.path.as_deref()) {
			(Some(path), _) | (None, Some(path)) => path.to_path_buf(),
			(None, None) => return Err(BufferError::NoPath),
		};
		write_atomically(&self.text, &target).map_err(|source| BufferError::Write { path: target.clone(), source })?;

		info!("saved {} ({} bytes)", target.display(), self.text.len_bytes());
		if path.is_some() {
			self.language = detect_language(&target);
			self.path = Some(target);
		}
		self.saved = self.text.clone();
		Ok(())
	}

	pub fn load(&mut self, path: &Path) -> Result<(), BufferError> {
		let bytes = std::fs::read(path).map_err(|source| BufferError::Read { path: path.to_path_buf(), source })?;
		let text = String::from_utf8(bytes).map_err(|source| BufferError::Decode { path: path.to_path_buf(), source })?;

		debug!("loaded {} ({} bytes)", path.display(), text.len());
		self.text = Rope::from_str(&text);
		self.saved = self.text.clone();
		self.cursor = Cursor::default();
		self.preferred_column = None;
		self.history.clear();
		self.language = detect_language(path);
		self.path = Some(path.to_path_buf());
		Ok(())
	}

	fn cursor_char_index(&self) -> usize {
		self.text.line_to_char(self.cursor.line) + self.cursor.column
	}

	fn set_cursor_char_index(&mut self, idx: usize) {
		let idx = idx.min(self.text.len_chars());
		let line = self.text.char_to_line(idx);
		let column = (idx - self.text.line_to_char(line)).min(self.line_len(line));
		self.cursor = Cursor { line, column };
	}

	fn push_history(&mut self) {
		self.history.push_back(HistoryEntry { text: self.text.clone(), cursor: self.cursor });
		if self.history.len() > MAX_HISTORY_ENTRIES {
			self.history.pop_front();
		}
	}
}

fn is_line_break(c: char) -> bool {
	matches!(c, '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}

fn is_word_char(c: char) -> bool {
	c.is_alphanumeric() || c == '_'
}

fn write_atomically(text: &Rope, target: &Path) -> io::Result<()> {
	let parent = match target.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};
	let mut temp_file = NamedTempFile::new_in(parent)?;
	for chunk in text.chunks() {
		temp_file.write_all(chunk.as_bytes())?;
	}
	temp_file.flush()?;
	if let Ok(metadata) = std::fs::metadata(target) {
		temp_file.as_file().set_permissions(metadata.permissions())?;
	}
	temp_file.as_file().sync_all()?;
	temp_file.persist(target).map_err(|err| err.error)?;
	Ok(())
}
