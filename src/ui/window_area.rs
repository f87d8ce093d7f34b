use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use unicode_width::UnicodeWidthChar;

use crate::state::EditorState;
use crate::syntax::{Highlighter, SpanStyle};

const NUMBER_COL_WIDTH: u16 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct Viewport {
	pub(super) top:  usize,
	pub(super) left: usize,
}

impl Viewport {
	pub(super) fn follow(&mut self, line: usize, col: usize, height: usize, width: usize) {
		if line < self.top {
			self.top = line;
		} else if height > 0 && line >= self.top + height {
			self.top = line + 1 - height;
		}
		if col < self.left {
			self.left = col;
		} else if width > 0 && col >= self.left + width {
			self.left = col + 1 - width;
		}
	}
}

pub(super) struct WindowAreaWidget {
	number_col_width: u16,
	line_numbers:     Vec<Line<'static>>,
	lines:            Vec<Line<'static>>,
}

impl WindowAreaWidget {
	pub(super) fn from_state(
		state: &EditorState,
		area: Rect,
		viewport: &mut Viewport,
		highlighter: &dyn Highlighter,
	) -> (Self, Option<(u16, u16)>) {
		let Some(buffer) = state.focused_buffer() else {
			return (Self { number_col_width: 0, line_numbers: Vec::new(), lines: Vec::new() }, None);
		};
		let tab_width = state.settings.tab_width;

		let number_col_width = if area.width <= NUMBER_COL_WIDTH { 0 } else { NUMBER_COL_WIDTH };
		let text_width = area.width.saturating_sub(number_col_width) as usize;
		let height = area.height as usize;

		let cursor = buffer.cursor();
		let cursor_line = buffer.line(cursor.line);
		let cursor_col = display_width_of_char_prefix(&cursor_line, cursor.column, tab_width);
		viewport.follow(cursor.line, cursor_col, height, text_width);

		let mut line_numbers = Vec::new();
		let mut lines = Vec::new();
		for index in (viewport.top..buffer.line_count()).take(height) {
			if number_col_width > 0 {
				line_numbers.push(Line::raw(format!("{:>4} ", index + 1)));
			}
			let text = buffer.line(index);
			let cells = styled_cells(highlighter, &text, buffer.language(), tab_width);
			lines.push(visible_line(&cells, viewport.left, text_width));
		}

		let cursor_position = (text_width > 0 && height > 0).then(|| {
			let x = area.x + number_col_width + (cursor_col - viewport.left) as u16;
			let y = area.y + (cursor.line - viewport.top) as u16;
			(x, y)
		});
		(Self { number_col_width, line_numbers, lines }, cursor_position)
	}
}

impl Widget for WindowAreaWidget {
	fn render(self, area: Rect, buf: &mut Buffer) {
		let number_rect = Rect { width: self.number_col_width.min(area.width), ..area };
		let text_rect = Rect {
			x: area.x.saturating_add(self.number_col_width),
			width: area.width.saturating_sub(self.number_col_width),
			..area
		};
		Paragraph::new(self.line_numbers).style(Style::default().fg(Color::DarkGray)).render(number_rect, buf);
		Paragraph::new(self.lines).render(text_rect, buf);
	}
}

fn span_style(style: SpanStyle) -> Style {
	match style {
		SpanStyle::Plain => Style::default(),
		SpanStyle::Keyword => Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
		SpanStyle::String => Style::default().fg(Color::Green),
		SpanStyle::Comment => Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
		SpanStyle::Number => Style::default().fg(Color::Yellow),
	}
}

fn char_width(ch: char, tab_width: usize) -> usize {
	if ch == '\t' { tab_width } else { UnicodeWidthChar::width(ch).unwrap_or(0) }
}

fn display_width_of_char_prefix(line: &str, char_count: usize, tab_width: usize) -> usize {
	line.chars().take(char_count).map(|ch| char_width(ch, tab_width)).sum()
}

fn styled_cells(highlighter: &dyn Highlighter, line: &str, language: Option<&str>, tab_width: usize) -> Vec<(char, Style)> {
	let mut cells = Vec::new();
	for span in highlighter.highlight(line, language) {
		let style = span_style(span.style);
		for ch in span.text.chars() {
			match ch {
				'\t' => cells.extend(std::iter::repeat_n((' ', style), tab_width)),
				ch if UnicodeWidthChar::width(ch).unwrap_or(0) == 0 => {}
				ch => cells.push((ch, style)),
			}
		}
	}
	cells
}

// A wide character split by either edge is dropped.
fn visible_line(cells: &[(char, Style)], skip_cols: usize, max_cols: usize) -> Line<'static> {
	let mut spans: Vec<Span<'static>> = Vec::new();
	let mut col = 0usize;
	for (ch, style) in cells {
		let width = UnicodeWidthChar::width(*ch).unwrap_or(0);
		let start = col;
		col += width;
		if start < skip_cols {
			continue;
		}
		if col > skip_cols + max_cols {
			break;
		}
		match spans.last_mut() {
			Some(last) if last.style == *style => last.content.to_mut().push(*ch),
			_ => spans.push(Span::styled(ch.to_string(), *style)),
		}
	}
	Line::from(spans)
}
