use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::command_table::OverlayKey;
use crate::key::Side;
use crate::state::EditorState;

const KEY_CELL_WIDTH: usize = 10;
const ROW_STAGGER: usize = 2;

pub(super) struct OverlayWidget {
	title: String,
	rows:  Vec<Vec<OverlayKey>>,
}

impl OverlayWidget {
	pub(super) fn from_state(state: &EditorState) -> Option<Self> {
		let overlay = state.overlay()?;
		let mut rows: Vec<Vec<OverlayKey>> = Vec::new();
		for key in &overlay.keys {
			if rows.len() <= key.row {
				rows.resize_with(key.row + 1, Vec::new);
			}
			rows[key.row].push(*key);
		}

		let mut title = format!(" {} Ctrl ", capitalize(overlay.side.name()));
		// The window commands live on the right half, so the cursor position
		// is shown while that side is on screen.
		if overlay.side == Side::Left
			&& let Some(label) = state.cursor_position_label()
		{
			title = format!("{}· {} ", title, label);
		}
		Some(Self { title, rows })
	}

	fn inner_width(&self) -> usize {
		self.rows
			.iter()
			.enumerate()
			.map(|(row, keys)| row * ROW_STAGGER + keys.len() * KEY_CELL_WIDTH)
			.max()
			.unwrap_or(0)
	}
}

impl Widget for OverlayWidget {
	fn render(self, area: Rect, buf: &mut Buffer) {
		let width = (self.inner_width() as u16 + 2).max(self.title.chars().count() as u16 + 2).min(area.width);
		let height = (self.rows.len() as u16 + 2).min(area.height);
		if width < 3 || height < 3 {
			return;
		}
		let panel = Rect {
			x: area.x + (area.width - width) / 2,
			y: area.y + area.height - height,
			width,
			height,
		};

		let bound = Style::default().fg(Color::White).bg(Color::DarkGray);
		let key_style = bound.fg(Color::Yellow).add_modifier(Modifier::BOLD);
		let unbound = Style::default().fg(Color::DarkGray);

		let lines = self
			.rows
			.iter()
			.enumerate()
			.map(|(row, keys)| {
				let mut spans = vec![Span::raw(" ".repeat(row * ROW_STAGGER))];
				for key in keys {
					match key.command {
						Some(command) => {
							spans.push(Span::styled(format!(" {} ", key.key), key_style));
							spans.push(Span::styled(pad(command.label(), KEY_CELL_WIDTH - 4), bound));
						}
						None => spans.push(Span::styled(pad(&format!(" {}", key.key), KEY_CELL_WIDTH - 1), unbound)),
					}
					spans.push(Span::raw(" "));
				}
				Line::from(spans)
			})
			.collect::<Vec<_>>();

		Clear.render(panel, buf);
		Paragraph::new(lines)
			.block(Block::bordered().title(self.title).border_style(Style::default().fg(Color::Blue)))
			.render(panel, buf);
	}
}

fn pad(text: &str, width: usize) -> String {
	format!("{:<width$}", text, width = width)
}

fn capitalize(text: &str) -> String {
	let mut chars = text.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
