use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::state::EditorState;

pub(super) struct StatusBarWidget {
	mode:        String,
	status_line: String,
	position:    String,
	prompting:   bool,
}

impl StatusBarWidget {
	pub(super) fn from_state(state: &EditorState) -> Self {
		let mode = match state.overlay() {
			Some(overlay) => format!("{} CTRL", overlay.side.name().to_uppercase()),
			None => "EDIT".to_string(),
		};
		Self {
			mode,
			status_line: state.status_line(),
			position: state.cursor_position_label().unwrap_or_default(),
			prompting: state.prompt.is_some(),
		}
	}

	fn mode_width(&self) -> u16 {
		(self.mode.width() + 2) as u16
	}

	pub(super) fn prompt_cursor(&self, area: Rect) -> Option<(u16, u16)> {
		if !self.prompting || area.width == 0 {
			return None;
		}
		let offset = self.mode_width().saturating_add(1).saturating_add(self.status_line.width() as u16);
		Some((area.x.saturating_add(offset).min(area.right().saturating_sub(1)), area.y))
	}
}

impl Widget for StatusBarWidget {
	fn render(self, area: Rect, buf: &mut Buffer) {
		let position_width = (self.position.width() + 1) as u16;
		let [left, right] =
			Layout::horizontal([Constraint::Min(1), Constraint::Length(position_width.min(area.width))]).areas(area);
		Paragraph::new(Line::from(vec![
			Span::styled(
				format!(" {} ", self.mode),
				Style::default().fg(Color::White).bg(Color::Blue).add_modifier(Modifier::BOLD),
			),
			Span::raw(format!(" {}", self.status_line)),
		]))
		.render(left, buf);
		Paragraph::new(Span::styled(self.position, Style::default().fg(Color::Gray))).render(right, buf);
	}
}
