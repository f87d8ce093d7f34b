use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::state::EditorState;

pub(super) struct TopBarWidget {
	spans: Vec<Span<'static>>,
}

impl TopBarWidget {
	pub(super) fn from_state(state: &EditorState) -> Self {
		let focused = state.focused();
		let mut spans = Vec::new();
		for (idx, id) in state.window_order.iter().copied().enumerate() {
			let style = if focused == Some(id) {
				Style::default().fg(Color::White).bg(Color::DarkGray).add_modifier(Modifier::BOLD)
			} else {
				Style::default().fg(Color::Gray)
			};
			spans.push(Span::styled(format!(" {} ", state.window_title(id)), style));
			if idx + 1 != state.window_order.len() {
				spans.push(Span::raw(" "));
			}
		}
		Self { spans }
	}
}

impl Widget for TopBarWidget {
	fn render(self, area: Rect, buf: &mut Buffer) {
		Paragraph::new(Line::from(self.spans)).render(area, buf);
	}
}
