mod overlay;
mod status_bar;
mod terminal_session;
mod top_bar;
mod window_area;

use std::collections::HashMap;

use ratatui::layout::{Constraint, Layout};

use crate::state::{EditorState, WindowId};
use crate::syntax::{Highlighter, PlainHighlighter};
use overlay::OverlayWidget;
use status_bar::StatusBarWidget;
pub(crate) use terminal_session::TerminalSession;
pub use terminal_session::TerminalSessionError;
use top_bar::TopBarWidget;
use window_area::{Viewport, WindowAreaWidget};

pub struct Renderer {
	viewports:   HashMap<WindowId, Viewport>,
	highlighter: Box<dyn Highlighter>,
}

impl Renderer {
	pub fn new() -> Self {
		Self { viewports: HashMap::new(), highlighter: Box::new(PlainHighlighter) }
	}

	pub fn render(&mut self, frame: &mut ratatui::Frame<'_>, state: &EditorState) {
		let chunks =
			Layout::vertical([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)]).split(frame.area());

		self.viewports.retain(|id, _| state.windows.contains_key(*id));

		frame.render_widget(TopBarWidget::from_state(state), chunks[0]);

		if let Some(id) = state.focused() {
			let viewport = self.viewports.entry(id).or_default();
			let (window_area, cursor_position) =
				WindowAreaWidget::from_state(state, chunks[1], viewport, self.highlighter.as_ref());
			frame.render_widget(window_area, chunks[1]);
			if state.prompt.is_none()
				&& let Some(position) = cursor_position
			{
				frame.set_cursor_position(position);
			}
		}

		if let Some(overlay) = OverlayWidget::from_state(state) {
			frame.render_widget(overlay, chunks[1]);
		}

		let status_bar = StatusBarWidget::from_state(state);
		if let Some(position) = status_bar.prompt_cursor(chunks[2]) {
			frame.set_cursor_position(position);
		}
		frame.render_widget(status_bar, chunks[2]);
	}
}

impl Default for Renderer {
	fn default() -> Self {
		Self::new()
	}
}
