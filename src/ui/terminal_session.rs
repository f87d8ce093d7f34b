use std::io;

use crossterm::event::{
	DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
	PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
	EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
	supports_keyboard_enhancement,
};
use crossterm::{cursor::SetCursorStyle, execute};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum TerminalSessionError {
	#[error("enable raw mode failed")]
	EnableRawMode {
		#[source]
		source: io::Error,
	},
	#[error("enter alternate screen failed")]
	EnterAlternateScreen {
		#[source]
		source: io::Error,
	},
	#[error("enable keyboard reporting failed")]
	KeyboardReporting {
		#[source]
		source: io::Error,
	},
	#[error("create terminal backend failed")]
	CreateTerminal {
		#[source]
		source: io::Error,
	},
	#[error("terminal draw failed")]
	Draw {
		#[source]
		source: io::Error,
	},
}

struct TerminalModeGuard {
	keyboard_enhanced: bool,
}

impl Drop for TerminalModeGuard {
	fn drop(&mut self) {
		let mut stdout = io::stdout();
		if self.keyboard_enhanced {
			let _ = execute!(stdout, PopKeyboardEnhancementFlags);
		}
		let _ = execute!(stdout, DisableFocusChange, SetCursorStyle::DefaultUserShape, LeaveAlternateScreen);
		let _ = disable_raw_mode();
	}
}

pub(crate) struct TerminalSession {
	terminal:   Terminal<CrosstermBackend<io::Stdout>>,
	mode_guard: TerminalModeGuard,
}

impl TerminalSession {
	pub(crate) fn enter(title: &str) -> Result<Self, TerminalSessionError> {
		enable_raw_mode().map_err(|source| TerminalSessionError::EnableRawMode { source })?;
		let mut mode_guard = TerminalModeGuard { keyboard_enhanced: false };
		let mut stdout = io::stdout();
		execute!(stdout, EnterAlternateScreen, EnableFocusChange, SetTitle(title), SetCursorStyle::SteadyBar)
			.map_err(|source| TerminalSessionError::EnterAlternateScreen { source })?;

		// Chords need to see Control pressed and released on its own, which
		// only terminals speaking the kitty keyboard protocol report.
		if supports_keyboard_enhancement().unwrap_or(false) {
			execute!(
				stdout,
				PushKeyboardEnhancementFlags(
					KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
						| KeyboardEnhancementFlags::REPORT_EVENT_TYPES
						| KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
				)
			)
			.map_err(|source| TerminalSessionError::KeyboardReporting { source })?;
			mode_guard.keyboard_enhanced = true;
		} else {
			warn!("terminal does not report key releases; chords will not work");
		}

		let backend = CrosstermBackend::new(stdout);
		let terminal =
			Terminal::new(backend).map_err(|source| TerminalSessionError::CreateTerminal { source })?;
		Ok(Self { terminal, mode_guard })
	}

	pub(crate) fn keyboard_enhanced(&self) -> bool {
		self.mode_guard.keyboard_enhanced
	}

	pub(crate) fn draw(&mut self, render: impl FnOnce(&mut ratatui::Frame<'_>)) -> Result<(), TerminalSessionError> {
		self.terminal.draw(render).map_err(|source| TerminalSessionError::Draw { source })?;
		Ok(())
	}
}
