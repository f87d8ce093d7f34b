use std::path::PathBuf;
use std::thread;

use crossterm::event;
use thiserror::Error;
use tracing::{error, info, trace};

use crate::action_handler::ActionHandler;
use crate::config::{Config, ConfigError};
use crate::input::InputTranslator;
use crate::key::InputEvent;
use crate::state::EditorState;
use crate::ui::{Renderer, TerminalSession, TerminalSessionError};

#[derive(Debug, Error)]
pub enum AppError {
	#[error("build command table failed")]
	CommandTable {
		#[source]
		source: ConfigError,
	},
	#[error(transparent)]
	Terminal(#[from] TerminalSessionError),
	#[error("input channel disconnected")]
	InputDisconnected,
}

pub struct App {
	state:          EditorState,
	renderer:       Renderer,
	action_handler: ActionHandler,
	event_tx:       flume::Sender<AppEvent>,
	event_rx:       flume::Receiver<AppEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppEvent {
	Input(InputEvent),
	Redraw,
}

impl App {
	pub fn new(config: &Config) -> Result<Self, AppError> {
		let table = config.command_table().map_err(|source| AppError::CommandTable { source })?;
		info!("command table ready with {} bindings", table.binding_count());
		let (event_tx, event_rx) = flume::bounded(1024);
		Ok(Self {
			state: EditorState::new(config.settings.clone()),
			renderer: Renderer::new(),
			action_handler: ActionHandler::new(table),
			event_tx,
			event_rx,
		})
	}

	pub fn open_files(&mut self, paths: &[PathBuf]) -> usize {
		open_initial_windows(&mut self.state, paths)
	}

	pub fn run(mut self) -> Result<(), AppError> {
		let mut session = TerminalSession::enter(&self.state.title)?;
		let keyboard_enhanced = session.keyboard_enhanced();
		if !keyboard_enhanced {
			self.state.notify("Terminal does not report Ctrl release; chords run one key at a time");
		}
		self.start_input_pump(InputTranslator::new(keyboard_enhanced));

		loop {
			session.draw(|frame| self.renderer.render(frame, &self.state))?;
			trace!("redraw");

			let event = self.event_rx.recv().map_err(|err| {
				error!("input channel disconnected while waiting for next event: {}", err);
				AppError::InputDisconnected
			})?;
			let AppEvent::Input(event) = event else {
				continue;
			};
			if self.action_handler.apply(&mut self.state, event).is_break() {
				info!("last window closed, exiting");
				break;
			}
		}
		Ok(())
	}

	fn start_input_pump(&self, translator: InputTranslator) {
		let event_tx = self.event_tx.clone();
		thread::spawn(move || {
			loop {
				let evt = match event::read() {
					Ok(evt) => evt,
					Err(err) => {
						error!("input pump stopped: failed to read terminal event: {}", err);
						break;
					}
				};
				let events = match &evt {
					event::Event::Resize(..) => vec![AppEvent::Redraw],
					evt => translator.translate(evt).into_iter().map(AppEvent::Input).collect(),
				};
				if let Err(err) = events.into_iter().try_for_each(|event| event_tx.send(event)) {
					error!("input pump stopped: failed to send event: {}", err);
					break;
				}
			}
		});
	}
}

pub fn open_initial_windows(state: &mut EditorState, paths: &[PathBuf]) -> usize {
	let mut failures = 0;
	for path in paths {
		if let Err(err) = state.open_window(Some(path)) {
			error!("failed to open {}: {}", path.display(), err);
			failures += 1;
		}
	}
	if state.windows.is_empty() {
		let _ = state.open_window(None);
	}
	failures
}
