use std::collections::HashSet;

use thiserror::Error;
use tracing::{trace, warn};

use crate::command::Command;
use crate::command_table::CommandTable;
use crate::key::{InputEvent, Key, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordState {
	Idle,
	ChordActive(Side),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
	#[error("key {0} released without being pressed")]
	UnmatchedKeyUp(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
	ShowOverlay(Side),
	HideOverlay,
	Invoke(Command),
	PassThrough(Key),
	Absorbed,
	Ignored(InputError),
}

#[derive(Debug, Clone)]
pub struct ChordDispatcher {
	state: ChordState,
	held:  HashSet<Key>,
}

impl Default for ChordDispatcher {
	fn default() -> Self {
		Self::new()
	}
}

impl ChordDispatcher {
	pub fn new() -> Self {
		Self { state: ChordState::Idle, held: HashSet::new() }
	}

	pub fn state(&self) -> ChordState {
		self.state
	}

	pub fn overlay(&self) -> Option<Side> {
		match self.state {
			ChordState::Idle => None,
			ChordState::ChordActive(side) => Some(side),
		}
	}

	pub fn dispatch(&mut self, event: InputEvent, table: &CommandTable) -> Effect {
		let effect = match event {
			InputEvent::KeyDown(key) => self.key_down(key, table),
			InputEvent::KeyUp(key) => self.key_up(key),
			InputEvent::FocusChanged(focused) => self.focus_changed(focused),
		};
		trace!("dispatch {:?} -> {:?} (state {:?})", event, effect, self.state);
		effect
	}

	fn key_down(&mut self, key: Key, table: &CommandTable) -> Effect {
		// Shift, Alt and Super all share one key identity, so they are not tracked.
		let newly_pressed = key == Key::OtherModifier || self.held.insert(key.normalized());

		match (self.state, key) {
			(ChordState::Idle, Key::Control(side)) => {
				if self.non_modifier_held() {
					trace!("{} ctrl pressed with other keys held, not a chord", side);
					Effect::PassThrough(key)
				} else {
					self.state = ChordState::ChordActive(side);
					Effect::ShowOverlay(side)
				}
			}
			(ChordState::Idle, _) => Effect::PassThrough(key),
			(ChordState::ChordActive(_), Key::Control(_) | Key::OtherModifier) => Effect::Absorbed,
			(ChordState::ChordActive(side), _) => match table.resolve(side, key) {
				Some(command) => {
					if !newly_pressed {
						trace!("auto-repeat of {} fires {} again", key, command);
					}
					Effect::Invoke(command)
				}
				None => Effect::Absorbed,
			},
		}
	}

	fn key_up(&mut self, key: Key) -> Effect {
		if key == Key::OtherModifier {
			return Effect::Absorbed;
		}
		let normalized = key.normalized();
		let was_held = self.held.remove(&normalized);

		if let (ChordState::ChordActive(active), Key::Control(side)) = (self.state, key)
			&& active == side
		{
			if !was_held {
				warn!("{} released without a matching press; ending chord anyway", key);
			}
			self.state = ChordState::Idle;
			return Effect::HideOverlay;
		}

		if !was_held {
			let err = InputError::UnmatchedKeyUp(key);
			warn!("ignoring malformed input: {}", err);
			return Effect::Ignored(err);
		}
		Effect::Absorbed
	}

	fn focus_changed(&mut self, focused: bool) -> Effect {
		// Releases that happen while unfocused are never delivered.
		self.held.clear();
		if focused {
			return Effect::Absorbed;
		}
		match self.state {
			ChordState::ChordActive(side) => {
				trace!("focus lost during {} chord", side);
				self.state = ChordState::Idle;
				Effect::HideOverlay
			}
			ChordState::Idle => Effect::Absorbed,
		}
	}

	fn non_modifier_held(&self) -> bool {
		self.held.iter().any(|key| !key.is_modifier())
	}
}
