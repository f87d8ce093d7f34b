use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

use crate::key::{InputEvent, Key, NamedKey, Side};

// Without keyboard enhancement there are no releases, so presses are released at once
// and Ctrl+letter becomes a whole chord.
pub struct InputTranslator {
	keyboard_enhanced: bool,
}

impl InputTranslator {
	pub fn new(keyboard_enhanced: bool) -> Self {
		Self { keyboard_enhanced }
	}

	pub fn translate(&self, event: &Event) -> Vec<InputEvent> {
		match event {
			Event::Key(key) if self.keyboard_enhanced => translate_key(key).into_iter().collect(),
			Event::Key(key) => legacy_key(key),
			Event::FocusGained => vec![InputEvent::FocusChanged(true)],
			Event::FocusLost => vec![InputEvent::FocusChanged(false)],
			_ => Vec::new(),
		}
	}
}

fn legacy_key(event: &KeyEvent) -> Vec<InputEvent> {
	if event.kind != KeyEventKind::Press {
		return Vec::new();
	}
	let Some(key) = key_of(event) else {
		return Vec::new();
	};

	if event.modifiers.contains(KeyModifiers::CONTROL)
		&& let Key::Char(_) = key
	{
		let key = key.normalized();
		// A letter's bindings live under the Control key of the other half.
		let Some(side) = key.half().map(Side::opposite) else {
			return Vec::new();
		};
		return vec![
			InputEvent::KeyDown(Key::Control(side)),
			InputEvent::KeyDown(key),
			InputEvent::KeyUp(key),
			InputEvent::KeyUp(Key::Control(side)),
		];
	}
	vec![InputEvent::KeyDown(key), InputEvent::KeyUp(key)]
}

fn translate_key(event: &KeyEvent) -> Option<InputEvent> {
	let key = key_of(event)?;
	match event.kind {
		KeyEventKind::Press => Some(InputEvent::KeyDown(key)),
		KeyEventKind::Release => Some(InputEvent::KeyUp(key)),
		// Auto-repeat of a held key is not a new press.
		KeyEventKind::Repeat => None,
	}
}

fn key_of(event: &KeyEvent) -> Option<Key> {
	let key = match event.code {
		KeyCode::Char(c) => {
			if event.modifiers.contains(KeyModifiers::SHIFT) && c.is_lowercase() {
				Key::Char(c.to_uppercase().next().unwrap_or(c))
			} else {
				Key::Char(c)
			}
		}
		KeyCode::Enter => Key::Named(NamedKey::Enter),
		KeyCode::Tab => Key::Named(NamedKey::Tab),
		KeyCode::Backspace => Key::Named(NamedKey::Backspace),
		KeyCode::Delete => Key::Named(NamedKey::Delete),
		KeyCode::Esc => Key::Named(NamedKey::Esc),
		KeyCode::Up => Key::Named(NamedKey::Up),
		KeyCode::Down => Key::Named(NamedKey::Down),
		KeyCode::Left => Key::Named(NamedKey::Left),
		KeyCode::Right => Key::Named(NamedKey::Right),
		KeyCode::Home => Key::Named(NamedKey::Home),
		KeyCode::End => Key::Named(NamedKey::End),
		KeyCode::Modifier(ModifierKeyCode::LeftControl) => Key::Control(Side::Left),
		KeyCode::Modifier(ModifierKeyCode::RightControl) => Key::Control(Side::Right),
		KeyCode::Modifier(_) => Key::OtherModifier,
		_ => return None,
	};
	Some(key)
}

#[cfg(test)]
mod tests {
	use crossterm::event::{KeyEventState, ModifierKeyCode};

	use super::*;
	use InputEvent::{KeyDown, KeyUp};

	fn key_event(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
		Event::Key(KeyEvent { code, modifiers, kind, state: KeyEventState::NONE })
	}

	fn enhanced() -> InputTranslator {
		InputTranslator::new(true)
	}

	fn legacy() -> InputTranslator {
		InputTranslator::new(false)
	}

	#[test]
	fn control_press_and_release_carry_their_side() {
		let press = key_event(
			KeyCode::Modifier(ModifierKeyCode::RightControl),
			KeyModifiers::CONTROL,
			KeyEventKind::Press,
		);
		let release =
			key_event(KeyCode::Modifier(ModifierKeyCode::LeftControl), KeyModifiers::NONE, KeyEventKind::Release);

		assert_eq!(enhanced().translate(&press), vec![KeyDown(Key::Control(Side::Right))]);
		assert_eq!(enhanced().translate(&release), vec![KeyUp(Key::Control(Side::Left))]);
	}

	#[test]
	fn shifted_letters_are_uppercased() {
		let event = key_event(KeyCode::Char('a'), KeyModifiers::SHIFT, KeyEventKind::Press);
		assert_eq!(enhanced().translate(&event), vec![KeyDown(Key::Char('A'))]);
	}

	#[test]
	fn repeats_and_unknown_keys_are_dropped() {
		let repeat = key_event(KeyCode::Char('e'), KeyModifiers::CONTROL, KeyEventKind::Repeat);
		let f1 = key_event(KeyCode::F(1), KeyModifiers::NONE, KeyEventKind::Press);
		assert!(enhanced().translate(&repeat).is_empty());
		assert!(enhanced().translate(&f1).is_empty());
		assert!(legacy().translate(&f1).is_empty());
	}

	#[test]
	fn focus_events_map_to_focus_changes() {
		assert_eq!(enhanced().translate(&Event::FocusLost), vec![InputEvent::FocusChanged(false)]);
		assert_eq!(legacy().translate(&Event::FocusGained), vec![InputEvent::FocusChanged(true)]);
		assert!(enhanced().translate(&Event::Resize(80, 24)).is_empty());
	}

	#[test]
	fn other_modifiers_are_reported_as_modifiers() {
		let shift = key_event(KeyCode::Modifier(ModifierKeyCode::LeftShift), KeyModifiers::SHIFT, KeyEventKind::Press);
		assert_eq!(enhanced().translate(&shift), vec![KeyDown(Key::OtherModifier)]);
	}

	#[test]
	fn enhanced_ctrl_letter_is_a_plain_press() {
		let event = key_event(KeyCode::Char('i'), KeyModifiers::CONTROL, KeyEventKind::Press);
		assert_eq!(enhanced().translate(&event), vec![KeyDown(Key::Char('i'))]);
	}

	#[test]
	fn legacy_ctrl_letter_becomes_a_one_key_chord() {
		let close = key_event(KeyCode::Char('i'), KeyModifiers::CONTROL, KeyEventKind::Press);
		let lctrl = Key::Control(Side::Left);
		assert_eq!(
			legacy().translate(&close),
			vec![KeyDown(lctrl), KeyDown(Key::Char('i')), KeyUp(Key::Char('i')), KeyUp(lctrl)]
		);

		let up = key_event(KeyCode::Char('E'), KeyModifiers::CONTROL | KeyModifiers::SHIFT, KeyEventKind::Press);
		let rctrl = Key::Control(Side::Right);
		assert_eq!(
			legacy().translate(&up),
			vec![KeyDown(rctrl), KeyDown(Key::Char('e')), KeyUp(Key::Char('e')), KeyUp(rctrl)]
		);
	}

	#[test]
	fn legacy_ctrl_outside_both_halves_yields_nothing() {
		let digit = key_event(KeyCode::Char('5'), KeyModifiers::CONTROL, KeyEventKind::Press);
		let space = key_event(KeyCode::Char(' '), KeyModifiers::CONTROL, KeyEventKind::Press);
		assert!(legacy().translate(&digit).is_empty());
		assert!(legacy().translate(&space).is_empty());
	}

	#[test]
	fn legacy_press_is_released_immediately() {
		let event = key_event(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Press);
		assert_eq!(legacy().translate(&event), vec![KeyDown(Key::Char('q')), KeyUp(Key::Char('q'))]);

		let enter = key_event(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Press);
		let enter_key = Key::Named(NamedKey::Enter);
		assert_eq!(legacy().translate(&enter), vec![KeyDown(enter_key), KeyUp(enter_key)]);
	}
}
