#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
	payload: Option<String>,
}

impl Clipboard {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set(&mut self, text: impl Into<String>) {
		self.payload = Some(text.into());
	}

	pub fn get(&self) -> Option<&str> {
		self.payload.as_deref()
	}

	pub fn is_empty(&self) -> bool {
		self.payload.is_none()
	}
}
