use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// Single-line text input bound to the raw query.
///
/// The cursor is tracked as a character index so multi-byte input edits
/// cleanly.
#[derive(Debug, Clone, Default)]
pub struct QueryInput {
	text: String,
	cursor: usize,
}

impl QueryInput {
	pub fn new(text: impl Into<String>) -> Self {
		let text = text.into();
		let cursor = text.chars().count();
		Self { text, cursor }
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn cursor(&self) -> usize {
		self.cursor
	}

	/// Display width of the text before the cursor.
	pub fn cursor_column(&self) -> u16 {
		let prefix = &self.text[..self.byte_offset(self.cursor)];
		u16::try_from(prefix.width()).unwrap_or(u16::MAX)
	}

	/// Apply a key press. Returns `true` when the text changed.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		match key.code {
			KeyCode::Char('u') if ctrl => self.clear(),
			KeyCode::Char('w') if ctrl => self.delete_word_before(),
			KeyCode::Char('a') if ctrl => self.move_to(0),
			KeyCode::Char('e') if ctrl => self.move_to(self.len()),
			KeyCode::Char(_) if ctrl => false,
			KeyCode::Char(c) => {
				self.insert(c);
				true
			}
			KeyCode::Backspace => self.delete_before(),
			KeyCode::Delete => self.delete_at(),
			KeyCode::Left => self.move_to(self.cursor.saturating_sub(1)),
			KeyCode::Right => self.move_to(self.cursor + 1),
			KeyCode::Home => self.move_to(0),
			KeyCode::End => self.move_to(self.len()),
			_ => false,
		}
	}

	fn len(&self) -> usize {
		self.text.chars().count()
	}

	fn byte_offset(&self, index: usize) -> usize {
		self.text
			.char_indices()
			.nth(index)
			.map(|(offset, _)| offset)
			.unwrap_or(self.text.len())
	}

	fn insert(&mut self, c: char) {
		let offset = self.byte_offset(self.cursor);
		self.text.insert(offset, c);
		self.cursor += 1;
	}

	fn delete_before(&mut self) -> bool {
		if self.cursor == 0 {
			return false;
		}
		self.cursor -= 1;
		let offset = self.byte_offset(self.cursor);
		self.text.remove(offset);
		true
	}

	fn delete_at(&mut self) -> bool {
		if self.cursor >= self.len() {
			return false;
		}
		let offset = self.byte_offset(self.cursor);
		self.text.remove(offset);
		true
	}

	fn delete_word_before(&mut self) -> bool {
		let chars: Vec<char> = self.text.chars().collect();
		let mut start = self.cursor;
		while start > 0 && chars[start - 1].is_whitespace() {
			start -= 1;
		}
		while start > 0 && !chars[start - 1].is_whitespace() {
			start -= 1;
		}
		if start == self.cursor {
			return false;
		}
		let from = self.byte_offset(start);
		let to = self.byte_offset(self.cursor);
		self.text.replace_range(from..to, "");
		self.cursor = start;
		true
	}

	fn clear(&mut self) -> bool {
		self.cursor = 0;
		if self.text.is_empty() {
			return false;
		}
		self.text.clear();
		true
	}

	/// Cursor movement never changes the text.
	fn move_to(&mut self, index: usize) -> bool {
		self.cursor = index.min(self.len());
		false
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	fn ctrl(c: char) -> KeyEvent {
		KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
	}

	fn typed(text: &str) -> QueryInput {
		let mut input = QueryInput::default();
		for c in text.chars() {
			input.input(key(KeyCode::Char(c)));
		}
		input
	}

	#[test]
	fn typing_appends_and_reports_changes() {
		let mut input = QueryInput::default();
		assert!(input.input(key(KeyCode::Char('b'))));
		assert!(input.input(key(KeyCode::Char('a'))));
		assert_eq!(input.text(), "ba");
		assert_eq!(input.cursor(), 2);
	}

	#[test]
	fn movement_is_not_a_change() {
		let mut input = typed("bat");
		assert!(!input.input(key(KeyCode::Left)));
		assert!(!input.input(key(KeyCode::Home)));
		assert_eq!(input.cursor(), 0);
		assert!(input.input(key(KeyCode::Delete)));
		assert_eq!(input.text(), "at");
	}

	#[test]
	fn backspace_at_start_does_nothing() {
		let mut input = typed("x");
		input.input(key(KeyCode::Home));
		assert!(!input.input(key(KeyCode::Backspace)));
		assert_eq!(input.text(), "x");
	}

	#[test]
	fn ctrl_w_removes_the_previous_word() {
		let mut input = typed("the dark knight ");
		assert!(input.input(ctrl('w')));
		assert_eq!(input.text(), "the dark ");
		assert_eq!(input.cursor(), 9);
	}

	#[test]
	fn ctrl_u_clears_everything() {
		let mut input = typed("batman");
		assert!(input.input(ctrl('u')));
		assert_eq!(input.text(), "");
		assert!(!input.input(ctrl('u')));
	}

	#[test]
	fn multibyte_text_edits_by_character() {
		let mut input = typed("amélie");
		input.input(key(KeyCode::Left));
		input.input(key(KeyCode::Left));
		input.input(key(KeyCode::Left));
		assert!(input.input(key(KeyCode::Backspace)));
		assert_eq!(input.text(), "amlie");
		assert_eq!(input.cursor_column(), 2);
	}

	#[test]
	fn wide_characters_advance_the_cursor_column_by_two() {
		let input = QueryInput::new("千と");
		assert_eq!(input.cursor_column(), 4);
	}
}
