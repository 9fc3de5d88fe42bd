use std::time::Instant;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use super::outcome::SearchOutcome;

const PAGE_STEP: usize = 10;

impl App {
	/// Handle one key press. Returns an outcome when the session should end.
	pub(crate) fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<SearchOutcome> {
		match key.code {
			KeyCode::Esc => return Some(SearchOutcome::cancelled(self.input.text())),
			KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
				return Some(SearchOutcome::cancelled(self.input.text()));
			}
			KeyCode::Enter => {
				let selection = self.selected_movie().cloned();
				return Some(SearchOutcome::accepted(self.input.text(), selection));
			}
			KeyCode::Up => self.move_selection_up(1),
			KeyCode::Down => self.move_selection_down(1),
			KeyCode::PageUp => self.move_selection_up(PAGE_STEP),
			KeyCode::PageDown => self.move_selection_down(PAGE_STEP),
			_ => {
				if self.input.input(key) {
					self.on_input_changed(now);
				}
			}
		}
		None
	}

	fn move_selection_up(&mut self, step: usize) {
		if let Some(selected) = self.table_state.selected() {
			self.table_state.select(Some(selected.saturating_sub(step)));
		}
	}

	fn move_selection_down(&mut self, step: usize) {
		let len = self.results().len();
		if len == 0 {
			return;
		}
		let next = self
			.table_state
			.selected()
			.map_or(0, |selected| selected.saturating_add(step));
		self.table_state.select(Some(next.min(len - 1)));
	}
}
