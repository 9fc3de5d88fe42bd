use std::sync::Arc;
use std::sync::mpsc::TryRecvError;
use std::time::{Duration, Instant};

use cinefind_catalog::{DEFAULT_IMAGE_BASE_URL, Movie, MovieSource};
use ratatui::widgets::TableState;
use throbber_widgets_tui::ThrobberState;

use super::input::QueryInput;
use super::theme::Theme;
use crate::query::runtime::FetchRuntime;
use crate::query::{DEFAULT_DEBOUNCE, FetchRequest, FetchState, QueryController};

/// Presentation and timing knobs for an [`App`].
#[derive(Debug, Clone)]
pub struct AppOptions {
	pub title: String,
	pub initial_query: String,
	pub theme: Theme,
	pub debounce: Duration,
	pub image_base_url: String,
}

impl Default for AppOptions {
	fn default() -> Self {
		Self {
			title: "Movies".to_string(),
			initial_query: String::new(),
			theme: Theme::default(),
			debounce: DEFAULT_DEBOUNCE,
			image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
		}
	}
}

pub struct App {
	pub(crate) controller: QueryController,
	runtime: FetchRuntime,
	pub(crate) input: QueryInput,
	pub(crate) table_state: TableState,
	pub(crate) throbber_state: ThrobberState,
	pub(crate) theme: Theme,
	pub(crate) title: String,
	pub(crate) image_base_url: String,
}

impl App {
	pub fn new(source: Arc<dyn MovieSource>, options: AppOptions) -> Self {
		let AppOptions {
			title,
			initial_query,
			theme,
			debounce,
			image_base_url,
		} = options;
		Self {
			controller: QueryController::new(initial_query.clone(), debounce),
			runtime: FetchRuntime::spawn(source),
			input: QueryInput::new(initial_query),
			table_state: TableState::default(),
			throbber_state: ThrobberState::default(),
			theme,
			title,
			image_base_url,
		}
	}

	/// Issue the initial listing for whatever query the app was created with.
	pub fn start(&mut self) {
		if let Some(request) = self.controller.commit_now() {
			self.dispatch(request);
		}
	}

	/// Advance the debounce timer to `now`, dispatching a fetch on commit.
	pub fn tick(&mut self, now: Instant) {
		if let Some(request) = self.controller.poll(now) {
			self.dispatch(request);
		}
	}

	fn dispatch(&mut self, request: FetchRequest) {
		self.table_state.select(None);
		if let Err(outcome) = self.runtime.dispatch(request) {
			self.controller.apply(outcome);
		}
	}

	/// Apply every finished fetch waiting on the worker channel.
	pub fn pump_fetch_results(&mut self) {
		loop {
			match self.runtime.try_recv() {
				Ok(outcome) => {
					if self.controller.apply(outcome) {
						self.reset_selection();
					}
				}
				Err(TryRecvError::Empty) => break,
				Err(TryRecvError::Disconnected) => {
					tracing::warn!("fetch worker channel disconnected");
					break;
				}
			}
		}
	}

	/// Block until the next fetch outcome arrives and apply it.
	#[cfg(test)]
	pub(crate) fn wait_for_outcome(&mut self, timeout: Duration) -> bool {
		match self.runtime.recv_timeout(timeout) {
			Ok(outcome) => {
				let applied = self.controller.apply(outcome);
				if applied {
					self.reset_selection();
				}
				applied
			}
			Err(_) => false,
		}
	}

	pub(crate) fn on_input_changed(&mut self, now: Instant) {
		self.controller
			.on_input_change(self.input.text().to_string(), now);
	}

	fn reset_selection(&mut self) {
		if self.results().is_empty() {
			self.table_state.select(None);
		} else {
			self.table_state.select(Some(0));
		}
	}

	pub fn state(&self) -> &FetchState {
		self.controller.state()
	}

	pub fn query(&self) -> &str {
		self.controller.raw_query()
	}

	pub(crate) fn results(&self) -> &[Movie] {
		self.controller.state().results()
	}

	pub(crate) fn selected_movie(&self) -> Option<&Movie> {
		let index = self.table_state.selected()?;
		self.results().get(index)
	}
}
