use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use cinefind_catalog::MovieSource;

use super::outcome::SearchOutcome;
use super::state::{App, AppOptions};
use super::theme::Theme;

/// Builder for the interactive movie search.
///
/// Mirrors the options exposed on the command line so embedders can drive the
/// same interface with any [`MovieSource`].
pub struct MovieSearch {
	source: Arc<dyn MovieSource>,
	options: AppOptions,
}

impl MovieSearch {
	pub fn new(source: Arc<dyn MovieSource>) -> Self {
		Self {
			source,
			options: AppOptions::default(),
		}
	}

	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.options.title = title.into();
		self
	}

	pub fn with_initial_query(mut self, query: impl Into<String>) -> Self {
		self.options.initial_query = query.into();
		self
	}

	pub fn with_theme(mut self, theme: Theme) -> Self {
		self.options.theme = theme;
		self
	}

	pub fn with_debounce(mut self, interval: Duration) -> Self {
		self.options.debounce = interval;
		self
	}

	pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
		self.options.image_base_url = url.into();
		self
	}

	/// Construct the [`App`] without starting the terminal session.
	pub fn build(self) -> App {
		App::new(self.source, self.options)
	}

	/// Run the interactive session to completion.
	pub fn run(self) -> Result<SearchOutcome> {
		let mut app = self.build();
		app.run()
	}
}
