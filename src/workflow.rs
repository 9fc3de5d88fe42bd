use std::sync::Arc;

use anyhow::{Context, Result};
use cinefind::catalog::{CatalogClient, ClientOptions};
use cinefind::{MovieSearch, SearchOutcome};

use crate::settings::ResolvedConfig;

/// Coordinates building and running the interactive search experience.
pub(crate) struct SearchWorkflow {
	search: MovieSearch,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
		let ResolvedConfig {
			base_url,
			token,
			timeout,
			image_base_url,
			debounce,
			initial_query,
			title,
			theme,
			..
		} = config;

		let options = ClientOptions::new(base_url, token).with_timeout(timeout);
		let client = CatalogClient::new(options).context("failed to build catalog client")?;
		tracing::info!(base_url = %client.base_url(), "catalog client ready");

		let search = MovieSearch::new(Arc::new(client))
			.with_title(title)
			.with_initial_query(initial_query)
			.with_theme(theme)
			.with_debounce(debounce)
			.with_image_base_url(image_base_url);
		Ok(Self { search })
	}

	pub(crate) fn run(self) -> Result<SearchOutcome> {
		self.search.run()
	}
}
