use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail, ensure};
use cinefind::catalog::{DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL, Url};
use cinefind::ui::theme;
use cinefind::{DEFAULT_DEBOUNCE, Theme, app_dirs};
use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::cli::CliArgs;

const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_TITLE: &str = "Movies";
const DEFAULT_THEME: &str = "slate";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
	api: ApiSection,
	search: SearchSection,
	ui: UiSection,
	log: LogSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiSection {
	base_url: Option<String>,
	token: Option<String>,
	timeout_ms: Option<u64>,
	image_base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
	debounce_ms: Option<u64>,
	initial_query: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
	title: Option<String>,
	theme: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LogSection {
	level: Option<String>,
}

pub struct ResolvedConfig {
	pub base_url: Url,
	pub token: String,
	pub timeout: Duration,
	pub image_base_url: String,
	pub debounce: Duration,
	pub initial_query: String,
	pub title: String,
	pub theme: Theme,
	pub theme_name: String,
	pub log_level: String,
}

impl ResolvedConfig {
	pub fn print_summary(&self) {
		println!("Effective configuration:");
		println!("  API base URL: {}", self.base_url);
		println!("  API token: {}", redact(&self.token));
		println!("  Request timeout: {} ms", self.timeout.as_millis());
		println!("  Image base URL: {}", self.image_base_url);
		println!("  Debounce: {} ms", self.debounce.as_millis());
		if !self.initial_query.is_empty() {
			println!("  Initial query: {}", self.initial_query);
		}
		println!("  Prompt title: {}", self.title);
		println!("  UI theme: {}", self.theme_name);
		println!("  Log level: {}", self.log_level);
	}
}

pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve()
}

fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		config::Environment::with_prefix("cinefind")
			.separator("__")
			.try_parsing(true),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".cinefind.toml"));
		files.push(current_dir.join("cinefind.toml"));
	}

	files
}

impl RawConfig {
	fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(token) = cli.token.clone() {
			self.api.token = Some(token);
		}
		if let Some(url) = cli.base_url.clone() {
			self.api.base_url = Some(url);
		}
		if let Some(value) = cli.timeout_ms {
			self.api.timeout_ms = Some(value);
		}
		if let Some(value) = cli.debounce_ms {
			self.search.debounce_ms = Some(value);
		}
		if let Some(query) = cli.initial_query.clone() {
			self.search.initial_query = Some(query);
		}
		if let Some(title) = cli.title.clone() {
			self.ui.title = Some(title);
		}
		if let Some(theme) = cli.theme.clone() {
			self.ui.theme = Some(theme);
		}
		if let Some(level) = cli.log_level.clone() {
			self.log.level = Some(level);
		}
	}

	fn resolve(self) -> Result<ResolvedConfig> {
		let token = self
			.api
			.token
			.map(|token| token.trim().to_string())
			.unwrap_or_default();
		ensure!(
			!token.is_empty(),
			"an API token is required (set api.token, --token or TMDB_API_TOKEN)"
		);

		let raw_base = self
			.api
			.base_url
			.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
		let base_url = Url::parse(raw_base.trim())
			.with_context(|| format!("invalid API base URL '{raw_base}'"))?;
		ensure!(
			!base_url.cannot_be_a_base(),
			"API base URL '{raw_base}' cannot carry a path"
		);

		let timeout_ms = self.api.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
		ensure!(timeout_ms > 0, "api.timeout_ms must be greater than zero");

		let debounce = match self.search.debounce_ms {
			Some(0) => bail!("search.debounce_ms must be greater than zero"),
			Some(ms) => Duration::from_millis(ms),
			None => DEFAULT_DEBOUNCE,
		};

		let image_base_url = self
			.api
			.image_base_url
			.map(|url| url.trim().trim_end_matches('/').to_string())
			.filter(|url| !url.is_empty())
			.unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string());

		let theme_name = self
			.ui
			.theme
			.map(|name| name.trim().to_ascii_lowercase())
			.filter(|name| !name.is_empty())
			.unwrap_or_else(|| DEFAULT_THEME.to_string());
		let Some(theme) = theme::by_name(&theme_name) else {
			bail!(
				"unknown theme '{theme_name}' (available: {})",
				theme::names().join(", ")
			);
		};

		let title = self
			.ui
			.title
			.filter(|title| !title.trim().is_empty())
			.unwrap_or_else(|| DEFAULT_TITLE.to_string());

		let log_level = self
			.log
			.level
			.filter(|level| !level.trim().is_empty())
			.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

		Ok(ResolvedConfig {
			base_url,
			token,
			timeout: Duration::from_millis(timeout_ms),
			image_base_url,
			debounce,
			initial_query: self.search.initial_query.unwrap_or_default(),
			title,
			theme,
			theme_name,
			log_level,
		})
	}
}

fn redact(token: &str) -> String {
	let count = token.chars().count();
	if count <= 8 {
		return "********".to_string();
	}
	let suffix: String = token.chars().skip(count - 4).collect();
	format!("********{suffix}")
}
