//! File-backed `tracing` setup.
//!
//! The terminal belongs to the UI while a session runs, so log output goes to
//! `cinefind.log` in the data directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::app_dirs;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "CINEFIND_LOG";

const LOG_FILE_NAME: &str = "cinefind.log";

/// Install the global subscriber and return the log file path.
///
/// `level` is any `EnvFilter` directive, e.g. `info` or `cinefind=debug`.
pub fn initialize(level: &str) -> Result<PathBuf> {
	let dir = app_dirs::get_data_dir()?;
	fs::create_dir_all(&dir)
		.with_context(|| format!("failed to create log directory {}", dir.display()))?;
	let path = dir.join(LOG_FILE_NAME);
	let file = OpenOptions::new()
		.create(true)
		.append(true)
		.open(&path)
		.with_context(|| format!("failed to open log file {}", path.display()))?;

	let filter = match EnvFilter::try_from_env(LOG_ENV) {
		Ok(filter) => filter,
		Err(_) => EnvFilter::try_new(level)
			.with_context(|| format!("invalid log filter '{level}'"))?,
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(Mutex::new(file))
		.with_ansi(false)
		.with_target(true)
		.try_init()
		.map_err(|err| anyhow!("failed to install log subscriber: {err}"))?;

	Ok(path)
}
