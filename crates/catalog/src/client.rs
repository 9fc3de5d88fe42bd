use std::time::Duration;

use reqwest::Url;
use reqwest::header::ACCEPT;

use crate::endpoint::Endpoint;
use crate::error::FetchError;
use crate::movie::Movie;
use crate::page::CatalogPage;

/// Root of the public TMDB v3 API.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Anything able to answer a catalog request.
///
/// Implementations block until the request completes; callers run them on a
/// worker thread.
pub trait MovieSource: Send + Sync {
	fn fetch(&self, endpoint: &Endpoint) -> Result<Vec<Movie>, FetchError>;
}

/// Settings for [`CatalogClient`], read once at startup.
#[derive(Clone)]
pub struct ClientOptions {
	pub base_url: Url,
	pub token: String,
	pub timeout: Duration,
}

impl ClientOptions {
	pub fn new(base_url: Url, token: impl Into<String>) -> Self {
		Self {
			base_url,
			token: token.into(),
			timeout: Duration::from_secs(10),
		}
	}

	#[must_use]
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}
}

/// Blocking HTTP client for a TMDB-compatible catalog.
pub struct CatalogClient {
	http: reqwest::blocking::Client,
	base_url: Url,
	token: String,
}

impl CatalogClient {
	pub fn new(options: ClientOptions) -> Result<Self, FetchError> {
		let ClientOptions {
			base_url,
			token,
			timeout,
		} = options;
		if base_url.cannot_be_a_base() {
			return Err(FetchError::InvalidBase {
				base: base_url.to_string(),
			});
		}
		let http = reqwest::blocking::Client::builder()
			.timeout(timeout)
			.user_agent(concat!("cinefind/", env!("CARGO_PKG_VERSION")))
			.build()?;
		Ok(Self {
			http,
			base_url,
			token,
		})
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}
}

impl MovieSource for CatalogClient {
	fn fetch(&self, endpoint: &Endpoint) -> Result<Vec<Movie>, FetchError> {
		let url = endpoint.url(&self.base_url)?;
		tracing::debug!(url = %url, "requesting movie catalog");

		let response = self
			.http
			.get(url)
			.bearer_auth(&self.token)
			.header(ACCEPT, "application/json")
			.send()?;

		let status = response.status();
		if !status.is_success() {
			return Err(FetchError::Status { status });
		}

		let body = response.bytes()?;
		CatalogPage::from_slice(&body)?.into_results()
	}
}
