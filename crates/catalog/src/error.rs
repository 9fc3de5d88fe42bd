use reqwest::StatusCode;
use thiserror::Error;

/// Message shown for every transport, status, or decoding failure.
pub const GENERIC_FETCH_MESSAGE: &str = "Error fetching movies. Please try again later.";

/// Message shown when the catalog flags a failure without explaining it.
pub const APPLICATION_FALLBACK_MESSAGE: &str = "Failed to fetch movies";

/// Errors produced while fetching a page of movies.
#[derive(Debug, Error)]
pub enum FetchError {
	/// The request never produced a response (DNS, connect, TLS, timeout, body read).
	#[error("request to the movie catalog failed: {0}")]
	Transport(#[from] reqwest::Error),

	/// The catalog answered with a non-success status code.
	#[error("movie catalog responded with status {status}")]
	Status { status: StatusCode },

	/// The body was not the JSON object we expect.
	#[error("failed to decode movie catalog response: {0}")]
	Decode(#[from] serde_json::Error),

	/// The configured base URL cannot have endpoint paths appended to it.
	#[error("base URL '{base}' cannot be used to build catalog endpoints")]
	InvalidBase { base: String },

	/// The request was dropped before a response could be delivered.
	#[error("movie request was interrupted before completing")]
	Interrupted,

	/// The catalog returned a body that explicitly reports failure.
	#[error("movie catalog reported a failure: {}", .message.as_deref().unwrap_or(APPLICATION_FALLBACK_MESSAGE))]
	Application { message: Option<String> },
}

impl FetchError {
	/// Text suitable for the single error line in the interface.
	///
	/// Only application failures surface their own wording; everything else
	/// collapses to the generic retry-later message.
	pub fn user_message(&self) -> String {
		match self {
			Self::Application { message } => message
				.as_deref()
				.filter(|message| !message.is_empty())
				.unwrap_or(APPLICATION_FALLBACK_MESSAGE)
				.to_string(),
			_ => GENERIC_FETCH_MESSAGE.to_string(),
		}
	}

	pub fn is_application(&self) -> bool {
		matches!(self, Self::Application { .. })
	}
}
