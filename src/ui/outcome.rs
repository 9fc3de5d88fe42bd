use cinefind_catalog::Movie;

/// How the interactive session ended.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
	/// `false` when the user quit without picking a movie.
	pub accepted: bool,
	pub selection: Option<Movie>,
	/// Raw query text at the time the session ended.
	pub query: String,
}

impl SearchOutcome {
	pub fn cancelled(query: impl Into<String>) -> Self {
		Self {
			accepted: false,
			selection: None,
			query: query.into(),
		}
	}

	pub fn accepted(query: impl Into<String>, selection: Option<Movie>) -> Self {
		Self {
			accepted: true,
			selection,
			query: query.into(),
		}
	}
}
