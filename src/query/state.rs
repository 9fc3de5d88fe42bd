use cinefind_catalog::{FetchError, Movie};

/// What the results area should show.
///
/// Exactly one variant is active and the whole value is replaced on every
/// transition, so an error never coexists with stale results.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
	/// No request has been issued yet.
	#[default]
	Idle,
	Loading,
	Error(String),
	Loaded(Vec<Movie>),
}

impl FetchState {
	/// Map a finished request onto the state shown to the user.
	pub fn from_result(result: Result<Vec<Movie>, FetchError>) -> Self {
		match result {
			Ok(movies) => Self::Loaded(movies),
			Err(err) => Self::Error(err.user_message()),
		}
	}

	pub fn is_loading(&self) -> bool {
		matches!(self, Self::Loading)
	}

	pub fn error_message(&self) -> Option<&str> {
		match self {
			Self::Error(message) => Some(message),
			_ => None,
		}
	}

	/// Loaded rows, or an empty slice in every other state.
	pub fn results(&self) -> &[Movie] {
		match self {
			Self::Loaded(movies) => movies,
			_ => &[],
		}
	}
}
