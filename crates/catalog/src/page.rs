use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;
use crate::movie::Movie;

/// Decoded body of a search or discover response.
///
/// Besides the `results` array the catalog may flag an application failure
/// with HTTP 200, either as `{"response": "False", "Error": "..."}` or as
/// `{"success": false, "status_message": "..."}`. Every field is held as raw
/// JSON so the failure flag is read before any result row is interpreted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogPage {
	#[serde(default)]
	results: Option<Value>,
	#[serde(default)]
	response: Option<Value>,
	#[serde(default, rename = "Error")]
	error: Option<Value>,
	#[serde(default)]
	success: Option<Value>,
	#[serde(default)]
	status_message: Option<Value>,
}

impl CatalogPage {
	pub fn from_slice(body: &[u8]) -> Result<Self, FetchError> {
		Ok(serde_json::from_slice(body)?)
	}

	/// Whether the body carries an explicit false-response flag.
	pub fn signals_failure(&self) -> bool {
		is_false(self.response.as_ref()) || is_false(self.success.as_ref())
	}

	/// Apply the failure check and hand back the result rows.
	///
	/// A missing `results` field is treated as an empty listing. Rows are
	/// passed through as they come; see [`Movie`] for how odd fields are kept.
	pub fn into_results(self) -> Result<Vec<Movie>, FetchError> {
		if self.signals_failure() {
			let message = text(self.error).or_else(|| text(self.status_message));
			return Err(FetchError::Application { message });
		}
		let rows: Vec<Value> = match self.results {
			None | Some(Value::Null) => return Ok(Vec::new()),
			Some(results) => serde_json::from_value(results)?,
		};
		Ok(rows.into_iter().map(Movie::from).collect())
	}
}

fn is_false(flag: Option<&Value>) -> bool {
	match flag {
		Some(Value::Bool(false)) => true,
		Some(Value::String(flag)) => flag.eq_ignore_ascii_case("false"),
		_ => false,
	}
}

fn text(value: Option<Value>) -> Option<String> {
	match value? {
		Value::String(text) => Some(text),
		Value::Null => None,
		other => Some(other.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn decode(body: &str) -> Result<Vec<Movie>, FetchError> {
		CatalogPage::from_slice(body.as_bytes())?.into_results()
	}

	#[test]
	fn results_keep_their_order() {
		let movies = decode(r#"{"results":[{"id":1,"title":"A"},{"id":2,"title":"B"}]}"#)
			.expect("results");
		let ids: Vec<_> = movies.iter().map(|movie| movie.id).collect();
		assert_eq!(ids, vec![Some(1), Some(2)]);
	}

	#[test]
	fn false_response_flag_is_an_application_error() {
		let err = decode(r#"{"response":"False","Error":"Invalid API key"}"#).unwrap_err();
		assert!(err.is_application());
		assert_eq!(err.user_message(), "Invalid API key");
	}

	#[test]
	fn false_flag_without_message_uses_fallback() {
		let err = decode(r#"{"response":false}"#).unwrap_err();
		assert_eq!(err.user_message(), crate::APPLICATION_FALLBACK_MESSAGE);
	}

	#[test]
	fn success_false_uses_status_message() {
		let err = decode(r#"{"success":false,"status_code":7,"status_message":"Invalid API key: You must be granted a valid key."}"#)
			.unwrap_err();
		assert_eq!(
			err.user_message(),
			"Invalid API key: You must be granted a valid key."
		);
	}

	#[test]
	fn true_response_flag_is_not_a_failure() {
		let movies = decode(r#"{"response":"True","results":[{"id":3}]}"#).expect("results");
		assert_eq!(movies.len(), 1);
	}

	#[test]
	fn missing_results_default_to_empty() {
		assert!(decode(r#"{"page":1}"#).expect("results").is_empty());
		assert!(decode(r#"{"results":null}"#).expect("results").is_empty());
	}

	#[test]
	fn false_flag_wins_over_unusable_results() {
		let err = decode(r#"{"response":"False","Error":"Invalid API key","results":"n/a"}"#)
			.unwrap_err();
		assert!(err.is_application());
		assert_eq!(err.user_message(), "Invalid API key");
	}

	#[test]
	fn mistyped_item_fields_do_not_fail_the_page() {
		let movies = decode(
			r#"{"results":[{"id":1,"title":"A","vote_average":"high"},{"id":"two","title":"B"}]}"#,
		)
		.expect("results");
		assert_eq!(movies.len(), 2);
		assert_eq!(movies[0].vote_average, None);
		assert_eq!(movies[0].extra.get("vote_average"), Some(&Value::from("high")));
		assert_eq!(movies[1].id, None);
		assert_eq!(movies[1].display_title(), "B");
	}

	#[test]
	fn non_array_results_without_a_failure_flag_are_decode_errors() {
		let err = decode(r#"{"results":"n/a"}"#).unwrap_err();
		assert!(matches!(err, FetchError::Decode(_)));
	}

	#[test]
	fn non_json_bodies_are_decode_errors() {
		let err = decode("<html>gateway</html>").unwrap_err();
		assert!(matches!(err, FetchError::Decode(_)));
		assert_eq!(err.user_message(), crate::GENERIC_FETCH_MESSAGE);
	}
}
