use reqwest::Url;

use crate::error::FetchError;

/// Sort order requested for the default listing.
pub const DEFAULT_SORT: &str = "popularity.desc";

/// Catalog endpoint selected for a committed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
	/// `GET {base}/search/movie?query=...`
	Search { query: String },
	/// `GET {base}/discover/movie?sort_by=...`
	Discover { sort_by: String },
}

impl Endpoint {
	/// Pick the endpoint for a committed query.
	///
	/// Surrounding whitespace is trimmed. A blank query always resolves to the
	/// popularity listing, never to a search with an empty term.
	pub fn for_query(committed: &str) -> Self {
		let trimmed = committed.trim();
		if trimmed.is_empty() {
			Self::discover()
		} else {
			Self::Search {
				query: trimmed.to_string(),
			}
		}
	}

	/// The default popularity-sorted listing.
	pub fn discover() -> Self {
		Self::Discover {
			sort_by: DEFAULT_SORT.to_string(),
		}
	}

	pub fn is_search(&self) -> bool {
		matches!(self, Self::Search { .. })
	}

	fn segments(&self) -> [&'static str; 2] {
		match self {
			Self::Search { .. } => ["search", "movie"],
			Self::Discover { .. } => ["discover", "movie"],
		}
	}

	fn query_pair(&self) -> (&'static str, &str) {
		match self {
			Self::Search { query } => ("query", query.as_str()),
			Self::Discover { sort_by } => ("sort_by", sort_by.as_str()),
		}
	}

	/// Build the full request URL below `base`.
	///
	/// Path segments are appended to whatever path `base` already carries
	/// (for example `/3`), and the query parameter is percent-encoded.
	pub fn url(&self, base: &Url) -> Result<Url, FetchError> {
		let mut url = base.clone();
		url.set_query(None);
		url.path_segments_mut()
			.map_err(|()| FetchError::InvalidBase {
				base: base.to_string(),
			})?
			.pop_if_empty()
			.extend(self.segments());
		let (key, value) = self.query_pair();
		url.query_pairs_mut().append_pair(key, value);
		Ok(url)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn base() -> Url {
		Url::parse("https://api.themoviedb.org/3").expect("base url")
	}

	#[test]
	fn blank_queries_resolve_to_discover() {
		assert_eq!(Endpoint::for_query(""), Endpoint::discover());
		assert_eq!(Endpoint::for_query("   \t"), Endpoint::discover());
	}

	#[test]
	fn search_terms_are_trimmed() {
		assert_eq!(
			Endpoint::for_query("  batman "),
			Endpoint::Search {
				query: "batman".to_string()
			}
		);
	}

	#[test]
	fn discover_url_uses_popularity_sort() {
		let url = Endpoint::discover().url(&base()).expect("url");
		assert_eq!(
			url.as_str(),
			"https://api.themoviedb.org/3/discover/movie?sort_by=popularity.desc"
		);
	}

	#[test]
	fn search_url_encodes_the_query() {
		let url = Endpoint::for_query("fast & furious?")
			.url(&base())
			.expect("url");
		assert_eq!(url.path(), "/3/search/movie");
		let pairs: Vec<(String, String)> = url
			.query_pairs()
			.map(|(k, v)| (k.into_owned(), v.into_owned()))
			.collect();
		assert_eq!(pairs, vec![("query".to_string(), "fast & furious?".to_string())]);
		assert!(!url.as_str().contains("& "));
	}

	#[test]
	fn trailing_slash_on_base_is_tolerated() {
		let base = Url::parse("http://localhost:8080/api/").expect("base url");
		let url = Endpoint::discover().url(&base).expect("url");
		assert_eq!(url.path(), "/api/discover/movie");
	}

	#[test]
	fn cannot_be_a_base_urls_are_rejected() {
		let base = Url::parse("mailto:someone@example.com").expect("url");
		let err = Endpoint::discover().url(&base).unwrap_err();
		assert!(matches!(err, FetchError::InvalidBase { .. }));
	}
}
