use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Image host prefix used to turn a `poster_path` into a full URL.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// A single result row as returned by the catalog.
///
/// Only the fields the interface displays are typed, and all of them are
/// optional. Everything else the API sends is kept in `extra`, including a
/// known field whose value has an unexpected type, so a record serialises
/// back out unchanged and never fails to decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Movie {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub poster_path: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub vote_average: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub release_date: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub original_language: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub overview: Option<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Movie {
	/// Convenience constructor used by tests and embedders.
	pub fn new(id: u64, title: impl Into<String>) -> Self {
		Self {
			id: Some(id),
			title: Some(title.into()),
			..Self::default()
		}
	}

	#[must_use]
	pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
		self.release_date = Some(date.into());
		self
	}

	#[must_use]
	pub fn with_rating(mut self, rating: f64) -> Self {
		self.vote_average = Some(rating);
		self
	}

	/// Title to display, falling back to a placeholder for untitled records.
	pub fn display_title(&self) -> &str {
		self.title
			.as_deref()
			.map(str::trim)
			.filter(|title| !title.is_empty())
			.unwrap_or("Untitled")
	}

	/// The four digit year prefix of `release_date`, when one is present.
	pub fn release_year(&self) -> Option<&str> {
		let date = self.release_date.as_deref()?.trim();
		let year = date.get(..4)?;
		year.chars().all(|c| c.is_ascii_digit()).then_some(year)
	}

	/// Rating rounded to one decimal place, or `N/A` when the catalog has none.
	pub fn rating_label(&self) -> String {
		match self.vote_average {
			Some(rating) if rating > 0.0 => format!("{rating:.1}"),
			_ => "N/A".to_string(),
		}
	}

	/// Upper-cased language code, or `-` when missing.
	pub fn language_label(&self) -> String {
		self.original_language
			.as_deref()
			.map(str::trim)
			.filter(|lang| !lang.is_empty())
			.map(str::to_uppercase)
			.unwrap_or_else(|| "-".to_string())
	}
}

impl From<Value> for Movie {
	fn from(value: Value) -> Self {
		let Value::Object(mut fields) = value else {
			return Self::default();
		};
		Self {
			id: take(&mut fields, "id", Value::as_u64),
			title: take(&mut fields, "title", owned_str),
			poster_path: take(&mut fields, "poster_path", owned_str),
			vote_average: take(&mut fields, "vote_average", Value::as_f64),
			release_date: take(&mut fields, "release_date", owned_str),
			original_language: take(&mut fields, "original_language", owned_str),
			overview: take(&mut fields, "overview", owned_str),
			extra: fields,
		}
	}
}

/// Move `key` out of `fields` when `convert` accepts it. Nulls are dropped;
/// values of any other shape stay behind in `fields`.
fn take<T>(
	fields: &mut Map<String, Value>,
	key: &str,
	convert: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
	let value = fields.get(key)?;
	if value.is_null() {
		fields.remove(key);
		return None;
	}
	let converted = convert(value)?;
	fields.remove(key);
	Some(converted)
}

fn owned_str(value: &Value) -> Option<String> {
	value.as_str().map(str::to_string)
}

/// Join the image host and a poster path into a full URL.
///
/// Returns `None` when the movie has no poster.
pub fn poster_url(image_base_url: &str, poster_path: Option<&str>) -> Option<String> {
	let path = poster_path.map(str::trim).filter(|path| !path.is_empty())?;
	let base = image_base_url.trim_end_matches('/');
	if path.starts_with('/') {
		Some(format!("{base}{path}"))
	} else {
		Some(format!("{base}/{path}"))
	}
}
