use anyhow::Result;
use cinefind::SearchOutcome;
use cinefind::catalog::Movie;
use serde_json::json;

/// Print a plain-text representation of the search outcome.
pub(crate) fn print_plain(outcome: &SearchOutcome) {
	if !outcome.accepted {
		println!("Search cancelled (query: '{}')", outcome.query);
		return;
	}

	match &outcome.selection {
		Some(movie) => println!("{}", plain_line(movie)),
		None => println!("No selection"),
	}
}

fn plain_line(movie: &Movie) -> String {
	let mut line = movie.display_title().to_string();
	if let Some(year) = movie.release_year() {
		line.push_str(&format!(" ({year})"));
	}
	if let Some(id) = movie.id {
		line.push_str(&format!("\t{id}"));
	}
	line
}

/// Format the search outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &SearchOutcome) -> Result<String> {
	let selection = match &outcome.selection {
		Some(movie) => serde_json::to_value(movie)?,
		None => serde_json::Value::Null,
	};

	let payload = json!({
		"accepted": outcome.accepted,
		"query": outcome.query,
		"selection": selection,
	});

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the search outcome.
pub(crate) fn print_json(outcome: &SearchOutcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}
