use std::time::{Duration, Instant};

use cinefind_catalog::{Endpoint, FetchError, Movie};

use super::debounce::Debouncer;
use super::state::FetchState;

/// Quiet period after the last keystroke before a query is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// A fetch cycle the controller wants executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
	/// Monotonically increasing tag; only the latest id may update state.
	pub id: u64,
	/// Committed query exactly as typed.
	pub query: String,
	pub endpoint: Endpoint,
}

/// Completion of a [`FetchRequest`].
#[derive(Debug)]
pub struct FetchOutcome {
	pub id: u64,
	pub result: Result<Vec<Movie>, FetchError>,
}

/// Owns the raw query, the committed query, and the fetch state.
///
/// The controller performs no I/O and never reads the clock: callers pass
/// `now` in and execute the returned [`FetchRequest`]s themselves.
#[derive(Debug)]
pub struct QueryController {
	raw: String,
	committed: Option<String>,
	debounce: Debouncer<String>,
	state: FetchState,
	next_id: u64,
	current_id: Option<u64>,
}

impl QueryController {
	pub fn new(initial_query: impl Into<String>, interval: Duration) -> Self {
		Self {
			raw: initial_query.into(),
			committed: None,
			debounce: Debouncer::new(interval),
			state: FetchState::Idle,
			next_id: 0,
			current_id: None,
		}
	}

	/// Replace the raw query and restart the debounce timer.
	pub fn on_input_change(&mut self, text: impl Into<String>, now: Instant) {
		let text = text.into();
		self.raw.clone_from(&text);
		self.debounce.push(text, now);
	}

	/// Commit the pending text if the quiet period has elapsed.
	///
	/// Returns a request only when the committed value actually changes.
	pub fn poll(&mut self, now: Instant) -> Option<FetchRequest> {
		let text = self.debounce.poll(now)?;
		self.commit(text)
	}

	/// Commit the current raw query immediately, bypassing the timer.
	///
	/// Used for the initial listing shown on startup.
	pub fn commit_now(&mut self) -> Option<FetchRequest> {
		self.debounce.cancel();
		self.commit(self.raw.clone())
	}

	fn commit(&mut self, text: String) -> Option<FetchRequest> {
		if self.committed.as_deref() == Some(text.as_str()) {
			tracing::trace!(query = %text, "committed query unchanged");
			return None;
		}
		self.committed = Some(text.clone());
		Some(self.issue(text))
	}

	fn issue(&mut self, query: String) -> FetchRequest {
		self.next_id = self.next_id.saturating_add(1);
		let id = self.next_id;
		self.current_id = Some(id);
		self.state = FetchState::Loading;
		let endpoint = Endpoint::for_query(&query);
		tracing::debug!(id, query = %query, search = endpoint.is_search(), "issuing fetch");
		FetchRequest {
			id,
			query,
			endpoint,
		}
	}

	/// Apply a finished fetch if it belongs to the most recent request.
	///
	/// Returns `false` when the outcome was stale and has been dropped.
	pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
		let FetchOutcome { id, result } = outcome;
		if Some(id) != self.current_id {
			tracing::debug!(id, current = ?self.current_id, "dropping stale fetch outcome");
			return false;
		}
		match &result {
			Ok(movies) => tracing::debug!(id, count = movies.len(), "fetch completed"),
			Err(err) => tracing::warn!(id, error = %err, "fetch failed"),
		}
		self.state = FetchState::from_result(result);
		true
	}

	pub fn raw_query(&self) -> &str {
		&self.raw
	}

	pub fn committed_query(&self) -> Option<&str> {
		self.committed.as_deref()
	}

	pub fn state(&self) -> &FetchState {
		&self.state
	}

	/// Id of the request whose outcome is currently awaited or shown.
	pub fn current_request(&self) -> Option<u64> {
		self.current_id
	}

	/// When the pending keystrokes will be committed, if any are pending.
	pub fn next_deadline(&self) -> Option<Instant> {
		self.debounce.deadline()
	}
}

#[cfg(test)]
mod tests {
	use cinefind_catalog::GENERIC_FETCH_MESSAGE;

	use super::*;

	fn ms(value: u64) -> Duration {
		Duration::from_millis(value)
	}

	fn controller() -> QueryController {
		QueryController::new("", DEFAULT_DEBOUNCE)
	}

	fn ok(id: u64, movies: Vec<Movie>) -> FetchOutcome {
		FetchOutcome {
			id,
			result: Ok(movies),
		}
	}

	#[test]
	fn startup_commit_fetches_the_default_listing() {
		let mut controller = controller();
		let request = controller.commit_now().expect("initial request");

		assert_eq!(request.id, 1);
		assert_eq!(request.endpoint, Endpoint::discover());
		assert!(controller.state().is_loading());
		assert_eq!(controller.committed_query(), Some(""));
	}

	#[test]
	fn rapid_keystrokes_commit_once_with_the_last_value() {
		let t0 = Instant::now();
		let mut controller = controller();
		controller.commit_now();

		controller.on_input_change("b", t0);
		controller.on_input_change("ba", t0 + ms(150));
		controller.on_input_change("bat", t0 + ms(300));

		let mut requests = Vec::new();
		for step in 0..=30 {
			if let Some(request) = controller.poll(t0 + ms(step * 100)) {
				requests.push(request);
			}
		}

		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].query, "bat");
		assert_eq!(
			requests[0].endpoint,
			Endpoint::Search {
				query: "bat".to_string()
			}
		);
		assert_eq!(controller.committed_query(), Some("bat"));
	}

	#[test]
	fn commit_waits_for_the_full_quiet_period() {
		let t0 = Instant::now();
		let mut controller = controller();
		controller.on_input_change("alien", t0);

		assert_eq!(controller.poll(t0 + ms(999)), None);
		assert_eq!(controller.raw_query(), "alien");
		assert_eq!(controller.committed_query(), None);
		assert!(controller.poll(t0 + ms(1000)).is_some());
	}

	#[test]
	fn cleared_input_never_fetches_the_abandoned_term() {
		let t0 = Instant::now();
		let mut controller = controller();
		controller.commit_now();
		controller.apply(ok(1, vec![Movie::new(1, "Popular")]));

		for (offset, text) in ["b", "ba", "bat", "batm", "batma", "batman"].iter().enumerate() {
			controller.on_input_change(*text, t0 + ms(offset as u64 * 100));
		}
		controller.on_input_change("", t0 + ms(700));

		assert_eq!(controller.poll(t0 + ms(5000)), None);
		assert_eq!(controller.current_request(), Some(1));
	}

	#[test]
	fn clearing_a_committed_search_refetches_the_default_listing() {
		let t0 = Instant::now();
		let mut controller = controller();
		controller.commit_now();

		controller.on_input_change("batman", t0);
		let search = controller.poll(t0 + ms(1000)).expect("search");
		assert!(search.endpoint.is_search());

		controller.on_input_change("", t0 + ms(2000));
		let listing = controller.poll(t0 + ms(3000)).expect("listing");
		assert_eq!(listing.endpoint, Endpoint::discover());
		assert_eq!(listing.id, search.id + 1);
	}

	#[test]
	fn whitespace_only_commits_use_the_default_listing() {
		let t0 = Instant::now();
		let mut controller = controller();
		controller.on_input_change("   ", t0);

		let request = controller.poll(t0 + ms(1000)).expect("request");
		assert_eq!(request.query, "   ");
		assert_eq!(request.endpoint, Endpoint::discover());
	}

	#[test]
	fn stale_outcomes_never_overwrite_newer_state() {
		let t0 = Instant::now();
		let mut controller = controller();

		controller.on_input_change("alien", t0);
		let first = controller.poll(t0 + ms(1000)).expect("first");
		controller.on_input_change("aliens", t0 + ms(1100));
		let second = controller.poll(t0 + ms(2100)).expect("second");

		assert!(controller.apply(ok(second.id, vec![Movie::new(2, "Aliens")])));
		assert!(!controller.apply(ok(first.id, vec![Movie::new(1, "Alien")])));

		let titles: Vec<_> = controller
			.state()
			.results()
			.iter()
			.map(Movie::display_title)
			.collect();
		assert_eq!(titles, vec!["Aliens"]);
	}

	#[test]
	fn stale_outcome_arriving_first_keeps_loading() {
		let t0 = Instant::now();
		let mut controller = controller();

		controller.on_input_change("q1", t0);
		let first = controller.poll(t0 + ms(1000)).expect("first");
		controller.on_input_change("q2", t0 + ms(1100));
		controller.poll(t0 + ms(2100)).expect("second");

		assert!(!controller.apply(ok(first.id, vec![Movie::new(1, "Q1")])));
		assert!(controller.state().is_loading());
	}

	#[test]
	fn transport_failure_clears_results() {
		let mut controller = controller();
		let first = controller.commit_now().expect("first");
		controller.apply(ok(first.id, vec![Movie::new(1, "Kept?")]));

		let t0 = Instant::now();
		controller.on_input_change("x", t0);
		let second = controller.poll(t0 + ms(1000)).expect("second");
		controller.apply(FetchOutcome {
			id: second.id,
			result: Err(FetchError::Interrupted),
		});

		assert_eq!(controller.state().error_message(), Some(GENERIC_FETCH_MESSAGE));
		assert!(controller.state().results().is_empty());
	}

	#[test]
	fn application_failure_surfaces_the_catalog_message() {
		let mut controller = controller();
		let request = controller.commit_now().expect("request");
		controller.apply(FetchOutcome {
			id: request.id,
			result: Err(FetchError::Application {
				message: Some("Invalid API key".to_string()),
			}),
		});

		assert_eq!(
			controller.state(),
			&FetchState::Error("Invalid API key".to_string())
		);
	}

	#[test]
	fn retyping_the_committed_value_does_not_refetch() {
		let t0 = Instant::now();
		let mut controller = controller();
		controller.on_input_change("heat", t0);
		controller.poll(t0 + ms(1000)).expect("first");

		controller.on_input_change("heatx", t0 + ms(1500));
		controller.on_input_change("heat", t0 + ms(1600));

		assert_eq!(controller.poll(t0 + ms(3000)), None);
		assert_eq!(controller.current_request(), Some(1));
	}

	#[test]
	fn initial_query_is_used_for_the_first_commit() {
		let mut controller = QueryController::new("dune", DEFAULT_DEBOUNCE);
		let request = controller.commit_now().expect("request");
		assert_eq!(
			request.endpoint,
			Endpoint::Search {
				query: "dune".to_string()
			}
		);
		assert_eq!(controller.next_deadline(), None);
	}
}
