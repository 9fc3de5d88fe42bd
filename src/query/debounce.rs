use std::time::{Duration, Instant};

/// Holds back a value until input has been quiet for `interval`.
///
/// Every [`push`](Self::push) replaces the pending value and moves the
/// deadline forward, so at most one value is pending and a superseded value is
/// never released.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
	interval: Duration,
	pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
	pub fn new(interval: Duration) -> Self {
		Self {
			interval,
			pending: None,
		}
	}

	/// Replace the pending value and restart the quiet period at `now`.
	pub fn push(&mut self, value: T, now: Instant) {
		self.pending = Some((value, now + self.interval));
	}

	/// Release the pending value once its deadline has been reached.
	pub fn poll(&mut self, now: Instant) -> Option<T> {
		match &self.pending {
			Some((_, deadline)) if now >= *deadline => {
				self.pending.take().map(|(value, _)| value)
			}
			_ => None,
		}
	}

	pub fn deadline(&self) -> Option<Instant> {
		self.pending.as_ref().map(|(_, deadline)| *deadline)
	}

	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	pub fn cancel(&mut self) {
		self.pending = None;
	}
}
