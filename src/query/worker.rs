use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use cinefind_catalog::{FetchError, MovieSource};

use super::controller::{FetchOutcome, FetchRequest};

/// Messages understood by the fetch worker.
#[derive(Debug)]
pub(crate) enum FetchCommand {
	Fetch(FetchRequest),
	Shutdown,
}

/// Launch the background dispatcher thread and return its channels.
///
/// The shared counter holds the id of the most recently dispatched request;
/// queued requests older than it are skipped without touching the network.
/// Every other request runs on its own thread, so a slow stale fetch never
/// holds back a newer one.
pub(crate) fn spawn(
	source: Arc<dyn MovieSource>,
) -> (Sender<FetchCommand>, Receiver<FetchOutcome>, Arc<AtomicU64>) {
	let (command_tx, command_rx) = mpsc::channel();
	let (outcome_tx, outcome_rx) = mpsc::channel();
	let latest_request_id = Arc::new(AtomicU64::new(0));
	let thread_latest = Arc::clone(&latest_request_id);

	let spawned = thread::Builder::new()
		.name("cinefind-fetch".into())
		.spawn(move || worker_loop(&source, command_rx, outcome_tx, &thread_latest));
	if let Err(err) = spawned {
		tracing::error!(error = %err, "failed to spawn fetch worker");
	}

	(command_tx, outcome_rx, latest_request_id)
}

fn worker_loop(
	source: &Arc<dyn MovieSource>,
	command_rx: Receiver<FetchCommand>,
	outcome_tx: Sender<FetchOutcome>,
	latest_request_id: &AtomicU64,
) {
	while let Ok(command) = command_rx.recv() {
		if !handle_command(source, &outcome_tx, latest_request_id, command) {
			break;
		}
	}
	tracing::debug!("fetch worker stopped");
}

fn handle_command(
	source: &Arc<dyn MovieSource>,
	outcome_tx: &Sender<FetchOutcome>,
	latest_request_id: &AtomicU64,
	command: FetchCommand,
) -> bool {
	match command {
		FetchCommand::Fetch(request) => {
			let latest = latest_request_id.load(Ordering::Acquire);
			if request.id < latest {
				tracing::debug!(id = request.id, latest, "skipping superseded request");
				return true;
			}
			start_fetch(Arc::clone(source), outcome_tx.clone(), request);
			true
		}
		FetchCommand::Shutdown => false,
	}
}

fn start_fetch(
	source: Arc<dyn MovieSource>,
	outcome_tx: Sender<FetchOutcome>,
	request: FetchRequest,
) {
	let id = request.id;
	let fallback_tx = outcome_tx.clone();
	let spawned = thread::Builder::new()
		.name(format!("cinefind-fetch-{id}"))
		.spawn(move || {
			let result = source.fetch(&request.endpoint);
			// The receiver may be gone once the UI has exited.
			let _ = outcome_tx.send(FetchOutcome { id, result });
		});
	if let Err(err) = spawned {
		tracing::error!(id, error = %err, "failed to spawn fetch thread");
		let _ = fallback_tx.send(FetchOutcome {
			id,
			result: Err(FetchError::Interrupted),
		});
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Mutex;
	use std::time::Duration;

	use cinefind_catalog::{Endpoint, Movie};

	use super::*;

	/// Answers every request with one movie named after the endpoint, after
	/// waiting for a go signal.
	struct GatedSource {
		gate: Mutex<Receiver<()>>,
		seen: Mutex<Vec<Endpoint>>,
	}

	impl MovieSource for GatedSource {
		fn fetch(&self, endpoint: &Endpoint) -> Result<Vec<Movie>, FetchError> {
			self.gate
				.lock()
				.expect("gate lock")
				.recv()
				.map_err(|_| FetchError::Interrupted)?;
			self.seen.lock().expect("seen lock").push(endpoint.clone());
			let title = match endpoint {
				Endpoint::Search { query } => query.clone(),
				Endpoint::Discover { .. } => "popular".to_string(),
			};
			Ok(vec![Movie::new(1, title)])
		}
	}

	fn request(id: u64, query: &str) -> FetchRequest {
		FetchRequest {
			id,
			query: query.to_string(),
			endpoint: Endpoint::for_query(query),
		}
	}

	#[test]
	fn shutdown_command_stops_worker() {
		let (_gate_tx, gate_rx) = mpsc::channel();
		let source = Arc::new(GatedSource {
			gate: Mutex::new(gate_rx),
			seen: Mutex::new(Vec::new()),
		});
		let (tx, rx, latest) = spawn(source);
		assert_eq!(latest.load(Ordering::Relaxed), 0);
		tx.send(FetchCommand::Shutdown).expect("send shutdown");
		assert!(matches!(
			rx.recv_timeout(Duration::from_secs(1)),
			Err(mpsc::RecvTimeoutError::Disconnected)
		));
	}

	#[test]
	fn superseded_requests_are_skipped() {
		let (gate_tx, gate_rx) = mpsc::channel();
		let source = Arc::new(GatedSource {
			gate: Mutex::new(gate_rx),
			seen: Mutex::new(Vec::new()),
		});
		let (tx, rx, latest) = spawn(Arc::clone(&source) as Arc<dyn MovieSource>);

		latest.store(3, Ordering::Release);
		tx.send(FetchCommand::Fetch(request(1, "q1"))).expect("send");
		tx.send(FetchCommand::Fetch(request(2, "q2"))).expect("send");
		tx.send(FetchCommand::Fetch(request(3, "q3"))).expect("send");
		gate_tx.send(()).expect("release fetch");

		let outcome = rx.recv_timeout(Duration::from_secs(2)).expect("outcome");
		tx.send(FetchCommand::Shutdown).expect("send shutdown");

		assert_eq!(outcome.id, 3);
		assert_eq!(outcome.result.expect("movies")[0].display_title(), "q3");
		assert_eq!(
			rx.recv_timeout(Duration::from_secs(1)).map(|outcome| outcome.id).ok(),
			None
		);
		let seen = source.seen.lock().expect("seen lock");
		assert_eq!(*seen, vec![Endpoint::for_query("q3")]);
	}

	/// Blocks fetches for `q1` until released; answers everything else at once.
	struct StalledFirstQuery {
		release: Mutex<Receiver<()>>,
	}

	impl MovieSource for StalledFirstQuery {
		fn fetch(&self, endpoint: &Endpoint) -> Result<Vec<Movie>, FetchError> {
			if *endpoint == Endpoint::for_query("q1") {
				self.release
					.lock()
					.expect("release lock")
					.recv()
					.map_err(|_| FetchError::Interrupted)?;
			}
			Ok(vec![Movie::new(1, format!("{endpoint:?}"))])
		}
	}

	#[test]
	fn newer_request_completes_while_an_older_one_is_in_flight() {
		let (release_tx, release_rx) = mpsc::channel();
		let source = Arc::new(StalledFirstQuery {
			release: Mutex::new(release_rx),
		});
		let (tx, rx, _latest) = spawn(source);

		tx.send(FetchCommand::Fetch(request(1, "q1"))).expect("send");
		tx.send(FetchCommand::Fetch(request(2, "q2"))).expect("send");

		let first = rx.recv_timeout(Duration::from_secs(1)).expect("q2 outcome");
		assert_eq!(first.id, 2);

		release_tx.send(()).expect("release q1");
		let late = rx.recv_timeout(Duration::from_secs(2)).expect("q1 outcome");
		assert_eq!(late.id, 1);
		tx.send(FetchCommand::Shutdown).expect("send shutdown");
	}
}
