use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use cinefind_catalog::{FetchError, MovieSource};

use super::controller::{FetchOutcome, FetchRequest};
use super::worker::{self, FetchCommand};

/// UI-side handle on the fetch worker.
pub(crate) struct FetchRuntime {
	tx: Sender<FetchCommand>,
	rx: Receiver<FetchOutcome>,
	latest_request_id: Arc<AtomicU64>,
}

impl FetchRuntime {
	pub(crate) fn spawn(source: Arc<dyn MovieSource>) -> Self {
		let (tx, rx, latest_request_id) = worker::spawn(source);
		Self {
			tx,
			rx,
			latest_request_id,
		}
	}

	/// Hand a request to the worker.
	///
	/// If the worker is gone the request is answered immediately with an
	/// interrupted outcome so the caller never waits on it forever.
	pub(crate) fn dispatch(&self, request: FetchRequest) -> Result<(), FetchOutcome> {
		let id = request.id;
		self.latest_request_id.store(id, Ordering::Release);
		self.tx
			.send(FetchCommand::Fetch(request))
			.map_err(|_| {
				tracing::error!(id, "fetch worker is not running");
				FetchOutcome {
					id,
					result: Err(FetchError::Interrupted),
				}
			})
	}

	pub(crate) fn try_recv(&self) -> Result<FetchOutcome, TryRecvError> {
		self.rx.try_recv()
	}

	#[cfg(test)]
	pub(crate) fn recv_timeout(
		&self,
		timeout: std::time::Duration,
	) -> Result<FetchOutcome, std::sync::mpsc::RecvTimeoutError> {
		self.rx.recv_timeout(timeout)
	}

	pub(crate) fn shutdown(&self) {
		let _ = self.tx.send(FetchCommand::Shutdown);
	}
}

impl Drop for FetchRuntime {
	fn drop(&mut self) {
		self.shutdown();
	}
}
