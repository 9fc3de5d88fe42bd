//! Debounced query handling and the fetch lifecycle.
//!
//! [`QueryController`] is a pure state machine driven by explicit
//! timestamps: keystrokes push the raw text into a [`Debouncer`], polling
//! commits the text once input has been quiet, and each change of the
//! committed value yields exactly one [`FetchRequest`]. Requests are executed
//! by a background worker owned by [`FetchRuntime`](runtime::FetchRuntime) and
//! come back as [`FetchOutcome`]s tagged with their request id, so results of
//! superseded queries can be discarded.

mod controller;
mod debounce;
pub(crate) mod runtime;
mod state;
mod worker;

pub use controller::{DEFAULT_DEBOUNCE, FetchOutcome, FetchRequest, QueryController};
pub use debounce::Debouncer;
pub use state::FetchState;
