//! Core crate exports for building and running the `cinefind` terminal interface.
//!
//! The root module re-exports the query controller and the UI entry points so
//! embedders can drive the search without digging through the module
//! hierarchy. The catalog client lives in the `cinefind-catalog` crate and is
//! re-exported as [`catalog`].

pub mod app_dirs;
pub mod logging;
pub mod query;
pub mod ui;

pub use cinefind_catalog as catalog;
pub use query::{DEFAULT_DEBOUNCE, FetchOutcome, FetchRequest, FetchState, QueryController};
pub use ui::{App, AppOptions, MovieSearch, QueryInput, SearchOutcome, Theme, run};
