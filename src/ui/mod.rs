//! Interactive terminal UI for `cinefind`.
//!
//! The [`builder`] module exposes [`MovieSearch`], the public entry point. The
//! remaining submodules implement the event loop, key handling, rendering,
//! and the query input widget. All search behaviour is delegated to the
//! [`QueryController`](crate::query::QueryController); the UI only forwards
//! keystrokes to it and draws whatever [`FetchState`](crate::query::FetchState)
//! it reports.

mod actions;
mod builder;
pub mod input;
mod outcome;
mod render;
mod runtime;
mod state;
pub mod theme;


pub use builder::MovieSearch;
pub use input::QueryInput;
pub use outcome::SearchOutcome;
pub use runtime::run;
pub use state::{App, AppOptions};
pub use theme::Theme;
