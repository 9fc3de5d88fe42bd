//! Client and data types for the movie catalog consumed by `cinefind`.
//!
//! The crate picks an [`Endpoint`] for a committed query, performs the request
//! through a [`MovieSource`], and turns the JSON body into a list of [`Movie`]
//! rows or a [`FetchError`]. The terminal application only ever talks to the
//! catalog through the [`MovieSource`] trait so tests can substitute canned
//! responses.

mod client;
mod endpoint;
mod error;
mod movie;
mod page;

pub use client::{CatalogClient, ClientOptions, DEFAULT_BASE_URL, MovieSource};
pub use endpoint::{DEFAULT_SORT, Endpoint};
pub use error::{APPLICATION_FALLBACK_MESSAGE, FetchError, GENERIC_FETCH_MESSAGE};
pub use movie::{DEFAULT_IMAGE_BASE_URL, Movie, poster_url};
pub use page::CatalogPage;
pub use reqwest::Url;
