//! The single-page web front end.
//!
//! `GET /` shows the empty form, `POST /analyze` takes a multipart form with
//! a `mode` field (`text` or `csv`) plus either `reviews` or `file`, and
//! `GET /health` answers `ok` once the classifier is loaded.

pub mod page;
pub mod routes;

pub use page::{DownloadLink, InputMode, PageView, ResultsView, Templates};
pub use routes::configure_routes;
