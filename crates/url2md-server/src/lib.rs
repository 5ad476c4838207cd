//! url2md-server - HTTP surface for the URL to Markdown converter
//!
//! Exposes two endpoints over the `url2md` library: a chunked streaming
//! conversion (`POST /api/convert`) and a buffered JSON conversion
//! (`POST /api/convert-simple`), plus a static landing page.

pub mod error;
pub mod handlers;
pub mod routes;

pub use routes::{create_router, AppState};
