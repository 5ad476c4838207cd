//! url2md - fetch a URL and convert its HTML to Markdown
//!
//! This crate provides the library layer behind the url2md HTTP service:
//! URL validation, the upstream content fetcher, and a conversion adapter
//! that turns fetched HTML into Markdown either as a lazy chunk stream or
//! as a single buffered string.
//!
//! ## Conversion engine
//!
//! The HTML-to-Markdown capability itself sits behind the [`HtmlConverter`]
//! trait. The default engine ([`HtmdConverter`]) filters non-content
//! elements with CSS selectors, isolates main-content regions, and emits
//! Markdown via `htmd`. A different engine can be plugged in without
//! touching the orchestration layer.

pub mod client;
mod convert;
mod engine;
mod error;
mod options;
mod types;

pub use client::{fetch_html, HtmlPage};
pub use convert::ConvertAdapter;
pub use engine::{HtmdConverter, HtmlConverter};
pub use error::Error;
pub use options::ConvertOptions;
pub use types::{origin_url, Conversion, ConvertRequest};

/// Fixed identifying User-Agent sent with every upstream request
pub const USER_AGENT: &str = "url2md/1.0 (HTML to Markdown Converter)";
