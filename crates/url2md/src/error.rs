//! Error types for url2md

use thiserror::Error;

/// Errors raised by validation, fetching, or conversion
#[derive(Debug, Error)]
pub enum Error {
    /// Request body carried no URL (absent or empty)
    #[error("Please provide a valid URL to convert")]
    MissingUrl,

    /// Input could not be parsed as an absolute URL
    #[error("Please provide a valid URL (e.g., https://example.com)")]
    InvalidUrl(String),

    /// Upstream answered with a non-success status
    #[error("HTTP {status}: {status_text}")]
    UpstreamStatus { status: u16, status_text: String },

    /// Upstream content type does not contain "text/html"
    #[error("The URL returned {0}, but HTML content is required")]
    UnsupportedContentType(String),

    /// Upstream declared an empty body
    #[error("The URL did not return any content")]
    EmptyBody,

    /// The conversion engine failed
    #[error("Failed to convert HTML to Markdown: {0}")]
    Conversion(String),

    /// Failed to build the HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// Network-level failure (DNS, connect, read)
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),
}
