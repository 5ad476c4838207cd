//! Core types for url2md

use crate::error::Error;
use serde::{Deserialize, Serialize};
use url::Url;

/// Request body accepted by both conversion endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertRequest {
    /// The URL to fetch and convert (absent fields deserialize as empty)
    #[serde(default)]
    pub url: String,
}

impl ConvertRequest {
    /// Create a request for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Validate the raw input as an absolute URL
    ///
    /// Any scheme a standard URL parser accepts passes validation; non-HTTP
    /// targets are allowed through here and fail later at fetch time. This
    /// permissiveness is intentional.
    pub fn validate(&self) -> Result<Url, Error> {
        if self.url.is_empty() {
            return Err(Error::MissingUrl);
        }
        Url::parse(&self.url).map_err(|e| Error::InvalidUrl(e.to_string()))
    }
}

/// Derive the origin (scheme + host + port) of a validated URL
///
/// Used as the base for resolving relative references during conversion.
/// Returns `None` for URLs with an opaque origin (e.g. `data:` URLs).
pub fn origin_url(url: &Url) -> Option<Url> {
    let origin = url.origin();
    if !origin.is_tuple() {
        return None;
    }
    Url::parse(&origin.ascii_serialization()).ok()
}

/// Buffered conversion result returned by `/api/convert-simple`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    /// Always true on the success path
    pub success: bool,
    /// The original input URL, echoed back
    pub url: String,
    /// The full Markdown text
    pub markdown: String,
    /// Content type observed on the upstream response
    pub content_type: String,
    /// ISO-8601 completion timestamp
    pub timestamp: String,
}
