//! Upstream content fetcher

use crate::error::Error;
use crate::USER_AGENT;
use bytes::Bytes;
use futures::Stream;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT as USER_AGENT_HEADER};
use url::Url;

/// A fetched upstream page verified to carry HTML
///
/// Wraps the live response so the body can be consumed exactly once,
/// either incrementally ([`into_bytes_stream`](Self::into_bytes_stream))
/// or in full ([`text`](Self::text)).
#[derive(Debug)]
pub struct HtmlPage {
    content_type: String,
    response: reqwest::Response,
}

impl HtmlPage {
    /// Content type declared by the upstream response
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Whether the upstream declared a non-empty body
    ///
    /// Only consulted on the streaming path, where an empty body must be
    /// rejected before the response starts.
    pub fn has_declared_body(&self) -> bool {
        self.response.content_length() != Some(0)
    }

    /// Consume the page as an HTML byte stream
    pub fn into_bytes_stream(self) -> impl Stream<Item = Result<Bytes, reqwest::Error>> {
        self.response.bytes_stream()
    }

    /// Consume the page as a complete HTML string
    pub async fn text(self) -> Result<String, Error> {
        self.response.text().await.map_err(Error::Transport)
    }
}

/// Fetch a validated URL and verify the response carries HTML
///
/// Issues a single GET with the fixed identifying User-Agent. No retries;
/// timeouts are whatever the transport defaults to.
///
/// - network-level failure maps to [`Error::Transport`]
/// - a non-success status maps to [`Error::UpstreamStatus`]
/// - a content type without `text/html` (absent treated as empty) maps to
///   [`Error::UnsupportedContentType`]
pub async fn fetch_html(url: &Url) -> Result<HtmlPage, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT_HEADER,
        HeaderValue::from_str(USER_AGENT).unwrap_or_else(|_| HeaderValue::from_static("url2md")),
    );

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(Error::ClientBuild)?;

    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(Error::Transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::UpstreamStatus {
            status: status.as_u16(),
            status_text: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
        });
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if !content_type.contains("text/html") {
        return Err(Error::UnsupportedContentType(content_type));
    }

    Ok(HtmlPage {
        content_type,
        response,
    })
}
