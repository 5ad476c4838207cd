//! Conversion adapter: streaming and buffered entry points
//!
//! Wraps the engine behind the two shapes the service needs. Both entry
//! points share one fixed configuration built at process start; nothing is
//! cached or memoized between calls.

use crate::engine::{HtmdConverter, HtmlConverter};
use crate::error::Error;
use crate::options::ConvertOptions;
use bytes::Bytes;
use futures::{future, stream, Stream, StreamExt};
use std::sync::Arc;
use url::Url;

/// Upper bound on the size of one emitted Markdown chunk
const STREAM_CHUNK_BYTES: usize = 8 * 1024;

/// Adapter pairing a conversion engine with its fixed configuration
#[derive(Clone)]
pub struct ConvertAdapter {
    engine: Arc<dyn HtmlConverter>,
    options: ConvertOptions,
}

impl Default for ConvertAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertAdapter {
    /// Adapter with the default engine and service configuration
    pub fn new() -> Self {
        Self::with_engine(Arc::new(HtmdConverter::new()), ConvertOptions::default())
    }

    /// Adapter with a custom engine (seam for substituting the capability)
    pub fn with_engine(engine: Arc<dyn HtmlConverter>, options: ConvertOptions) -> Self {
        Self { engine, options }
    }

    /// Buffered mode: convert a complete HTML document
    ///
    /// Runs to completion before any response is written, so a failure
    /// here can still change the response status.
    pub fn convert(&self, base: Option<&Url>, html: &str) -> Result<String, Error> {
        self.engine.convert(html, base, &self.options)
    }

    /// Streaming mode: convert an HTML byte stream into Markdown chunks
    ///
    /// The returned sequence is lazy, forward-only, and non-restartable.
    /// Zero-length chunks are filtered before emission. Any upstream read
    /// failure or engine failure surfaces as a terminal `Err` item; by the
    /// time it does, the response has already started, so the caller can
    /// only log and terminate.
    pub fn markdown_stream<S>(
        &self,
        base: Option<Url>,
        html: S,
    ) -> impl Stream<Item = Result<String, Error>> + Send
    where
        S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        let options = self.options.clone();

        let converted = async move {
            futures::pin_mut!(html);
            let mut document = Vec::new();
            while let Some(chunk) = html.next().await {
                let chunk = chunk.map_err(Error::Transport)?;
                document.extend_from_slice(&chunk);
            }
            let document = String::from_utf8_lossy(&document);
            engine.convert(&document, base.as_ref(), &options)
        };

        stream::once(converted)
            .map(|result| match result {
                Ok(markdown) => stream::iter(
                    split_markdown(&markdown)
                        .into_iter()
                        .map(Ok)
                        .collect::<Vec<_>>(),
                )
                .left_stream(),
                Err(err) => stream::once(future::ready(Err(err))).right_stream(),
            })
            .flatten()
    }
}

/// Split Markdown into bounded, non-empty chunks on char boundaries
fn split_markdown(markdown: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for ch in markdown.chars() {
        current.push(ch);
        if current.len() >= STREAM_CHUNK_BYTES {
            chunks.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
