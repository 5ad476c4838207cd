//! Request handlers for the conversion endpoints

use crate::error::ApiError;
use crate::routes::AppState;
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use chrono::{SecondsFormat, Utc};
use futures::StreamExt;
use tracing::{error, info};
use url2md::{fetch_html, origin_url, Conversion, ConvertRequest, Error};

/// Unwrap the JSON body, classifying a missing or unreadable body the
/// same way as an absent URL
fn request_body(
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<ConvertRequest, ApiError> {
    let Json(request) = payload.map_err(|_| Error::MissingUrl)?;
    Ok(request)
}

/// POST /api/convert - streamed conversion
///
/// Replies 200 with `text/plain` and writes Markdown chunks as the
/// conversion produces them. Failures after the first chunk cannot change
/// the status code; they are logged and the connection is terminated.
pub async fn convert(
    State(state): State<AppState>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = request_body(payload)?;
    let url = request.validate()?;
    info!(url = %url, "converting url");

    let page = fetch_html(&url).await?;
    if !page.has_declared_body() {
        return Err(Error::EmptyBody.into());
    }

    let markdown = state
        .adapter
        .markdown_stream(origin_url(&url), page.into_bytes_stream());

    let body = Body::from_stream(markdown.map(|item| match item {
        Ok(chunk) => Ok(Bytes::from(chunk)),
        Err(err) => {
            // Headers are already sent; best effort is to log and abort
            error!(error = %err, "conversion failed mid-stream");
            Err(err)
        }
    }));

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response())
}

/// POST /api/convert-simple - buffered conversion
///
/// Waits for the complete Markdown document and replies with a single
/// JSON payload. Conversion failures here happen before any response is
/// written, so they still map to a 500.
pub async fn convert_simple(
    State(state): State<AppState>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Json<Conversion>, ApiError> {
    let request = request_body(payload)?;
    let url = request.validate()?;
    info!(url = %url, "converting url (simple)");

    let page = fetch_html(&url).await?;
    let content_type = page.content_type().to_string();
    let html = page.text().await?;

    let markdown = state.adapter.convert(origin_url(&url).as_ref(), &html)?;

    Ok(Json(Conversion {
        success: true,
        url: request.url,
        markdown,
        content_type,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
