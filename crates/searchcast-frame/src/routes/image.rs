//! Frame image endpoint.
//!
//! Handles `GET /image?text=...&error=true|false`. The query extractor
//! percent-decodes `text`, so whatever the frame controller encoded comes
//! back unchanged.

use std::path::Path;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::error::FrameError;
use crate::state::AppState;

/// Text rendered when the request carries none.
const DEFAULT_TEXT: &str = "SearchCast";

/// Cache lifetime of the fallback icon. Kept short so a recovered renderer
/// takes over quickly.
const FALLBACK_MAX_AGE: u32 = 60;

/// Query parameters of the image endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageParams {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ImageParams {
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or(DEFAULT_TEXT)
    }

    /// Only the literal `"true"` selects the error palette.
    pub fn is_error(&self) -> bool {
        self.error.as_deref() == Some("true")
    }
}

/// Render the frame image for the given text.
pub async fn image_handler(
    State(state): State<AppState>,
    Query(params): Query<ImageParams>,
) -> Response {
    let renderer = state.renderer.clone();
    let text = params.text().to_string();
    let is_error = params.is_error();

    // Rasterizing is CPU-bound; keep it off the async workers.
    let result = tokio::task::spawn_blocking(move || renderer.render_png(&text, is_error))
        .await
        .unwrap_or_else(|e| Err(FrameError::Render(format!("render task failed: {e}"))));

    respond_with_fallback(result, &state.config.icon_path(), state.config.image_max_age).await
}

/// Turn a render result into a response.
///
/// On failure the static icon at `fallback_path` is served instead; if it
/// cannot be read either, the error becomes a plain-text 500.
pub async fn respond_with_fallback(
    result: Result<Vec<u8>, FrameError>,
    fallback_path: &Path,
    max_age: u32,
) -> Response {
    let err = match result {
        Ok(png) => return png_response(png, max_age),
        Err(err) => err,
    };

    tracing::warn!(error = %err, "image generation failed, trying fallback icon");

    match tokio::fs::read(fallback_path).await {
        Ok(bytes) => png_response(bytes, FALLBACK_MAX_AGE),
        Err(read_err) => {
            tracing::warn!(
                path = %fallback_path.display(),
                error = %read_err,
                "fallback icon unavailable"
            );
            err.into_response()
        }
    }
}

/// Build an HTTP response with PNG content and cache headers.
fn png_response(png_bytes: Vec<u8>, max_age: u32) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));

    if let Ok(val) = HeaderValue::from_str(&format!("public, max-age={max_age}")) {
        headers.insert(header::CACHE_CONTROL, val);
    }

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(&png_bytes);
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    (StatusCode::OK, headers, png_bytes).into_response()
}
