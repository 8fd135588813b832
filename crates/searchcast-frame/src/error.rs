//! Error types for the frame service.
//!
//! The frame controller turns these into a frame-conforming error page
//! itself (it needs the configuration to build image URLs). The generic
//! [`IntoResponse`] impl here is the plain-text fallback used by the image
//! route.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Frame service error type.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// An absolute URL could not be built from the configured base URL.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The SVG template could not be parsed, rasterized, or encoded.
    #[error("render error: {0}")]
    Render(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for FrameError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::Render(msg) => {
                tracing::error!(error = %msg, "image generation failed");
                "Error generating image"
            }
            Self::InvalidUrl(err) => {
                tracing::error!(error = %err, "url construction failed");
                "Internal error"
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                "Internal error"
            }
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            )],
            body,
        )
            .into_response()
    }
}
