//! Route definitions for the frame service.
//!
//! ## Routes
//!
//! - `GET /` - Initial frame
//! - `POST /` - Frame button callback
//! - `GET /image` - Rendered frame image (PNG)
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions
//! - `GET /public/*` - Static assets (icon, font)

mod frame;
mod health;
mod home;
pub mod image;

use axum::Router;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use maud::Markup;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Build the complete frame service router.
pub fn router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.assets_dir);

    Router::new()
        .route("/", get(home::home_page).post(frame::frame_action))
        .route("/image", get(image::image_handler))
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .nest_service("/public", assets)
        .with_state(state)
}

/// Serve robots.txt allowing all crawlers.
///
/// Link unfurlers need to fetch the frame page and its image.
async fn robots_txt() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        "User-agent: *\nAllow: /\n",
    )
}

/// Build an HTML response with the given status.
///
/// `Markup` supplies the `text/html; charset=utf-8` content type itself.
fn html_response(status: StatusCode, markup: Markup) -> Response {
    (
        status,
        [(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"))],
        markup,
    )
        .into_response()
}
