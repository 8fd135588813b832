//! Landing frame served on `GET /`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

use super::html_response;
use crate::render;
use crate::state::AppState;

/// Render the initial frame, which shows the static icon.
pub async fn home_page(State(state): State<AppState>) -> Response {
    html_response(StatusCode::OK, render::frame::home(&state.config))
}
