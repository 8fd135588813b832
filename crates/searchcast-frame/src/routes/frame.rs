//! Frame callback handler.
//!
//! Handles `POST /`, which Farcaster clients call when a frame button is
//! pressed. The response is always a frame: a 200 for every payload
//! (including absent or malformed ones), or a 500 error frame if building
//! the response fails.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use maud::Markup;

use super::html_response;
use crate::error::FrameError;
use crate::frame::{self, FrameAction, FramePayload};
use crate::render;
use crate::state::AppState;

/// Handle a frame button press.
///
/// 1. Parses the body, falling back to the initial action if it is unusable
/// 2. Fetches a summary when the user searched for something
/// 3. Renders the next frame pointing at a parameterized image URL
pub async fn frame_action(State(state): State<AppState>, body: Bytes) -> Response {
    let payload = FramePayload::from_body(&body);

    match handle_interaction(&state, payload.as_ref()).await {
        Ok(markup) => html_response(StatusCode::OK, markup),
        Err(err) => {
            tracing::error!(error = %err, "frame interaction failed");
            html_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                render::frame::error(&state.config),
            )
        }
    }
}

async fn handle_interaction(
    state: &AppState,
    payload: Option<&FramePayload>,
) -> Result<Markup, FrameError> {
    let action = FrameAction::from_payload(payload);
    tracing::debug!(
        action = action.name(),
        button_index = ?payload.and_then(FramePayload::button_index),
        "frame action decided"
    );

    let display = frame::resolve_display(&action, &state.summaries).await;
    let image_url = frame::image_url(&state.config.base_url, &display)?;
    let search_text = payload.map(FramePayload::input_text).unwrap_or("");

    Ok(render::frame::interaction(
        &state.config,
        &action,
        search_text,
        &image_url,
        &display,
    ))
}
