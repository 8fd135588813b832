//! Frame interaction handling.
//!
//! Decodes the (unverified) frame callback payload, decides which action
//! the user took, and produces the text and image URL the next frame shows.

use serde::Deserialize;

use crate::error::FrameError;
use crate::summary::{SummaryClient, SummaryOutcome};

/// Prompt shown on the initial frame and whenever no search was submitted.
pub const INITIAL_PROMPT: &str = "Search for anything!";

/// Message rendered into the image when the controller itself fails.
pub const GENERIC_ERROR_TEXT: &str = "Something went wrong. Please try again.";

/// Frame callback body posted by Farcaster clients.
///
/// Only `untrustedData` is read. It is client-supplied and not verified.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FramePayload {
    #[serde(default)]
    pub untrusted_data: Option<UntrustedData>,
}

/// Client-supplied part of a frame callback.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UntrustedData {
    /// Contents of the frame text input.
    #[serde(default)]
    pub input_text: Option<String>,
    /// 1-based index of the pressed button. Kept as a raw JSON number so
    /// `1.0` counts as button 1.
    #[serde(default)]
    pub button_index: Option<serde_json::Number>,
}

impl FramePayload {
    /// Parse a request body, treating anything unparseable as no payload.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        if body.is_empty() {
            return None;
        }

        match serde_json::from_slice(body) {
            Ok(payload) => Some(payload),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring malformed frame payload");
                None
            }
        }
    }

    /// Text typed into the input field, or `""`.
    pub fn input_text(&self) -> &str {
        self.untrusted_data
            .as_ref()
            .and_then(|d| d.input_text.as_deref())
            .unwrap_or("")
    }

    /// Index of the pressed button, if any.
    pub fn button_index(&self) -> Option<f64> {
        self.untrusted_data
            .as_ref()
            .and_then(|d| d.button_index.as_ref())
            .and_then(serde_json::Number::as_f64)
    }
}

/// What the user asked the frame to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameAction {
    /// First load, or nothing to search for.
    Initial,
    /// Search button pressed with a non-blank term.
    Search(String),
}

impl FrameAction {
    /// Button index of the "Search" button.
    const SEARCH_BUTTON: f64 = 1.0;

    /// Decide the action for a (possibly absent) payload.
    pub fn from_payload(payload: Option<&FramePayload>) -> Self {
        let Some(payload) = payload else {
            return Self::Initial;
        };

        let text = payload.input_text();
        if payload.button_index() == Some(Self::SEARCH_BUTTON) && !text.trim().is_empty() {
            Self::Search(text.to_string())
        } else {
            Self::Initial
        }
    }

    /// Short label for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Search(_) => "search",
        }
    }
}

/// Text drawn into the frame image plus the palette selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText {
    pub text: String,
    pub is_error: bool,
}

impl DisplayText {
    /// The static prompt for the initial frame.
    pub fn initial() -> Self {
        Self {
            text: INITIAL_PROMPT.to_string(),
            is_error: false,
        }
    }
}

impl From<&SummaryOutcome> for DisplayText {
    fn from(outcome: &SummaryOutcome) -> Self {
        Self {
            text: outcome.display_text(),
            is_error: outcome.is_error(),
        }
    }
}

/// Resolve an action to the text shown in the next frame.
///
/// Only `Search` touches the network.
pub async fn resolve_display(action: &FrameAction, summaries: &SummaryClient) -> DisplayText {
    match action {
        FrameAction::Initial => DisplayText::initial(),
        FrameAction::Search(term) => {
            let outcome = summaries.summarize(term).await;
            tracing::info!(
                term = %term.trim(),
                outcome = outcome.kind(),
                "search resolved"
            );
            DisplayText::from(&outcome)
        }
    }
}

/// Build the absolute URL of the rendered frame image.
///
/// Produces `<base_url>/image?text=<encoded>&error=<true|false>`.
pub fn image_url(base_url: &str, display: &DisplayText) -> Result<String, FrameError> {
    let mut url = url::Url::parse(&format!("{base_url}/image"))?;
    url.query_pairs_mut()
        .append_pair("text", &display.text)
        .append_pair("error", if display.is_error { "true" } else { "false" });
    Ok(url.into())
}
