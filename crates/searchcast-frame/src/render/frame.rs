//! Frame pages: the landing frame, search results, and the error fallback.

use maud::{Markup, html};

use super::components::{FrameMeta, frame_page};
use crate::config::Config;
use crate::frame::{DisplayText, FrameAction, GENERIC_ERROR_TEXT, image_url};

/// Landing frame served on `GET /`, pointing at the static icon.
pub fn home(config: &Config) -> Markup {
    let icon_url = format!("{}/public/icon.png", config.base_url);
    let page_title = format!("{} Frame", config.title);

    let body = html! {
        p { "Welcome to " (config.title) ". Cast this URL in a Farcaster client to use the frame." }
        p { "Or, paste this URL into a Farcaster frame validator." }
        p { "Your frame should show an input field and two buttons." }
    };

    frame_page(
        config,
        FrameMeta {
            image_url: &icon_url,
            page_title: Some(&page_title),
        },
        body,
    )
}

/// Frame returned after an interaction, showing `display` as its image.
pub fn interaction(
    config: &Config,
    action: &FrameAction,
    search_text: &str,
    image_url: &str,
    display: &DisplayText,
) -> Markup {
    let body = html! {
        p { "This is a Farcaster Frame. View it in a Farcaster client." }
        p { "Current search: " (search_text) }
        p {
            "Result: "
            @match action {
                FrameAction::Search(_) => { (display.text) }
                FrameAction::Initial => { "Awaiting search..." }
            }
        }
    };

    frame_page(
        config,
        FrameMeta {
            image_url,
            page_title: None,
        },
        body,
    )
}

/// Minimal frame returned with a 500 when the controller fails.
///
/// Still a valid frame, so clients keep the search button and the user
/// can retry.
pub fn error(config: &Config) -> Markup {
    let display = DisplayText {
        text: GENERIC_ERROR_TEXT.to_string(),
        is_error: true,
    };
    let image = image_url(&config.base_url, &display)
        .unwrap_or_else(|_| "/image?text=Something+went+wrong.&error=true".to_string());

    let body = html! {
        p { (GENERIC_ERROR_TEXT) }
    };

    frame_page(
        config,
        FrameMeta {
            image_url: &image,
            page_title: None,
        },
        body,
    )
}
