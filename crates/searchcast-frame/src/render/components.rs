//! Shared HTML components for frame pages.
//!
//! These are maud functions that return `Markup` fragments for composition
//! into full pages.

use maud::{Markup, PreEscaped, html};

use crate::config::Config;

/// Aspect ratio advertised for every frame image (600x315).
pub const FRAME_ASPECT_RATIO: &str = "1.91:1";

/// Placeholder shown in the frame text input.
pub const INPUT_PLACEHOLDER: &str = "Enter search term...";

/// Label of the first (search) button.
pub const SEARCH_BUTTON_LABEL: &str = "Search 🔍";

/// Inline CSS for the fallback body shown in ordinary browsers.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:#111;background:#fafafa;display:flex;flex-direction:column;align-items:center;padding:1.5rem 1rem}
main{max-width:640px;width:100%}
h1{font-size:1.75rem;font-weight:700;letter-spacing:-.02em;margin-bottom:.75rem}
p{color:#555;margin:.4rem 0}
img{max-width:100%;height:auto;margin-top:1rem;border-radius:8px}
@media(prefers-color-scheme:dark){
body{background:#0a0a0f;color:#e5e5e5}
p{color:#a0a0a0}
}
"#;

/// Values that vary between frame pages.
pub struct FrameMeta<'a> {
    /// Absolute URL of the frame image.
    pub image_url: &'a str,
    /// Document `<title>`, when the page has one.
    pub page_title: Option<&'a str>,
}

/// Render a complete frame page: the `fc:frame` meta tags every client
/// needs, plus `body_content` for people opening the URL in a browser.
pub fn frame_page(config: &Config, meta: FrameMeta<'_>, body_content: Markup) -> Markup {
    let post_url = format!("{}/", config.base_url);
    let profile_label = format!("Profile: {}", config.profile_id);

    html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                @if let Some(title) = meta.page_title {
                    title { (title) }
                }

                // Open Graph
                meta property="og:title" content=(config.title);
                meta property="og:image" content=(meta.image_url);

                // Frame protocol
                meta property="fc:frame" content="vNext";
                meta property="fc:frame:image" content=(meta.image_url);
                meta property="fc:frame:image:aspect_ratio" content=(FRAME_ASPECT_RATIO);
                meta property="fc:frame:input:text" content=(INPUT_PLACEHOLDER);
                meta property="fc:frame:button:1" content=(SEARCH_BUTTON_LABEL);
                meta property="fc:frame:button:1:action" content="post";
                meta property="fc:frame:button:2" content=(profile_label);
                meta property="fc:frame:button:2:action" content="link";
                meta property="fc:frame:button:2:target" content=(config.profile_url);
                meta property="fc:frame:post_url" content=(post_url);

                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                main {
                    h1 { (config.title) " Frame" }
                    (body_content)
                    img src=(meta.image_url) alt="Frame Image";
                }
            }
        }
    }
}
