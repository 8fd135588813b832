//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::error::FrameError;
use crate::render::image::ImageRenderer;
use crate::summary::SummaryClient;

/// Shared application state available to all request handlers.
///
/// Everything in here is read-only after startup.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// Wikipedia summary client.
    pub summaries: SummaryClient,

    /// Frame image renderer with fonts preloaded.
    pub renderer: ImageRenderer,
}

impl AppState {
    /// Create a new application state from configuration.
    pub fn new(config: Config) -> Result<Self, FrameError> {
        let summaries = SummaryClient::new(config.wiki_api_url.clone(), config.upstream_timeout)?;
        let renderer = ImageRenderer::new(&config.font_path());

        tracing::info!(
            upstream_timeout_ms = config.upstream_timeout.as_millis() as u64,
            image_max_age = config.image_max_age,
            "application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            summaries,
            renderer,
        })
    }
}
