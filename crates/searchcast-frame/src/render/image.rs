//! Frame image generation.
//!
//! Renders display text into a 600x315 PNG (the 1.91:1 frame ratio):
//! - Solid background with a 5px border
//! - Text word-wrapped and centered both ways
//! - Success or error palette chosen by the caller
//!
//! The SVG is built as a string, parsed by usvg, and rasterized by resvg.
//! Fonts are loaded once at startup and shared read-only across requests.

use std::path::Path;
use std::sync::Arc;

use resvg::usvg::{self, fontdb};

use crate::error::FrameError;

/// Frame image dimensions.
pub const IMAGE_WIDTH: u32 = 600;
pub const IMAGE_HEIGHT: u32 = 315;

/// Space between the border and the text block.
const PADDING: u32 = 30;

/// Border stroke width.
const BORDER_WIDTH: u32 = 5;

/// Preferred and smallest font sizes. Long summaries shrink until they fit.
const MAX_FONT_SIZE: u32 = 24;
const MIN_FONT_SIZE: u32 = 14;

/// Average glyph advance as a fraction of the font size, used for wrapping.
const AVG_CHAR_WIDTH: f32 = 0.55;

const LINE_HEIGHT: f32 = 1.5;

/// Family name of the bundled font.
const BUNDLED_FAMILY: &str = "Inter";

/// Generic family used when the bundled font is missing.
const DEFAULT_FAMILY: &str = "sans-serif";

/// Background and foreground colors of a frame image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub foreground: &'static str,
}

impl Palette {
    pub const SUCCESS: Self = Self {
        background: "#e3f2fd",
        foreground: "#0d47a1",
    };

    pub const ERROR: Self = Self {
        background: "#ffebee",
        foreground: "#c62828",
    };

    pub fn for_error(is_error: bool) -> Self {
        if is_error { Self::ERROR } else { Self::SUCCESS }
    }
}

/// Renders frame images. Cheap to clone.
#[derive(Clone)]
pub struct ImageRenderer {
    fontdb: Arc<fontdb::Database>,
    font_family: String,
}

impl std::fmt::Debug for ImageRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageRenderer")
            .field("font_faces", &self.fontdb.len())
            .field("font_family", &self.font_family)
            .finish()
    }
}

impl ImageRenderer {
    /// Create a renderer, loading the bundled font from `font_path`.
    ///
    /// A missing or unreadable font is not fatal: system fonts are loaded
    /// either way and text falls back to the default sans-serif family.
    pub fn new(font_path: &Path) -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let font_family = match std::fs::read(font_path) {
            Ok(data) => {
                db.load_font_data(data);
                db.set_sans_serif_family(BUNDLED_FAMILY);
                tracing::info!(path = %font_path.display(), "loaded frame font");
                BUNDLED_FAMILY.to_string()
            }
            Err(err) => {
                tracing::warn!(
                    path = %font_path.display(),
                    error = %err,
                    "frame font unavailable, using default font"
                );
                DEFAULT_FAMILY.to_string()
            }
        };

        tracing::info!(font_faces = db.len(), "image renderer initialized");

        Self {
            fontdb: Arc::new(db),
            font_family,
        }
    }

    /// Render `text` as a PNG using the palette selected by `is_error`.
    pub fn render_png(&self, text: &str, is_error: bool) -> Result<Vec<u8>, FrameError> {
        let svg = build_svg(text, Palette::for_error(is_error), &self.font_family);

        let options = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            font_family: self.font_family.clone(),
            ..usvg::Options::default()
        };

        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| FrameError::Render(format!("SVG parse error: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(IMAGE_WIDTH, IMAGE_HEIGHT)
            .ok_or_else(|| FrameError::Render("failed to create pixmap".to_string()))?;

        resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| FrameError::Render(format!("PNG encode error: {e}")))
    }
}

/// Build the frame image SVG.
///
/// Text is wrapped at the largest font size whose lines fit inside the
/// padded box; past [`MIN_FONT_SIZE`] it is allowed to overflow.
pub fn build_svg(text: &str, palette: Palette, font_family: &str) -> String {
    let inner_width = (IMAGE_WIDTH - 2 * (PADDING + BORDER_WIDTH)) as f32;
    let inner_height = (IMAGE_HEIGHT - 2 * (PADDING + BORDER_WIDTH)) as f32;

    let mut font_size = MAX_FONT_SIZE;
    let lines = loop {
        let size = font_size as f32;
        let max_chars = (inner_width / (size * AVG_CHAR_WIDTH)).floor().max(1.0) as usize;
        let lines = wrap_text(text, max_chars);
        let block_height = lines.len() as f32 * size * LINE_HEIGHT;
        if block_height <= inner_height || font_size <= MIN_FONT_SIZE {
            break lines;
        }
        font_size -= 2;
    };

    let line_height = font_size as f32 * LINE_HEIGHT;
    let block_height = lines.len() as f32 * line_height;
    let first_y = (IMAGE_HEIGHT as f32 - block_height) / 2.0 + line_height / 2.0;
    let center_x = IMAGE_WIDTH / 2;
    let inset = BORDER_WIDTH as f32 / 2.0;

    let mut svg = String::with_capacity(1024 + text.len() * 2);

    svg.push_str(&format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect x="{inset}" y="{inset}" width="{rw}" height="{rh}" fill="{bg}" stroke="{fg}" stroke-width="{bw}"/>"##,
        w = IMAGE_WIDTH,
        h = IMAGE_HEIGHT,
        inset = inset,
        rw = IMAGE_WIDTH as f32 - BORDER_WIDTH as f32,
        rh = IMAGE_HEIGHT as f32 - BORDER_WIDTH as f32,
        bg = palette.background,
        fg = palette.foreground,
        bw = BORDER_WIDTH,
    ));

    let family = if font_family == DEFAULT_FAMILY {
        DEFAULT_FAMILY.to_string()
    } else {
        format!("{font_family}, {DEFAULT_FAMILY}")
    };

    svg.push_str(&format!(
        r##"<text text-anchor="middle" dominant-baseline="central" font-family="{family}" font-size="{size}" fill="{fg}">"##,
        size = font_size,
        fg = palette.foreground,
    ));

    for (i, line) in lines.iter().enumerate() {
        let y = first_y + i as f32 * line_height;
        // maud escapes &, <, > and " for us
        let escaped = maud::html! { (line) }.into_string();
        svg.push_str(&format!(
            r#"<tspan x="{center_x}" y="{y:.1}">{escaped}</tspan>"#
        ));
    }

    svg.push_str("</text></svg>");
    svg
}

/// Greedy word wrap to lines of at most `max_chars` characters.
///
/// Words longer than a line are split across lines.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        if word.is_empty() {
            continue;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };

        if needed > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 {
        lines.push(current);
    }

    lines
}
