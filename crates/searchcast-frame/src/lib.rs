//! SearchCast Frame - a Farcaster Frame for Wikipedia lookups.
//!
//! This crate provides a small HTTP server implementing a Farcaster Frame:
//! the user types a term, presses "Search", and the frame answers with an
//! image showing the first two sentences of the matching Wikipedia article.
//!
//! # Architecture
//!
//! - **Frame**: Decodes the frame callback and decides what to show
//! - **Summary**: Fetches and shortens Wikipedia intro extracts
//! - **Render**: HTML frame pages (maud) and PNG frame images (resvg)
//!
//! # Flow
//!
//! ```text
//! POST /            -> frame HTML whose fc:frame:image is /image?text=..&error=..
//! GET  /image?...   -> 600x315 PNG
//! ```
//!
//! Every request is independent. Nothing is cached server-side; image
//! responses carry `Cache-Control` so clients and CDNs can cache them.

pub mod config;
pub mod error;
pub mod frame;
pub mod render;
pub mod routes;
pub mod state;
pub mod summary;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
