//! Rendering for frame responses.
//!
//! - [`frame`]: HTML pages carrying the `fc:frame` meta tags, built with
//!   [maud](https://maud.lambda.xyz/) so every dynamic value is escaped
//! - [`image`]: the PNG each frame points at, rasterized with resvg

pub mod components;
pub mod frame;
pub mod image;
