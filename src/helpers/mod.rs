//! Helper functions for templates
//!
//! URL building, date display, HTML text helpers, responsive cover images
//! and share links used when filling the detail page context.

mod date;
mod html;
mod image;
mod share;
mod url;

pub use date::*;
pub use html::*;
pub use image::*;
pub use share::*;
pub use url::*;
