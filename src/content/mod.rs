//! Content module - turns a raw post body into HTML and a table of contents

mod markdown;
mod toc;

use anyhow::Result;

pub use markdown::MarkdownRenderer;
pub use toc::{extract_toc, TocEntry};

/// Deepest heading level listed in the table of contents
pub const TOC_MAX_LEVEL: u8 = 3;

/// Converts a post body for the detail page
pub trait ContentConverter: Send + Sync {
    /// Headings of `raw_body` in document order
    fn convert_to_toc(&self, raw_body: &str) -> Vec<TocEntry>;

    /// Render `raw_body` to HTML
    fn convert_to_html(&self, raw_body: &str) -> Result<String>;
}

impl ContentConverter for MarkdownRenderer {
    fn convert_to_toc(&self, raw_body: &str) -> Vec<TocEntry> {
        extract_toc(raw_body, TOC_MAX_LEVEL)
    }

    fn convert_to_html(&self, raw_body: &str) -> Result<String> {
        self.render(raw_body)
    }
}
