//! Responsive image URLs for the remote image service
//!
//! The service resizes on the fly from query parameters: `w` (width),
//! `fm` (output format) and `q` (quality). Nothing is decoded locally.

use serde::Serialize;

use super::url::with_query;

/// One `<source>` of a `<picture>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSource {
    pub media: String,
    pub mime: String,
    pub srcset: String,
}

/// Everything needed to render the cover `<picture>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponsiveImage {
    pub sources: Vec<ImageSource>,
    pub fallback_src: String,
}

/// Breakpoint and 1x width of each cover source, widest first.
///
/// The last entry is the mobile variant and shares the 768px query with the
/// main one, so browsers stop at the earlier match.
const COVER_BREAKPOINTS: [(u32, u32); 4] = [(1160, 820), (820, 740), (768, 728), (768, 375)];

const COVER_FALLBACK_WIDTH: u32 = 820;
const COVER_FALLBACK_QUALITY: u32 = 100;

/// URL of `base` resized to `width` in `format`
pub fn resized(base: &str, width: u32, format: &str) -> String {
    with_query(base, &[("w", width.to_string()), ("fm", format.to_string())])
}

/// `1x, 2x` srcset for a given 1x width
pub fn srcset(base: &str, width: u32, format: &str) -> String {
    format!(
        "{}, {} 2x",
        resized(base, width, format),
        resized(base, width * 2, format)
    )
}

/// Cover image sources for the detail page
pub fn cover_image(url: &str) -> ResponsiveImage {
    let sources = COVER_BREAKPOINTS
        .iter()
        .map(|&(min_width, width)| ImageSource {
            media: format!("(min-width: {}px)", min_width),
            mime: "image/webp".to_string(),
            srcset: srcset(url, width, "webp"),
        })
        .collect();

    ResponsiveImage {
        sources,
        fallback_src: with_query(
            url,
            &[
                ("w", COVER_FALLBACK_WIDTH.to_string()),
                ("q", COVER_FALLBACK_QUALITY.to_string()),
            ],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_image_sources() {
        let image = cover_image("https://img/x");
        let media: Vec<_> = image.sources.iter().map(|s| s.media.as_str()).collect();
        assert_eq!(
            media,
            vec![
                "(min-width: 1160px)",
                "(min-width: 820px)",
                "(min-width: 768px)",
                "(min-width: 768px)",
            ]
        );
        assert_eq!(
            image.sources[0].srcset,
            "https://img/x?w=820&fm=webp, https://img/x?w=1640&fm=webp 2x"
        );
        assert_eq!(
            image.sources[3].srcset,
            "https://img/x?w=375&fm=webp, https://img/x?w=750&fm=webp 2x"
        );
        assert!(image.sources.iter().all(|s| s.mime == "image/webp"));
        assert_eq!(image.fallback_src, "https://img/x?w=820&q=100");
    }

    #[test]
    fn test_existing_query_is_kept() {
        assert_eq!(
            resized("https://img/x?v=1", 740, "webp"),
            "https://img/x?v=1&w=740&fm=webp"
        );
    }
}
