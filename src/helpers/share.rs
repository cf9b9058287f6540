//! Social share links

use serde::Serialize;

use super::url::{blog_url, encode_url};
use crate::config::SiteConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLink {
    pub name: String,
    pub href: String,
}

/// Share targets for one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    /// Absolute URL of the post
    pub url: String,
    pub links: Vec<ShareLink>,
}

pub fn share_links(config: &SiteConfig, blog_id: &str, title: &str) -> ShareLinks {
    let url = blog_url(config, blog_id);
    let encoded_url = encode_url(&url);
    let encoded_title = encode_url(title);

    let links = vec![
        ShareLink {
            name: "twitter".to_string(),
            href: format!(
                "https://twitter.com/intent/tweet?url={}&text={}",
                encoded_url, encoded_title
            ),
        },
        ShareLink {
            name: "facebook".to_string(),
            href: format!("https://www.facebook.com/sharer/sharer.php?u={}", encoded_url),
        },
        ShareLink {
            name: "hatena".to_string(),
            href: format!(
                "https://b.hatena.ne.jp/add?mode=confirm&url={}&title={}",
                encoded_url, encoded_title
            ),
        },
        ShareLink {
            name: "pocket".to_string(),
            href: format!("https://getpocket.com/edit?url={}", encoded_url),
        },
    ];

    ShareLinks { url, links }
}
