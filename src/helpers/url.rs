//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/42/") // -> "/blog/42/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/42/") // -> "https://example.com/blog/42/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Site path of a post detail page
pub fn blog_path(config: &SiteConfig, blog_id: &str) -> String {
    url_for(config, &format!("{}/", encode_url(blog_id)))
}

/// Absolute URL of a post detail page
pub fn blog_url(config: &SiteConfig, blog_id: &str) -> String {
    full_url_for(config, &format!("{}/", encode_url(blog_id)))
}

/// Site path of a category listing
pub fn category_path(config: &SiteConfig, category_id: &str) -> String {
    url_for(config, &format!("category/{}/", encode_url(category_id)))
}

/// Encode a URL component
pub fn encode_url(path: &str) -> String {
    percent_encoding::utf8_percent_encode(path, percent_encoding::NON_ALPHANUMERIC).to_string()
}

/// Append query parameters, respecting any query already on `base`
pub fn with_query(base: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return base.to_string();
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base, sep, query)
}
