//! Built-in detail page templates using Tera template engine
//!
//! The layout and every page region (banner, breadcrumb, share buttons,
//! table of contents, sidebar lists...) are embedded in the binary as
//! Tera partials.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::helpers::html_escape;

/// Template renderer with the embedded detail page templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Escaping is explicit through the `esc` filter so that rendered
        // post bodies pass through untouched.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("detail/layout.html")),
            ("detail.html", include_str!("detail/detail.html")),
            ("loading.html", include_str!("detail/loading.html")),
            // Partials
            (
                "partials/banner.html",
                include_str!("detail/partials/banner.html"),
            ),
            (
                "partials/breadcrumb.html",
                include_str!("detail/partials/breadcrumb.html"),
            ),
            (
                "partials/categories.html",
                include_str!("detail/partials/categories.html"),
            ),
            (
                "partials/latest.html",
                include_str!("detail/partials/latest.html"),
            ),
            (
                "partials/loader.html",
                include_str!("detail/partials/loader.html"),
            ),
            ("partials/meta.html", include_str!("detail/partials/meta.html")),
            (
                "partials/popular_article.html",
                include_str!("detail/partials/popular_article.html"),
            ),
            ("partials/post.html", include_str!("detail/partials/post.html")),
            (
                "partials/search.html",
                include_str!("detail/partials/search.html"),
            ),
            (
                "partials/share.html",
                include_str!("detail/partials/share.html"),
            ),
            ("partials/toc.html", include_str!("detail/partials/toc.html")),
        ])?;

        tera.register_filter("esc", esc_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: escape HTML special characters
fn esc_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("esc", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub url: String,
    pub language: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            url: config.url.clone(),
            language: config.language.clone(),
        }
    }
}

/// A labelled link, used by the breadcrumb and the category list
#[derive(Debug, Clone, Serialize)]
pub struct BreadcrumbItem {
    pub label: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetaData {
    pub author: String,
    pub category: String,
    pub category_path: String,
    pub date: String,
    pub datetime: String,
}

/// A post in the popular or latest sidebar lists
#[derive(Debug, Clone, Serialize)]
pub struct SidebarPost {
    pub title: String,
    pub path: String,
    pub thumbnail: Option<String>,
    pub date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_esc_filter() {
        let value = tera::Value::String("<b>&</b>".to_string());
        let escaped = esc_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(escaped, tera::Value::String("&lt;b&gt;&amp;&lt;/b&gt;".to_string()));
    }
}
