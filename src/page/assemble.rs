//! Detail page data assembly

use anyhow::Result;
use serde::Serialize;

use crate::cms::{
    Banner, Blog, Category, CmsClient, PagedBlogCollection, PagedCollection, PopularArticles,
};
use crate::content::{ContentConverter, TocEntry};

/// Identifier used when the route carries no `blogId`
pub const DEFAULT_BLOG_ID: &str = "1";

/// Number of posts in the "latest" sidebar list
pub const DEFAULT_LATEST_LIMIT: usize = 10;

/// Everything the detail page renders, built once per page instance
#[derive(Debug, Clone, Serialize)]
pub struct DetailViewModel {
    pub blog: Blog,
    /// `blog.body` converted to HTML
    pub body: String,
    /// Always computed; only shown when `blog.toc_visible`
    pub toc: Vec<TocEntry>,
    /// Latest posts
    pub blogs: PagedBlogCollection,
    pub categories: PagedCollection<Category>,
    pub popular_articles: PopularArticles,
    pub banner: Banner,
}

/// Resolve the route parameter, treating a missing or empty id as the default
pub fn resolve_blog_id(blog_id: Option<&str>) -> &str {
    match blog_id {
        Some(id) if !id.is_empty() => id,
        _ => DEFAULT_BLOG_ID,
    }
}

/// Fetch and convert everything one detail page needs.
///
/// Fetches run one after another; the first failure aborts the whole
/// assembly and nothing is cached between calls.
pub async fn assemble(
    cms: &dyn CmsClient,
    converter: &dyn ContentConverter,
    blog_id: Option<&str>,
    limit: usize,
) -> Result<DetailViewModel> {
    let blog_id = resolve_blog_id(blog_id);
    tracing::debug!("Assembling detail page for blog {}", blog_id);

    let blog = cms.get_blog_by_id(blog_id).await?;
    let toc = converter.convert_to_toc(&blog.body);
    let body = converter.convert_to_html(&blog.body)?;
    let blogs = cms.get_blogs(limit).await?;
    let categories = cms.get_categories().await?;
    let popular_articles = cms.get_popular_articles().await?;
    let banner = cms.get_banners().await?;

    Ok(DetailViewModel {
        blog,
        body,
        toc,
        blogs,
        categories,
        popular_articles,
        banner,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::fake::{blog, FakeCms};
    use crate::content::MarkdownRenderer;
    use crate::page::enumerate_paths;

    fn fake_cms() -> FakeCms {
        FakeCms::new(vec![
            blog("1", "First", "## Intro\n\nHello", true),
            blog("2", "Second", "body", false),
            blog("42", "Hello", "# H1\nText", true),
        ])
    }

    #[tokio::test]
    async fn test_assemble_scenario() {
        let cms = fake_cms();
        let converter = MarkdownRenderer::new();

        let model = assemble(&cms, &converter, Some("42"), 10).await.unwrap();
        assert_eq!(model.blog.id, "42");
        let toc: Vec<_> = model
            .toc
            .iter()
            .map(|e| (e.level, e.label.as_str()))
            .collect();
        assert_eq!(toc, vec![(1, "H1")]);
        assert!(model.body.contains("<h1"));
        assert!(model.body.contains("H1</h1>"));
        assert_eq!(model.categories.contents.len(), 2);
        assert_eq!(model.banner.alt, "Promo");
    }

    #[tokio::test]
    async fn test_every_enumerated_id_assembles() {
        let cms = fake_cms();
        let converter = MarkdownRenderer::new();

        let paths = enumerate_paths(&cms).await.unwrap();
        for params in paths.paths {
            let model = assemble(&cms, &converter, Some(&params.blog_id), 10)
                .await
                .unwrap();
            assert_eq!(model.blog.id, params.blog_id);
        }
    }

    #[tokio::test]
    async fn test_missing_id_defaults_to_first() {
        let cms = fake_cms();
        let converter = MarkdownRenderer::new();

        let missing = assemble(&cms, &converter, None, 10).await.unwrap();
        let empty = assemble(&cms, &converter, Some(""), 10).await.unwrap();
        let explicit = assemble(&cms, &converter, Some("1"), 10).await.unwrap();

        assert_eq!(missing.blog, explicit.blog);
        assert_eq!(missing.body, explicit.body);
        assert_eq!(missing.toc, explicit.toc);
        assert_eq!(empty.blog.id, "1");
    }

    #[tokio::test]
    async fn test_one_call_per_operation() {
        let cms = fake_cms();
        let converter = MarkdownRenderer::new();

        assemble(&cms, &converter, Some("2"), 10).await.unwrap();
        assert_eq!(cms.calls.snapshot(), [1, 0, 1, 1, 1, 1]);

        // No caching: a second assembly fetches everything again.
        assemble(&cms, &converter, Some("2"), 10).await.unwrap();
        assert_eq!(cms.calls.snapshot(), [2, 0, 2, 2, 2, 2]);
    }

    #[tokio::test]
    async fn test_toc_computed_even_when_hidden() {
        let cms = FakeCms::new(vec![blog("7", "Hidden", "## Secret\n", false)]);
        let converter = MarkdownRenderer::new();

        let model = assemble(&cms, &converter, Some("7"), 10).await.unwrap();
        assert!(!model.blog.toc_visible);
        assert_eq!(model.toc.len(), 1);
    }

    #[tokio::test]
    async fn test_latest_respects_limit() {
        let cms = fake_cms();
        let converter = MarkdownRenderer::new();

        let model = assemble(&cms, &converter, Some("1"), 2).await.unwrap();
        assert_eq!(model.blogs.contents.len(), 2);
        assert_eq!(model.blogs.total_count, 3);
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let mut cms = fake_cms();
        cms.fail_banner = true;
        let converter = MarkdownRenderer::new();

        let err = assemble(&cms, &converter, Some("1"), 10).await.unwrap_err();
        assert!(err.to_string().contains("banner"));
    }

    #[tokio::test]
    async fn test_unknown_blog_fails_before_other_fetches() {
        let cms = fake_cms();
        let converter = MarkdownRenderer::new();

        assert!(assemble(&cms, &converter, Some("404"), 10).await.is_err());
        assert_eq!(cms.calls.snapshot(), [1, 0, 0, 0, 0, 0]);
    }
}
