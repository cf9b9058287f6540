//! CMS module - the content API the detail page is fed from

mod error;
mod http;
mod types;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;

pub use error::CmsError;
pub use http::HttpCmsClient;
pub use types::{
    Banner, Blog, BlogSummary, Category, Image, PagedBlogCollection, PagedCollection,
    PopularArticles, Writer,
};

/// Operations the site consumes from the CMS.
///
/// Each call either returns the whole record or fails; there is no
/// partial-success shape.
#[async_trait]
pub trait CmsClient: Send + Sync {
    /// Fetch a single post
    async fn get_blog_by_id(&self, id: &str) -> Result<Blog, CmsError>;

    /// List every post identifier in one request
    async fn get_all_blogs(&self) -> Result<PagedCollection<BlogSummary>, CmsError>;

    /// Latest posts, newest first
    async fn get_blogs(&self, limit: usize) -> Result<PagedBlogCollection, CmsError>;

    async fn get_categories(&self) -> Result<PagedCollection<Category>, CmsError>;

    async fn get_popular_articles(&self) -> Result<PopularArticles, CmsError>;

    async fn get_banners(&self) -> Result<Banner, CmsError>;
}
