//! In-memory CMS used by tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{
    Banner, Blog, BlogSummary, Category, CmsClient, CmsError, Image, PagedBlogCollection,
    PagedCollection, PopularArticles, Writer,
};

#[derive(Default)]
pub struct CallCounts {
    pub get_blog_by_id: AtomicUsize,
    pub get_all_blogs: AtomicUsize,
    pub get_blogs: AtomicUsize,
    pub get_categories: AtomicUsize,
    pub get_popular_articles: AtomicUsize,
    pub get_banners: AtomicUsize,
}

impl CallCounts {
    pub fn snapshot(&self) -> [usize; 6] {
        [
            self.get_blog_by_id.load(Ordering::SeqCst),
            self.get_all_blogs.load(Ordering::SeqCst),
            self.get_blogs.load(Ordering::SeqCst),
            self.get_categories.load(Ordering::SeqCst),
            self.get_popular_articles.load(Ordering::SeqCst),
            self.get_banners.load(Ordering::SeqCst),
        ]
    }
}

pub struct FakeCms {
    pub blogs: HashMap<String, Blog>,
    pub order: Vec<String>,
    pub fail_banner: bool,
    pub calls: CallCounts,
}

impl FakeCms {
    pub fn new(blogs: Vec<Blog>) -> Self {
        let order = blogs.iter().map(|b| b.id.clone()).collect();
        Self {
            blogs: blogs.into_iter().map(|b| (b.id.clone(), b)).collect(),
            order,
            fail_banner: false,
            calls: CallCounts::default(),
        }
    }

    fn summaries(&self) -> Vec<BlogSummary> {
        self.order
            .iter()
            .filter_map(|id| self.blogs.get(id))
            .map(|b| BlogSummary {
                id: b.id.clone(),
                title: b.title.clone(),
                ogimage: Some(b.ogimage.clone()),
                category: Some(b.category.clone()),
                created_at: Some(b.created_at.clone()),
            })
            .collect()
    }
}

pub fn blog(id: &str, title: &str, body: &str, toc_visible: bool) -> Blog {
    Blog {
        id: id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        category: Category {
            id: "c1".to_string(),
            name: "Rust".to_string(),
        },
        writer: Writer::Name("A".to_string()),
        created_at: "2024-01-01".to_string(),
        toc_visible,
        ogimage: Image {
            url: "https://img/x".to_string(),
            width: None,
            height: None,
        },
    }
}

fn unavailable(what: &str) -> CmsError {
    CmsError::Config(format!("fake cms has no {}", what))
}

#[async_trait]
impl CmsClient for FakeCms {
    async fn get_blog_by_id(&self, id: &str) -> Result<Blog, CmsError> {
        self.calls.get_blog_by_id.fetch_add(1, Ordering::SeqCst);
        self.blogs
            .get(id)
            .cloned()
            .ok_or_else(|| CmsError::Status {
                status: reqwest::StatusCode::NOT_FOUND,
                url: format!("fake://blog/{}", id),
            })
    }

    async fn get_all_blogs(&self) -> Result<PagedCollection<BlogSummary>, CmsError> {
        self.calls.get_all_blogs.fetch_add(1, Ordering::SeqCst);
        let contents = self.summaries();
        Ok(PagedCollection {
            total_count: contents.len(),
            offset: 0,
            limit: contents.len(),
            contents,
        })
    }

    async fn get_blogs(&self, limit: usize) -> Result<PagedBlogCollection, CmsError> {
        self.calls.get_blogs.fetch_add(1, Ordering::SeqCst);
        let all = self.summaries();
        let total_count = all.len();
        Ok(PagedCollection {
            contents: all.into_iter().take(limit).collect(),
            total_count,
            offset: 0,
            limit,
        })
    }

    async fn get_categories(&self) -> Result<PagedCollection<Category>, CmsError> {
        self.calls.get_categories.fetch_add(1, Ordering::SeqCst);
        Ok(PagedCollection {
            contents: vec![
                Category {
                    id: "c1".to_string(),
                    name: "Rust".to_string(),
                },
                Category {
                    id: "c2".to_string(),
                    name: "Web".to_string(),
                },
            ],
            total_count: 2,
            offset: 0,
            limit: 10,
        })
    }

    async fn get_popular_articles(&self) -> Result<PopularArticles, CmsError> {
        self.calls.get_popular_articles.fetch_add(1, Ordering::SeqCst);
        Ok(PopularArticles {
            articles: self.summaries().into_iter().rev().collect(),
        })
    }

    async fn get_banners(&self) -> Result<Banner, CmsError> {
        self.calls.get_banners.fetch_add(1, Ordering::SeqCst);
        if self.fail_banner {
            return Err(unavailable("banner"));
        }
        Ok(Banner {
            id: "b1".to_string(),
            image: Image {
                url: "https://img/banner".to_string(),
                width: Some(300),
                height: Some(250),
            },
            url: "https://example.com/promo".to_string(),
            alt: "Promo".to_string(),
        })
    }
}
