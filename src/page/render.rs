//! Detail page rendering

use anyhow::Result;
use tera::Context;

use super::DetailViewModel;
use crate::cms::{BlogSummary, Category};
use crate::config::SiteConfig;
use crate::helpers::{
    blog_path, blog_url, category_path, cms_date_display, cover_image, resized, share_links,
    summarize, url_for,
};
use crate::templates::{BreadcrumbItem, MetaData, SidebarPost, SiteData, TemplateRenderer};

/// Length of the generated `<meta name="description">`
const DESCRIPTION_LENGTH: usize = 120;

/// Width requested for sidebar thumbnails
const THUMBNAIL_WIDTH: u32 = 240;

/// What the detail page shows
#[derive(Debug)]
pub enum PageState {
    /// The page was not pre-built and its data is still being fetched
    Loading,
    Ready(DetailViewModel),
}

/// Renders detail pages with the embedded templates
pub struct DetailRenderer {
    renderer: TemplateRenderer,
    config: SiteConfig,
}

impl DetailRenderer {
    pub fn new(config: SiteConfig) -> Result<Self> {
        Ok(Self {
            renderer: TemplateRenderer::new()?,
            config,
        })
    }

    pub fn render(&self, state: &PageState) -> Result<String> {
        match state {
            PageState::Loading => self.render_loading(),
            PageState::Ready(model) => self.render_ready(model),
        }
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(&self.config));
        context.insert("home_path", &url_for(&self.config, "/"));
        context
    }

    fn render_loading(&self) -> Result<String> {
        let mut context = self.base_context();
        context.insert("page_title", &self.config.title);
        context.insert("refresh_secs", &1);
        self.renderer.render("loading.html", &context)
    }

    fn render_ready(&self, model: &DetailViewModel) -> Result<String> {
        let config = &self.config;
        let blog = &model.blog;
        let tz = config.tz();

        let (date, datetime) = cms_date_display(&blog.created_at, &tz, &config.date_format);
        let meta = MetaData {
            author: blog.writer.name().to_string(),
            category: category_label(&blog.category),
            category_path: category_path(config, &blog.category.id),
            date,
            datetime,
        };

        let breadcrumb = vec![
            BreadcrumbItem {
                label: "Home".to_string(),
                path: url_for(config, "/"),
            },
            BreadcrumbItem {
                label: category_label(&blog.category),
                path: category_path(config, &blog.category.id),
            },
        ];

        let categories: Vec<BreadcrumbItem> = model
            .categories
            .contents
            .iter()
            .map(|c| BreadcrumbItem {
                label: category_label(c),
                path: category_path(config, &c.id),
            })
            .collect();

        let popular = self.sidebar_posts(&model.popular_articles.articles);
        let latest = self.sidebar_posts(&model.blogs.contents);

        let mut context = self.base_context();
        context.insert("page_title", &format!("{} | {}", blog.title, config.title));
        context.insert("description", &summarize(&model.body, DESCRIPTION_LENGTH));
        context.insert("canonical_url", &blog_url(config, &blog.id));
        context.insert("blog", blog);
        context.insert("cover", &cover_image(&blog.ogimage.url));
        context.insert("breadcrumb", &breadcrumb);
        context.insert("share", &share_links(config, &blog.id, &blog.title));
        context.insert("meta", &meta);
        context.insert("show_toc", &blog.toc_visible);
        context.insert("toc", &model.toc);
        context.insert("body", &model.body);
        context.insert("banner", &model.banner);
        context.insert("categories", &categories);
        context.insert("popular", &popular);
        context.insert("latest", &latest);

        self.renderer.render("detail.html", &context)
    }

    fn sidebar_posts(&self, posts: &[BlogSummary]) -> Vec<SidebarPost> {
        let tz = self.config.tz();
        posts
            .iter()
            .map(|p| SidebarPost {
                title: p.title.clone(),
                path: blog_path(&self.config, &p.id),
                thumbnail: p
                    .ogimage
                    .as_ref()
                    .map(|img| resized(&img.url, THUMBNAIL_WIDTH, "webp")),
                date: p
                    .created_at
                    .as_deref()
                    .map(|raw| cms_date_display(raw, &tz, &self.config.date_format).0),
            })
            .collect()
    }
}

/// Category name, or its id when the reference was not expanded
fn category_label(category: &Category) -> String {
    if category.name.is_empty() {
        category.id.clone()
    } else {
        category.name.clone()
    }
}
