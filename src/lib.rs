//! blogpage-rs: static blog detail pages rendered from a headless CMS
//!
//! Posts, categories, banners and popular-article rankings come from a CMS
//! API. Each post becomes a pre-rendered detail page with a responsive cover
//! image, table of contents and sidebar; posts that were not pre-built are
//! generated on demand by the preview server.

pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod page;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cms::{CmsClient, HttpCmsClient};
use content::{ContentConverter, MarkdownRenderer};
use generator::Generator;

/// The main application
#[derive(Clone)]
pub struct BlogSite {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl BlogSite {
    /// Create a site from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env_overrides();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            public_dir,
        }
    }

    /// HTTP client for the configured CMS
    pub fn cms_client(&self) -> Result<Arc<dyn CmsClient>> {
        Ok(Arc::new(HttpCmsClient::new(&self.config.cms)?))
    }

    /// Markdown converter with the configured highlighting
    pub fn converter(&self) -> Arc<dyn ContentConverter> {
        Arc::new(MarkdownRenderer::with_options(
            &self.config.highlight.theme,
            self.config.highlight.line_number,
        ))
    }

    /// Generator wired to the configured CMS
    pub fn generator(&self) -> Result<Generator> {
        Generator::new(self, self.cms_client()?, self.converter())
    }

    /// Generate all detail pages
    pub async fn generate(&self) -> Result<usize> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
