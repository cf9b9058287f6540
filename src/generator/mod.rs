//! Generator module - builds detail pages into the public directory

use anyhow::{bail, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::cms::CmsClient;
use crate::content::ContentConverter;
use crate::page::{assemble, enumerate_paths, DetailRenderer, PageState};
use crate::BlogSite;

/// File served while an on-demand build is running
pub const FALLBACK_FILE: &str = "_fallback.html";

/// Distinguishes concurrent writers' temporary files
static TMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Static detail page generator
pub struct Generator {
    public_dir: PathBuf,
    latest_limit: usize,
    concurrency: usize,
    cms: Arc<dyn CmsClient>,
    converter: Arc<dyn ContentConverter>,
    renderer: DetailRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(
        site: &BlogSite,
        cms: Arc<dyn CmsClient>,
        converter: Arc<dyn ContentConverter>,
    ) -> Result<Self> {
        Ok(Self {
            public_dir: site.public_dir.clone(),
            latest_limit: site.config.latest_limit,
            concurrency: site.config.build_concurrency.max(1),
            cms,
            converter,
            renderer: DetailRenderer::new(site.config.clone())?,
        })
    }

    /// Build every page the CMS lists, plus the fallback page.
    ///
    /// Returns the number of detail pages written. Any failed page fails the
    /// whole build.
    pub async fn generate(&self) -> Result<usize> {
        tokio::fs::create_dir_all(&self.public_dir).await?;

        let paths = enumerate_paths(self.cms.as_ref()).await?;
        tracing::info!("Building {} detail pages", paths.paths.len());

        self.write_fallback().await?;

        let written: Vec<PathBuf> = stream::iter(paths.paths.iter())
            .map(|params| self.generate_page(&params.blog_id))
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await?;

        Ok(written.len())
    }

    /// Assemble, render and write one detail page
    pub async fn generate_page(&self, blog_id: &str) -> Result<PathBuf> {
        let output_path = self.page_output_path(blog_id)?;

        let model = assemble(
            self.cms.as_ref(),
            self.converter.as_ref(),
            Some(blog_id),
            self.latest_limit,
        )
        .await?;
        let html = self.renderer.render(&PageState::Ready(model))?;

        write_file(&output_path, &html).await?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(output_path)
    }

    /// Markup shown while a page is not built yet
    pub fn render_loading(&self) -> Result<String> {
        self.renderer.render(&PageState::Loading)
    }

    /// Where the page for `blog_id` is written
    pub fn page_output_path(&self, blog_id: &str) -> Result<PathBuf> {
        if !is_safe_blog_id(blog_id) {
            bail!("Refusing to build page for blog id {:?}", blog_id);
        }
        Ok(self.public_dir.join(blog_id).join("index.html"))
    }

    async fn write_fallback(&self) -> Result<()> {
        let html = self.render_loading()?;
        write_file(&self.public_dir.join(FALLBACK_FILE), &html).await
    }
}

/// Whether `blog_id` can be used as a single directory name
pub fn is_safe_blog_id(blog_id: &str) -> bool {
    !blog_id.is_empty()
        && blog_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Write `content` to `path` through a sibling temporary file, so readers
/// only ever see the old file or the complete new one
async fn write_file(path: &Path, content: &str) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    tokio::fs::create_dir_all(parent).await?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = parent.join(format!(
        ".{}.{}-{}.tmp",
        file_name,
        std::process::id(),
        TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    if let Err(e) = tokio::fs::write(&tmp_path, content).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(e.into());
    }
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(e.into());
    }
    Ok(())
}
