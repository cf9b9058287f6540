//! Pre-build path enumeration

use anyhow::Result;
use serde::Serialize;

use crate::cms::CmsClient;

/// Route parameters of one pre-built detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathParams {
    pub blog_id: String,
}

/// The set of detail pages to build ahead of time.
///
/// With `fallback` set, identifiers missing here are still served: the
/// server shows the loading page and builds them on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticPaths {
    pub paths: Vec<PathParams>,
    pub fallback: bool,
}

/// List every post the CMS returns from a single listing call.
///
/// Posts beyond what that call returns are not pre-built; they are reached
/// through the fallback path instead.
pub async fn enumerate_paths(cms: &dyn CmsClient) -> Result<StaticPaths> {
    let blogs = cms.get_all_blogs().await?;

    if blogs.total_count > blogs.contents.len() {
        tracing::warn!(
            "CMS listed {} of {} posts; the rest will be built on demand",
            blogs.contents.len(),
            blogs.total_count
        );
    }

    let paths = blogs
        .contents
        .into_iter()
        .map(|blog| PathParams { blog_id: blog.id })
        .collect();

    Ok(StaticPaths {
        paths,
        fallback: true,
    })
}
