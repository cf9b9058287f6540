//! List site content

use anyhow::Result;

use crate::cms::CmsClient;
use crate::page::enumerate_paths;
use crate::BlogSite;

/// List CMS content by type
pub async fn run(site: &BlogSite, content_type: &str) -> Result<()> {
    let cms = site.cms_client()?;
    for line in list_lines(cms.as_ref(), content_type).await? {
        println!("{}", line);
    }
    Ok(())
}

async fn list_lines(cms: &dyn CmsClient, content_type: &str) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    match content_type {
        "path" | "paths" => {
            let paths = enumerate_paths(cms).await?;
            lines.push(format!("Paths ({}):", paths.paths.len()));
            for params in paths.paths {
                lines.push(format!("  /{}/", params.blog_id));
            }
        }
        "category" | "categories" => {
            let categories = cms.get_categories().await?;
            lines.push(format!("Categories ({}):", categories.contents.len()));
            for category in categories.contents {
                lines.push(format!("  {} [{}]", category.name, category.id));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: paths, categories",
                content_type
            );
        }
    }

    Ok(lines)
}
