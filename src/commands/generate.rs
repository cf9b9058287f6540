//! Generate static files

use anyhow::Result;

use crate::BlogSite;

/// Build every listed detail page into the public directory
pub async fn run(site: &BlogSite) -> Result<usize> {
    let start = std::time::Instant::now();

    let generator = site.generator()?;
    let count = generator.generate().await?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages in {:.2}s",
        count,
        duration.as_secs_f64()
    );

    Ok(count)
}
