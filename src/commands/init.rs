//! Initialize a new site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Site
title: Blog
description: ''
language: ja
timezone: Asia/Tokyo

# URL
url: http://example.com
root: /

# Directory
public_dir: public

# Date format
date_format: YYYY.MM.DD

# Detail page
latest_limit: 10
build_concurrency: 1

highlight:
  line_number: true
  theme: base16-ocean.dark

# CMS
## The API key can also be set with MICROCMS_API_KEY
cms:
  service_domain: ''
  api_key: ''
  timeout_secs: 30
  listing_limit: 100
  endpoints:
    blog: blog
    categories: categories
    popular_articles: popular-articles
    banner: banner
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        bail!("{:?} already exists", config_path);
    }
    fs::write(&config_path, DEFAULT_CONFIG)?;
    tracing::info!("Created: {:?}", config_path);

    Ok(())
}
