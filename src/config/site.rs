//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable overriding `cms.api_key`
pub const API_KEY_ENV: &str = "MICROCMS_API_KEY";

/// Environment variable overriding `cms.service_domain`
pub const SERVICE_DOMAIN_ENV: &str = "MICROCMS_SERVICE_DOMAIN";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,
    pub timezone: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,

    // Date format (Moment.js style)
    pub date_format: String,

    // Detail page
    pub latest_limit: usize,
    pub build_concurrency: usize,

    #[serde(default)]
    pub highlight: HighlightConfig,

    #[serde(default)]
    pub cms: CmsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            language: "ja".to_string(),
            timezone: "Asia/Tokyo".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),

            date_format: "YYYY.MM.DD".to_string(),

            latest_limit: crate::page::DEFAULT_LATEST_LIMIT,
            build_concurrency: 1,

            highlight: HighlightConfig::default(),
            cms: CmsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply CMS credentials from the environment, if set
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                self.cms.api_key = key;
                tracing::debug!("Using CMS API key from {}", API_KEY_ENV);
            }
        }
        if let Ok(domain) = std::env::var(SERVICE_DOMAIN_ENV) {
            if !domain.is_empty() {
                self.cms.service_domain = domain;
            }
        }
    }

    /// Parsed display timezone, falling back to UTC for unknown names
    pub fn tz(&self) -> chrono_tz::Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown timezone {:?}, using UTC", self.timezone);
            chrono_tz::UTC
        })
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub line_number: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            line_number: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

/// Headless CMS connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Service subdomain, expanded to `https://<domain>.microcms.io/api/v1`
    pub service_domain: String,
    /// Explicit API base URL, takes precedence over `service_domain`
    pub endpoint: Option<String>,
    pub api_key: String,
    pub timeout_secs: u64,
    /// `limit` sent with the id listing used for path enumeration
    pub listing_limit: usize,
    #[serde(default)]
    pub endpoints: CmsEndpoints,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            service_domain: String::new(),
            endpoint: None,
            api_key: String::new(),
            timeout_secs: 30,
            listing_limit: 100,
            endpoints: CmsEndpoints::default(),
        }
    }
}

impl CmsConfig {
    /// Resolve the API base URL without a trailing slash
    pub fn base_url(&self) -> Option<String> {
        match &self.endpoint {
            Some(endpoint) if !endpoint.is_empty() => {
                Some(endpoint.trim_end_matches('/').to_string())
            }
            _ if !self.service_domain.is_empty() => Some(format!(
                "https://{}.microcms.io/api/v1",
                self.service_domain
            )),
            _ => None,
        }
    }
}

/// API endpoint names on the CMS
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsEndpoints {
    pub blog: String,
    pub categories: String,
    pub popular_articles: String,
    pub banner: String,
}

impl Default for CmsEndpoints {
    fn default() -> Self {
        Self {
            blog: "blog".to_string(),
            categories: "categories".to_string(),
            popular_articles: "popular-articles".to_string(),
            banner: "banner".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Blog");
        assert_eq!(config.latest_limit, 10);
        assert_eq!(config.cms.endpoints.blog, "blog");
        assert_eq!(config.cms.base_url(), None);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
url: https://blog.example.com
latest_limit: 5
cms:
  service_domain: myblog
  endpoints:
    banner: banners
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.latest_limit, 5);
        assert_eq!(config.timezone, "Asia/Tokyo");
        assert_eq!(config.cms.endpoints.banner, "banners");
        assert_eq!(config.cms.endpoints.categories, "categories");
        assert_eq!(
            config.cms.base_url().as_deref(),
            Some("https://myblog.microcms.io/api/v1")
        );
    }

    #[test]
    fn test_explicit_endpoint_wins() {
        let mut cms = CmsConfig {
            service_domain: "ignored".to_string(),
            endpoint: Some("http://localhost:9000/api/".to_string()),
            ..CmsConfig::default()
        };
        assert_eq!(cms.base_url().as_deref(), Some("http://localhost:9000/api"));

        cms.endpoint = Some(String::new());
        assert_eq!(
            cms.base_url().as_deref(),
            Some("https://ignored.microcms.io/api/v1")
        );
    }

    #[test]
    fn test_unknown_timezone_falls_back_to_utc() {
        let config = SiteConfig {
            timezone: "Mars/Olympus".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(config.tz(), chrono_tz::UTC);
    }
}
