//! REST client for a microCMS-style content API

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::types::{
    Banner, Blog, BlogSummary, Category, PagedBlogCollection, PagedCollection, PopularArticles,
};
use super::{CmsClient, CmsError};
use crate::config::{CmsConfig, CmsEndpoints};

/// Header carrying the API key
const API_KEY_HEADER: &str = "X-MICROCMS-API-KEY";

/// CMS client backed by HTTP
pub struct HttpCmsClient {
    client: reqwest::Client,
    base_url: String,
    endpoints: CmsEndpoints,
    listing_limit: usize,
}

impl HttpCmsClient {
    /// Build a client from the `cms` section of the site config
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        let base_url = config.base_url().ok_or_else(|| {
            CmsError::Config("set cms.service_domain or cms.endpoint".to_string())
        })?;

        let mut headers = HeaderMap::new();
        if !config.api_key.is_empty() {
            let value = HeaderValue::from_str(&config.api_key)
                .map_err(|_| CmsError::Config("api key is not a valid header".to_string()))?;
            headers.insert(API_KEY_HEADER, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CmsError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            endpoints: config.endpoints.clone(),
            listing_limit: config.listing_limit,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CmsError> {
        let url = self.url(path);
        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| CmsError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status { status, url });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| CmsError::Decode { url, source })
    }
}

#[async_trait]
impl CmsClient for HttpCmsClient {
    async fn get_blog_by_id(&self, id: &str) -> Result<Blog, CmsError> {
        let path = format!("{}/{}", self.endpoints.blog, id);
        self.get_json(&path, &[]).await
    }

    async fn get_all_blogs(&self) -> Result<PagedCollection<BlogSummary>, CmsError> {
        let query = [
            ("fields", "id".to_string()),
            ("limit", self.listing_limit.to_string()),
        ];
        self.get_json(&self.endpoints.blog, &query).await
    }

    async fn get_blogs(&self, limit: usize) -> Result<PagedBlogCollection, CmsError> {
        self.get_json(&self.endpoints.blog, &[("limit", limit.to_string())])
            .await
    }

    async fn get_categories(&self) -> Result<PagedCollection<Category>, CmsError> {
        self.get_json(&self.endpoints.categories, &[]).await
    }

    async fn get_popular_articles(&self) -> Result<PopularArticles, CmsError> {
        self.get_json(&self.endpoints.popular_articles, &[]).await
    }

    async fn get_banners(&self) -> Result<Banner, CmsError> {
        self.get_json(&self.endpoints.banner, &[]).await
    }
}
