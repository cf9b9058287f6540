//! CMS client errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("CMS is not configured: {0}")]
    Config(String),

    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("CMS returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
