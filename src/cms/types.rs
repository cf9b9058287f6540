//! Records returned by the CMS API

use serde::{Deserialize, Serialize};

/// An image asset hosted on the CMS image service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// A blog category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    /// Empty when the reference was not expanded by the API
    #[serde(default)]
    pub name: String,
}

/// Post author, either a bare name or an expanded profile reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Writer {
    Name(String),
    Profile {
        #[serde(default)]
        id: String,
        name: String,
        #[serde(default)]
        image: Option<Image>,
    },
}

impl Writer {
    pub fn name(&self) -> &str {
        match self {
            Writer::Name(name) => name,
            Writer::Profile { name, .. } => name,
        }
    }
}

/// A single blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub id: String,
    pub title: String,
    /// Raw post body (Markdown)
    pub body: String,
    pub category: Category,
    pub writer: Writer,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// Whether the table of contents is shown on the detail page
    pub toc_visible: bool,
    /// Cover image
    pub ogimage: Image,
}

/// The listing shape of a post, as returned by collection endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogSummary {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ogimage: Option<Image>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

/// A page of records from a list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedCollection<T> {
    pub contents: Vec<T>,
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub limit: usize,
}

pub type PagedBlogCollection = PagedCollection<BlogSummary>;

/// Editorially ranked posts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularArticles {
    #[serde(default)]
    pub articles: Vec<BlogSummary>,
}

/// Promotional sidebar banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    #[serde(default)]
    pub id: String,
    pub image: Image,
    pub url: String,
    #[serde(default)]
    pub alt: String,
}
