//! Page module - the blog detail page
//!
//! [`enumerate_paths`] decides which pages are built ahead of time,
//! [`assemble`] gathers one page's data and [`DetailRenderer`] turns a
//! [`PageState`] into HTML.

mod assemble;
mod paths;
mod render;

pub use assemble::{
    assemble, resolve_blog_id, DetailViewModel, DEFAULT_BLOG_ID, DEFAULT_LATEST_LIMIT,
};
pub use paths::{enumerate_paths, PathParams, StaticPaths};
pub use render::{DetailRenderer, PageState};
