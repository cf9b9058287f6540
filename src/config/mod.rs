//! Configuration module

mod site;

pub use site::CmsConfig;
pub use site::CmsEndpoints;
pub use site::HighlightConfig;
pub use site::SiteConfig;
