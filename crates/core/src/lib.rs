pub mod config;
pub mod error;
pub mod html;
pub mod metadata;
pub mod types;

pub use config::{CmsConfig, SiteConfig, parse_site_toml, parse_site_toml_str};
pub use error::{Error, Result};
pub use metadata::{PageMetadata, page_metadata};
pub use types::*;
