//! Content Source Adapter.
//!
//! Press releases come from a remote content API. When that fails for any
//! reason the bundled dataset is used instead, all or nothing.

pub mod cms;
pub mod fallback;
pub mod richtext;

use async_trait::async_trait;
use log::{info, warn};
use prerender_kit_core::ContentRecord;
use thiserror::Error;

pub use cms::CmsClient;
pub use fallback::fallback_records;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Content API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed content API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Content conversion failed: {0}")]
    Conversion(String),
}

/// Anything that can list press releases
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Human readable name used in log lines
    fn name(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<ContentRecord>, ContentError>;
}

/// Fetch press releases, newest first.
///
/// Exactly one attempt is made against `source`. Any error is logged and the
/// bundled fallback dataset is returned in its place.
pub async fn fetch_content_records(source: &dyn ContentSource) -> Vec<ContentRecord> {
    match source.fetch().await {
        Ok(mut records) => {
            sort_newest_first(&mut records);
            info!(target: "content", "Fetched {} press releases from {}", records.len(), source.name());
            records
        }
        Err(err) => {
            warn!(target: "content", "Fetching from {} failed: {}", source.name(), err);
            let records = fallback_records();
            warn!(target: "content", "Using bundled fallback dataset ({} press releases)", records.len());
            records
        }
    }
}

/// ISO dates sort lexicographically; ties keep their original order.
fn sort_newest_first(records: &mut [ContentRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}
