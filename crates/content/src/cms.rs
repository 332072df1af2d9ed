//! Remote content API client.

use crate::richtext::RichField;
use crate::{ContentError, ContentSource};
use async_trait::async_trait;
use log::{debug, warn};
use prerender_kit_core::{CmsConfig, ContentRecord};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;

/// Document type queried for press releases
pub const PRESS_RELEASE_TYPE: &str = "press_release";

/// Content API client
pub struct CmsClient {
    client: reqwest::Client,
    endpoint: String,
}

/// Search response wrapper
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<RawDocument>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    id: String,
    uid: Option<String>,
    #[serde(default)]
    slugs: Vec<String>,
    last_publication_date: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    data: RawPressRelease,
}

#[derive(Debug, Deserialize)]
struct RawPressRelease {
    title: Option<RichField>,
    date: Option<String>,
    excerpt: Option<RichField>,
    content: Option<RichField>,
    author: Option<String>,
    featured_image: Option<RawImage>,
    #[serde(default)]
    featured: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    url: Option<String>,
}

impl CmsClient {
    pub fn new(config: &CmsConfig) -> Result<Self, ContentError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.access_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ContentError::Conversion(format!("Invalid access token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("prerender-kit/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl ContentSource for CmsClient {
    fn name(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(&self) -> Result<Vec<ContentRecord>, ContentError> {
        debug!(target: "content", "GET {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("type", PRESS_RELEASE_TYPE),
                ("orderings", "[my.press_release.date desc]"),
                ("pageSize", "100"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ContentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_search_response(&body)
    }
}

/// Decode a search response body into content records
pub fn parse_search_response(body: &str) -> Result<Vec<ContentRecord>, ContentError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.results.into_iter().map(into_record).collect())
}

fn into_record(doc: RawDocument) -> ContentRecord {
    let data = doc.data;

    let content = match data.content {
        Some(field) => field.to_html().unwrap_or_else(|err| {
            warn!(target: "content", "Press release {}: {}; content left empty", doc.id, err);
            String::new()
        }),
        None => String::new(),
    };

    ContentRecord {
        uid: doc.uid,
        slug: doc.slugs.into_iter().next(),
        title: data
            .title
            .map(|t| t.to_plain_text())
            .unwrap_or_default(),
        date: data.date.unwrap_or_default(),
        excerpt: data
            .excerpt
            .map(|e| e.to_plain_text())
            .unwrap_or_default(),
        content,
        author: data.author,
        featured_image: data.featured_image.and_then(|img| img.url),
        tags: doc.tags.into_iter().collect(),
        featured: data.featured.unwrap_or(false),
        last_modified: doc.last_publication_date,
        id: doc.id,
    }
}
