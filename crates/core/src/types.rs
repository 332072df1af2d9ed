use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Which renderer branch and metadata record a route uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    Home,
    Product,
    Press,
    About,
    PressDetail,
    NotFound,
}

impl PageKind {
    pub const ALL: [PageKind; 6] = [
        PageKind::Home,
        PageKind::Product,
        PageKind::Press,
        PageKind::About,
        PageKind::PressDetail,
        PageKind::NotFound,
    ];

    /// Tag as it appears in hydration state and component file names
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Home => "home",
            PageKind::Product => "product",
            PageKind::Press => "press",
            PageKind::About => "about",
            PageKind::PressDetail => "press-detail",
            PageKind::NotFound => "not-found",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// Absolute URL path, unique within the route table
    pub path: String,
    pub page: PageKind,
    /// Only populated for detail routes
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl RouteDescriptor {
    pub fn new(path: impl Into<String>, page: PageKind) -> Self {
        Self {
            path: path.into(),
            page,
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Output file for this route, relative to the output directory.
    ///
    /// `/` maps to `index.html`, `/press/x` to `press/x/index.html`.
    pub fn output_file(&self) -> PathBuf {
        let trimmed = self.path.trim_matches('/');
        if trimmed.is_empty() {
            PathBuf::from("index.html")
        } else {
            trimmed.split('/').collect::<PathBuf>().join("index.html")
        }
    }
}

/// A press release as delivered by the content source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: String,
    /// ISO date (`YYYY-MM-DD`)
    pub date: String,
    #[serde(default)]
    pub excerpt: String,
    /// Pre-rendered HTML
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl ContentRecord {
    /// Stable identifier used in `/press/{key}` paths: uid, else slug
    pub fn route_key(&self) -> Option<&str> {
        [self.uid.as_deref(), self.slug.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }

    /// Human readable date, e.g. "March 4, 2025". Falls back to the raw string.
    pub fn display_date(&self) -> String {
        match NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            Ok(date) => date.format("%B %-d, %Y").to_string(),
            Err(_) => self.date.clone(),
        }
    }
}

/// Whether a content key can safely become a single path segment.
///
/// Accepts lowercase ASCII alphanumerics, `-` and `_`.
pub fn is_safe_slug(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Page,
    NotFoundPage,
    Sitemap,
    Robots,
    NetlifyRedirects,
    Htaccess,
    HashRedirect,
}

/// A file written by a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    /// Relative to the output directory
    pub path: PathBuf,
}

impl GeneratedArtifact {
    pub fn new(kind: ArtifactKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}
