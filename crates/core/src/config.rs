use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the content API endpoint (required)
pub const CMS_ENDPOINT_VAR: &str = "CMS_API_ENDPOINT";
/// Environment variable holding the content API access token (optional)
pub const CMS_TOKEN_VAR: &str = "CMS_ACCESS_TOKEN";

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    site: RawSite,
    #[serde(default)]
    build: RawBuild,
}

#[derive(Debug, Deserialize)]
struct RawSite {
    name: String,
    base_url: String,
    tagline: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBuild {
    #[serde(default = "default_template")]
    template: String,
    #[serde(default = "default_output")]
    output: String,
    components: Option<String>,
}

impl Default for RawBuild {
    fn default() -> Self {
        Self {
            template: default_template(),
            output: default_output(),
            components: None,
        }
    }
}

fn default_template() -> String {
    "dist/index.html".to_string()
}

fn default_output() -> String {
    "dist".to_string()
}

/// Validated site configuration. Built once per run and passed by reference.
#[derive(Debug, Clone, Serialize)]
pub struct SiteConfig {
    pub name: String,
    /// Absolute origin without trailing slash, e.g. `https://www.example.com`
    pub base_url: String,
    pub tagline: String,
    pub description: String,
    /// Paths below are relative to the site directory
    pub template: PathBuf,
    pub output: PathBuf,
    pub components: Option<PathBuf>,
}

impl SiteConfig {
    /// Absolute canonical URL for a route path
    pub fn canonical_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

/// Content API settings, read from the environment once at start-up
#[derive(Clone, PartialEq, Eq)]
pub struct CmsConfig {
    pub endpoint: String,
    pub access_token: Option<String>,
}

impl std::fmt::Debug for CmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsConfig")
            .field("endpoint", &self.endpoint)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CmsConfig {
    /// Read from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// A missing or blank endpoint is `Error::MissingConfig`; the token is optional.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(CMS_ENDPOINT_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::MissingConfig(format!("{} is not set", CMS_ENDPOINT_VAR)))?;

        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(Error::ConfigParse(format!(
                "{} must be an http(s) URL, got '{}'",
                CMS_ENDPOINT_VAR, endpoint
            )));
        }

        let access_token = lookup(CMS_TOKEN_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Ok(Self {
            endpoint,
            access_token,
        })
    }
}

/// Parse site.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<SiteConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let base_url = raw.site.base_url.trim().trim_end_matches('/').to_string();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(Error::ConfigParse(format!(
            "site.base_url must start with http:// or https://, got '{}'",
            raw.site.base_url
        )));
    }

    if raw.site.name.trim().is_empty() {
        return Err(Error::ConfigParse("site.name must not be empty".to_string()));
    }

    let components = match raw.build.components {
        Some(dir) => Some(validate_path(&dir, "build.components")?),
        None => None,
    };

    let tagline = raw
        .site
        .tagline
        .unwrap_or_else(|| "Technology that works for everyone".to_string());
    let description = raw
        .site
        .description
        .unwrap_or_else(|| format!("{} builds accessible products for every team.", raw.site.name));

    Ok(SiteConfig {
        template: validate_path(&raw.build.template, "build.template")?,
        output: validate_path(&raw.build.output, "build.output")?,
        components,
        name: raw.site.name,
        base_url,
        tagline,
        description,
    })
}

/// Validate and convert a path string to PathBuf.
///
/// This function prevents path traversal by rejecting:
/// - Absolute paths (starting with `/` or Windows drive letters)
/// - Paths containing parent directory references (`..`)
///
/// # Examples
///
/// ```text
/// validate_path("dist/index.html", "build.template")  → Ok(PathBuf)
/// validate_path("/etc/passwd", "build.template")  → Err("Absolute paths not allowed...")
/// validate_path("../public", "build.output")  → Err("Parent directory references...")
/// ```
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    let path = Path::new(path_str);

    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(Error::ConfigParse(format!(
                "Parent directory references (..) not allowed in '{}': '{}'",
                field_name, path_str
            )));
        }
    }

    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    Ok(path.to_path_buf())
}
