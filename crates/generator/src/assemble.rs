//! Page Assembler: fragment + route → complete HTML document.

use crate::document::{DocumentTemplate, Slot};
use chrono::{DateTime, Utc};
use prerender_kit_core::html::html_escape;
use prerender_kit_core::{PageMetadata, RouteDescriptor, SiteConfig, page_metadata};
use serde_json::{Map, Value};
use std::fmt;

/// Global the client reads to find out which route it is hydrating
pub const INITIAL_STATE_GLOBAL: &str = "window.__INITIAL_STATE__";

const MINUTE_MS: i64 = 60_000;

/// Cache-busting value for asset URLs: epoch milliseconds truncated to the minute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetVersion(i64);

impl AssetVersion {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis - millis.rem_euclid(MINUTE_MS))
    }

    pub fn at(time: DateTime<Utc>) -> Self {
        Self::from_millis(time.timestamp_millis())
    }

    pub fn now() -> Self {
        Self::at(Utc::now())
    }
}

impl fmt::Display for AssetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wraps rendered fragments into the bundler's HTML document
pub struct Assembler<'a> {
    site: &'a SiteConfig,
    document: DocumentTemplate,
    version: AssetVersion,
}

impl<'a> Assembler<'a> {
    /// Parse the base template once; asset URLs are versioned up front
    pub fn new(site: &'a SiteConfig, template_html: &str, version: AssetVersion) -> Self {
        let mut document = DocumentTemplate::parse(template_html);
        document.bust_asset_urls(&version.to_string());
        Self {
            site,
            document,
            version,
        }
    }

    pub fn version(&self) -> AssetVersion {
        self.version
    }

    pub fn missing_slots(&self) -> &[Slot] {
        self.document.missing_slots()
    }

    pub fn assemble_page(&self, fragment: &str, route: &RouteDescriptor) -> String {
        let PageMetadata { title, description } =
            page_metadata(route.page, &route.params, self.site);
        let title = html_escape(&title);
        let description = html_escape(&description);
        let canonical = html_escape(&self.site.canonical_url(&route.path));

        self.document.render(|slot| match slot {
            Slot::Title => format!("<title>{}</title>", title),
            Slot::Description => meta("name", "description", &description),
            Slot::OgTitle => meta("property", "og:title", &title),
            Slot::OgDescription => meta("property", "og:description", &description),
            Slot::OgUrl => meta("property", "og:url", &canonical),
            Slot::TwitterTitle => meta("name", "twitter:title", &title),
            Slot::TwitterDescription => meta("name", "twitter:description", &description),
            Slot::TwitterUrl => meta("name", "twitter:url", &canonical),
            Slot::Mount => fragment.to_string(),
            Slot::Hydration => format!(
                "<script>{} = {};</script>\n    ",
                INITIAL_STATE_GLOBAL,
                initial_state_json(route)
            ),
            Slot::Canonical => format!(r#"<link rel="canonical" href="{}">"#, canonical),
        })
    }
}

/// True for a document this tool wrote, as opposed to the bundler's template
pub fn is_prerendered(html: &str) -> bool {
    html.contains(INITIAL_STATE_GLOBAL)
}

/// Values passed in are already escaped
fn meta(attr: &str, key: &str, content: &str) -> String {
    format!(r#"<meta {}="{}" content="{}" />"#, attr, key, content)
}

/// `{"currentPage": ..., "routeParams": {...}}`, safe to embed in a `<script>`
pub fn initial_state_json(route: &RouteDescriptor) -> String {
    let params: Map<String, Value> = route
        .params
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();

    let mut state = Map::new();
    state.insert(
        "currentPage".to_string(),
        Value::String(route.page.as_str().to_string()),
    );
    state.insert("routeParams".to_string(), Value::Object(params));

    Value::Object(state)
        .to_string()
        .replace('<', "\\u003c")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}
