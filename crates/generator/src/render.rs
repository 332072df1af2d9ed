//! Template Renderer: route + records → body fragment.

use crate::error::{GenerateError, Result};
use crate::pages;
use crate::routes::press_path;
use crate::template::Template;
use log::debug;
use prerender_kit_core::{ContentRecord, PageKind, RouteDescriptor, SiteConfig};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Read `{page}.html` component overrides from `dir`.
///
/// Pages without a file keep their built-in markup. A component that fails to
/// parse is an error.
pub fn load_components(dir: &Path) -> Result<HashMap<PageKind, Template>> {
    let mut components = HashMap::new();

    for page in PageKind::ALL {
        let path = dir.join(format!("{}.html", page.as_str()));
        if !path.is_file() {
            continue;
        }

        let source = fs::read_to_string(&path).map_err(|e| GenerateError::io(&path, e))?;
        let template = Template::parse(&source).map_err(|source| GenerateError::Template {
            path: path.clone(),
            source,
        })?;
        debug!(target: "build", "Loaded component {}", path.display());
        components.insert(page, template);
    }

    Ok(components)
}

pub struct Renderer<'a> {
    site: &'a SiteConfig,
    components: HashMap<PageKind, Template>,
}

impl<'a> Renderer<'a> {
    pub fn new(site: &'a SiteConfig) -> Self {
        Self {
            site,
            components: HashMap::new(),
        }
    }

    pub fn with_components(mut self, components: HashMap<PageKind, Template>) -> Self {
        self.components = components;
        self
    }

    /// Body markup for `route`, header and footer included
    pub fn render_fragment(&self, route: &RouteDescriptor, records: &[ContentRecord]) -> String {
        let body = match self.components.get(&route.page) {
            Some(template) => template.render(&self.scope(route, records)),
            None => self.builtin(route, records),
        };

        format!(
            "{}\n<main id=\"main-content\">\n{}\n</main>\n{}",
            pages::header(self.site, route.page),
            body,
            pages::footer(self.site)
        )
    }

    fn builtin(&self, route: &RouteDescriptor, records: &[ContentRecord]) -> String {
        match route.page {
            PageKind::Home => pages::home(self.site),
            PageKind::Product => pages::product(self.site),
            PageKind::Press => pages::press_list(records),
            PageKind::About => pages::about(self.site),
            PageKind::PressDetail => pages::press_detail(route.param("uid").unwrap_or(""), records),
            PageKind::NotFound => pages::not_found(),
        }
    }

    /// Data visible to component templates
    fn scope(&self, route: &RouteDescriptor, records: &[ContentRecord]) -> Value {
        let releases: Vec<Value> = records
            .iter()
            .filter_map(|record| record.route_key().map(|key| release_value(record, key)))
            .collect();

        let release = route
            .param("uid")
            .and_then(|uid| records.iter().find(|r| r.route_key() == Some(uid)))
            .and_then(|record| record.route_key().map(|key| release_value(record, key)))
            .unwrap_or(Value::Null);

        json!({
            "site": self.site,
            "page": route.page.as_str(),
            "params": route.params,
            "has_releases": !releases.is_empty(),
            "releases": releases,
            "release": release,
        })
    }
}

fn release_value(record: &ContentRecord, key: &str) -> Value {
    let mut value = serde_json::to_value(record).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut value {
        map.insert("path".to_string(), Value::String(press_path(key)));
        map.insert(
            "display_date".to_string(),
            Value::String(record.display_date()),
        );
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{record, site};
    use tempfile::TempDir;

    fn records() -> Vec<ContentRecord> {
        let mut featured = record("series-a", "Series A", "2025-04-01");
        featured.featured = true;
        vec![featured, record("launch", "Launch", "2024-03-12")]
    }

    #[test]
    fn test_every_page_has_shared_chrome() {
        let site = site();
        let renderer = Renderer::new(&site);
        for page in PageKind::ALL {
            let route = RouteDescriptor::new("/x", page);
            let html = renderer.render_fragment(&route, &records());
            assert!(html.contains(r#"class="site-header""#), "{}", page);
            assert!(html.contains(r#"class="site-footer""#), "{}", page);
        }
    }

    #[test]
    fn test_press_detail_uses_uid_param() {
        let site = site();
        let renderer = Renderer::new(&site);
        let route = RouteDescriptor::new("/press/launch", PageKind::PressDetail)
            .with_param("uid", "launch");
        let html = renderer.render_fragment(&route, &records());
        assert!(html.contains("<p>Launch body</p>"));
        assert!(!html.contains("Series A body"));
    }

    #[test]
    fn test_component_overrides_builtin() {
        let site = site();
        let mut components = HashMap::new();
        components.insert(
            PageKind::Press,
            Template::parse(
                "<h1>{site.name} news</h1>{#if has_releases}<ul>{#each releases as r}<li{#if r.featured} class=\"top\"{/if}><a href=\"{r.path}\">{r.title}</a> {r.display_date}</li>{/each}</ul>{/if}",
            )
            .unwrap(),
        );
        let renderer = Renderer::new(&site).with_components(components);
        let route = RouteDescriptor::new("/press", PageKind::Press);

        let html = renderer.render_fragment(&route, &records());
        assert!(html.contains("<h1>Northwind news</h1>"));
        assert!(html.contains(
            r#"<li class="top"><a href="/press/series-a">Series A</a> April 1, 2025</li>"#
        ));
        assert!(html.contains(r#"<li><a href="/press/launch">Launch</a> March 12, 2024</li>"#));
        assert!(!html.contains("No press releases yet"));

        let empty = renderer.render_fragment(&route, &[]);
        assert!(empty.contains("<h1>Northwind news</h1>\n</main>"));
        assert!(!empty.contains("/press/launch"));
        assert!(!empty.contains("No press releases yet"));
    }

    #[test]
    fn test_component_sees_current_release() {
        let site = site();
        let mut components = HashMap::new();
        components.insert(
            PageKind::PressDetail,
            Template::parse("<h1>{release.title}</h1>{release.content}|{params.uid}").unwrap(),
        );
        let renderer = Renderer::new(&site).with_components(components);
        let route = RouteDescriptor::new("/press/launch", PageKind::PressDetail)
            .with_param("uid", "launch");
        let html = renderer.render_fragment(&route, &records());
        assert!(html.contains("<h1>Launch</h1><p>Launch body</p>|launch"));
    }

    #[test]
    fn test_load_components() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("about.html"), "<p>{site.tagline}</p>").unwrap();
        fs::write(dir.path().join("unrelated.html"), "{#if x}").unwrap();

        let components = load_components(dir.path()).unwrap();
        assert_eq!(components.len(), 1);
        assert!(components.contains_key(&PageKind::About));
    }

    #[test]
    fn test_load_components_rejects_malformed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("home.html"), "{#each items as i}never closed").unwrap();

        let err = load_components(dir.path()).unwrap_err();
        assert!(matches!(err, GenerateError::Template { .. }));
        assert!(err.to_string().contains("home.html"));
    }
}
