//! Legacy `#fragment` URLs, served as static redirect pages under `/hash/`.

use crate::routes::press_path;
use prerender_kit_core::html::html_escape;
use prerender_kit_core::{PageKind, RouteDescriptor, SiteConfig};
use serde_json::json;

/// Fragments the old single-page site used, with their current paths
const LEGACY_FRAGMENTS: &[(&str, &str)] = &[
    ("home", "/"),
    ("product", "/product"),
    ("press", "/press"),
    ("about", "/about"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashRedirect {
    /// Fragment without `#`, e.g. `press/seed-funding`
    pub fragment: String,
    /// Current path the fragment maps to
    pub target: String,
}

impl HashRedirect {
    pub fn new(fragment: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            target: target.into(),
        }
    }

    pub(crate) fn source_path(&self) -> String {
        format!("/hash/{}", self.fragment)
    }

    pub fn output_file(&self) -> String {
        format!("hash/{}/index.html", self.fragment)
    }
}

/// Fixed legacy fragments plus one per press release
pub fn hash_redirects(routes: &[RouteDescriptor]) -> Vec<HashRedirect> {
    let fixed = LEGACY_FRAGMENTS
        .iter()
        .map(|(fragment, target)| HashRedirect::new(*fragment, *target));

    let releases = routes
        .iter()
        .filter(|r| r.page == PageKind::PressDetail)
        .filter_map(|r| r.param("uid"))
        .map(|uid| HashRedirect::new(format!("press/{}", uid), press_path(uid)));

    fixed.chain(releases).collect()
}

pub fn render_hash_page(site: &SiteConfig, redirect: &HashRedirect) -> String {
    let canonical = site.canonical_url(&redirect.target);
    let structured = json!({
        "@context": "https://schema.org",
        "@type": "WebPage",
        "name": site.name,
        "url": canonical,
    });
    let structured = structured.to_string().replace('<', "\\u003c");
    let target = html_escape(&redirect.target);
    let canonical = html_escape(&canonical);

    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <title>Redirecting | {name}</title>
    <meta http-equiv="refresh" content="0; url={target}" />
    <meta name="robots" content="noindex" />
    <link rel="canonical" href="{canonical}">
    <script type="application/ld+json">{structured}</script>
    <script>window.location.replace({target_js});</script>
  </head>
  <body>
    <p>This page has moved to <a href="{target}">{canonical}</a>.</p>
  </body>
</html>
"#,
        name = html_escape(&site.name),
        target = target,
        canonical = canonical,
        structured = structured,
        target_js = serde_json::Value::String(redirect.target.clone()),
    )
}

/// `/hash/index.html`: maps whatever `location.hash` holds to a path
pub fn render_hash_index(site: &SiteConfig) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <title>Redirecting | {name}</title>
    <meta name="robots" content="noindex" />
    <link rel="canonical" href="{home}">
    <script>
      (function () {{
        var fragment = window.location.hash.replace(/^#\/?/, "");
        var path = "/";
        if (/^[a-z0-9_\-]+(\/[a-z0-9_\-]+)?$/.test(fragment) && fragment !== "home") {{
          path = "/" + fragment;
        }}
        window.location.replace(path);
      }})();
    </script>
    <noscript><meta http-equiv="refresh" content="0; url=/" /></noscript>
  </head>
  <body>
    <p><a href="/">Continue to {name}</a></p>
  </body>
</html>
"#,
        name = html_escape(&site.name),
        home = html_escape(&site.canonical_url("/")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::build_routes;
    use crate::test_support::{record, site};

    #[test]
    fn test_hash_redirects_cover_legacy_and_releases() {
        let routes = build_routes(&[
            record("seed", "Seed", "2024-09-03"),
            record("launch", "Launch", "2024-03-12"),
        ]);
        let redirects = hash_redirects(&routes);

        assert_eq!(redirects.len(), 6);
        assert_eq!(redirects[0], HashRedirect::new("home", "/"));
        assert!(redirects.contains(&HashRedirect::new("press/seed", "/press/seed")));
        assert_eq!(redirects[5].output_file(), "hash/press/launch/index.html");
        assert_eq!(redirects[5].source_path(), "/hash/press/launch");
    }

    #[test]
    fn test_hash_page_points_at_canonical_path() {
        let page = render_hash_page(&site(), &HashRedirect::new("product", "/product"));
        assert!(page.contains(r#"<meta http-equiv="refresh" content="0; url=/product" />"#));
        assert!(page.contains(
            r#"<link rel="canonical" href="https://www.northwind.example/product">"#
        ));
        assert!(page.contains(r#""@type":"WebPage""#));
        assert!(page.contains(r#""url":"https://www.northwind.example/product""#));
        assert!(page.contains(r#"window.location.replace("/product");"#));
    }

    #[test]
    fn test_structured_data_cannot_close_script() {
        let mut site = site();
        site.name = "</script><b>".to_string();
        let page = render_hash_page(&site, &HashRedirect::new("home", "/"));
        assert!(!page.contains("</script><b>"));
    }

    #[test]
    fn test_hash_index_defaults_to_root() {
        let page = render_hash_index(&site());
        assert!(page.contains(r#"var path = "/";"#));
        assert!(page.contains("window.location.hash"));
        assert!(page.contains(r#"href="https://www.northwind.example/""#));
    }
}
