//! Fixtures shared by unit tests.

use prerender_kit_core::config::parse_site_toml_str;
use prerender_kit_core::{ContentRecord, SiteConfig};

/// What a Vite production build emits for a React app
pub const VITE_INDEX: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <link rel="icon" type="image/svg+xml" href="/assets/favicon.svg" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Vite App</title>
    <meta name="description" content="placeholder description" />
    <meta property="og:title" content="placeholder" />
    <meta property="og:description" content="placeholder" />
    <meta property="og:url" content="https://example.com" />
    <meta name="twitter:title" content="placeholder" />
    <meta name="twitter:description" content="placeholder" />
    <meta name="twitter:url" content="https://example.com" />
    <script type="module" crossorigin src="/assets/index-D8f3a.js"></script>
    <link rel="stylesheet" crossorigin href="/assets/index-B2c9.css">
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>
"#;

pub fn site() -> SiteConfig {
    parse_site_toml_str(
        r#"
[site]
name = "Northwind"
base_url = "https://www.northwind.example"
tagline = "Tools for everyone"
description = "Accessible tooling for teams"
"#,
    )
    .unwrap()
}

pub fn record(uid: &str, title: &str, date: &str) -> ContentRecord {
    ContentRecord {
        id: format!("id-{}", uid),
        uid: Some(uid.to_string()),
        slug: None,
        title: title.to_string(),
        date: date.to_string(),
        excerpt: format!("{} excerpt", title),
        content: format!("<p>{} body</p>", title),
        author: Some("Press Team".to_string()),
        ..Default::default()
    }
}
