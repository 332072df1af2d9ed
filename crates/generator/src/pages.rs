//! Built-in page markup, one function per page.
//!
//! Everything here is a pure function of its arguments.

use crate::routes::press_path;
use prerender_kit_core::html::html_escape;
use prerender_kit_core::{ContentRecord, PageKind, SiteConfig};

const NAV: &[(&str, &str, PageKind)] = &[
    ("/", "Home", PageKind::Home),
    ("/product", "Product", PageKind::Product),
    ("/press", "Press", PageKind::Press),
    ("/about", "About", PageKind::About),
];

pub fn header(site: &SiteConfig, current: PageKind) -> String {
    let active = match current {
        PageKind::PressDetail => PageKind::Press,
        other => other,
    };

    let links: String = NAV
        .iter()
        .map(|(href, label, page)| {
            let aria = if *page == active {
                r#" aria-current="page""#
            } else {
                ""
            };
            format!(r#"<li><a href="{}"{}>{}</a></li>"#, href, aria, label)
        })
        .collect();

    format!(
        r##"<a class="skip-link" href="#main-content">Skip to content</a>
<header class="site-header">
  <a class="brand" href="/">{}</a>
  <nav aria-label="Main"><ul>{}</ul></nav>
</header>"##,
        html_escape(&site.name),
        links
    )
}

pub fn footer(site: &SiteConfig) -> String {
    format!(
        r#"<footer class="site-footer">
  <p>{}</p>
  <nav aria-label="Footer"><a href="/press">Press</a> <a href="/about">About</a> <a href="/sitemap.xml">Sitemap</a></nav>
</footer>"#,
        html_escape(&site.name)
    )
}

pub fn home(site: &SiteConfig) -> String {
    format!(
        r#"<section class="hero">
  <h1>{}</h1>
  <p class="lead">{}</p>
  <a class="button" href="/product">See the product</a>
</section>
<section class="vision">
  <h2>Our vision</h2>
  <p>Software should work for everyone who needs it. We build tools that make accessible, inclusive products the default rather than the exception.</p>
</section>"#,
        html_escape(&site.tagline),
        html_escape(&site.description)
    )
}

pub fn product(site: &SiteConfig) -> String {
    format!(
        r#"<section class="product-intro">
  <h1>The {} platform</h1>
  <p>Everything your team needs to design, build and ship accessible experiences.</p>
</section>
<section class="features">
  <h2>Features</h2>
  <ul>
    <li><h3>Continuous audits</h3><p>Every change is checked against WCAG 2.2 before it reaches users.</p></li>
    <li><h3>Design integration</h3><p>Contrast, focus order and semantics reviewed right inside design files.</p></li>
    <li><h3>Team insights</h3><p>Track progress across projects with reports everyone can read.</p></li>
  </ul>
</section>
<section class="accessibility">
  <h2>Accessibility first</h2>
  <p>Our own product is tested with screen readers, keyboard-only navigation and voice control on every release.</p>
</section>"#,
        html_escape(&site.name)
    )
}

pub fn press_list(records: &[ContentRecord]) -> String {
    let items: String = records
        .iter()
        .filter_map(|record| record.route_key().map(|key| press_teaser(record, key)))
        .collect();

    let body = if items.is_empty() {
        r#"<p class="press-empty">No press releases yet. Check back soon.</p>"#.to_string()
    } else {
        format!(r#"<ul class="press-list">{}</ul>"#, items)
    };

    format!(
        r#"<section class="press">
  <h1>Press</h1>
  {}
</section>"#,
        body
    )
}

fn press_teaser(record: &ContentRecord, key: &str) -> String {
    let featured = if record.featured { " featured" } else { "" };
    format!(
        r#"<li class="press-item{}"><article>
  <time datetime="{}">{}</time>
  <h2><a href="{}">{}</a></h2>
  <p>{}</p>
</article></li>"#,
        featured,
        html_escape(&record.date),
        html_escape(&record.display_date()),
        press_path(key),
        html_escape(&record.title),
        html_escape(&record.excerpt)
    )
}

/// Full article, or a "not found" notice when no record has `uid`
pub fn press_detail(uid: &str, records: &[ContentRecord]) -> String {
    let Some(record) = records.iter().find(|r| r.route_key() == Some(uid)) else {
        return press_not_found();
    };

    let author = record
        .author
        .as_deref()
        .map(|a| format!(r#" <span class="author">by {}</span>"#, html_escape(a)))
        .unwrap_or_default();
    let image = record
        .featured_image
        .as_deref()
        .map(|url| {
            format!(
                r#"<img class="featured-image" src="{}" alt="">"#,
                html_escape(url)
            )
        })
        .unwrap_or_default();
    let tags: String = record
        .tags
        .iter()
        .map(|t| format!(r#"<li>{}</li>"#, html_escape(t)))
        .collect();
    let tags = if tags.is_empty() {
        String::new()
    } else {
        format!(r#"<ul class="tags">{}</ul>"#, tags)
    };

    format!(
        r#"<article class="press-release">
  <a class="back" href="/press">Back to press</a>
  <h1>{}</h1>
  <p class="meta"><time datetime="{}">{}</time>{}</p>
  {}
  <div class="content">{}</div>
  {}
</article>"#,
        html_escape(&record.title),
        html_escape(&record.date),
        html_escape(&record.display_date()),
        author,
        image,
        record.content,
        tags
    )
}

fn press_not_found() -> String {
    r#"<section class="press-not-found">
  <h1>Release not found</h1>
  <p>We couldn't find that press release. It may have been moved or removed.</p>
  <a href="/press">See all press releases</a>
</section>"#
        .to_string()
}

pub fn about(site: &SiteConfig) -> String {
    let name = html_escape(&site.name);
    format!(
        r#"<section class="mission">
  <h1>About {0}</h1>
  <p>{0} exists to make accessible software the norm. We started as a small team of designers and engineers who were tired of accessibility being an afterthought.</p>
</section>
<section class="team">
  <h2>Our team</h2>
  <p>We are a distributed team across design, engineering and research, including people who rely on assistive technology every day.</p>
  <p>Want to join us? <a href="mailto:jobs@{1}">Get in touch</a>.</p>
</section>"#,
        name,
        html_escape(site_host(site))
    )
}

pub fn not_found() -> String {
    r#"<section class="not-found">
  <h1>Page not found</h1>
  <p>The page you are looking for doesn't exist or has moved.</p>
  <a href="/">Go to the home page</a>
</section>"#
        .to_string()
}

fn site_host(site: &SiteConfig) -> &str {
    let host = site
        .base_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(&site.base_url);
    let host = host.split('/').next().unwrap_or(host);
    host.strip_prefix("www.").unwrap_or(host)
}
