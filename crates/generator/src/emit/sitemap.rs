use chrono::NaiveDate;
use prerender_kit_core::html::xml_escape;
use prerender_kit_core::{PageKind, RouteDescriptor, SiteConfig};
use std::fmt::Write;

/// `sitemap.xml` for every route except `not-found`
pub fn render_sitemap(
    site: &SiteConfig,
    routes: &[RouteDescriptor],
    build_date: NaiveDate,
) -> String {
    let lastmod = build_date.format("%Y-%m-%d").to_string();

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for route in routes.iter().filter(|r| r.page != PageKind::NotFound) {
        let changefreq = if route.page == PageKind::PressDetail {
            "monthly"
        } else {
            "weekly"
        };
        let priority = if route.path == "/" { "1.0" } else { "0.8" };

        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
            xml_escape(&site.canonical_url(&route.path)),
            lastmod,
            changefreq,
            priority
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::build_routes;
    use crate::test_support::{record, site};

    fn sitemap() -> String {
        let routes = build_routes(&[record("seed", "Seed", "2024-09-03")]);
        render_sitemap(&site(), &routes, NaiveDate::from_ymd_opt(2025, 5, 6).unwrap())
    }

    #[test]
    fn test_not_found_is_excluded() {
        let xml = sitemap();
        assert_eq!(xml.matches("<url>").count(), 5);
        assert!(!xml.contains("/404"));
    }

    #[test]
    fn test_priority_only_for_root() {
        let xml = sitemap();
        assert_eq!(xml.matches("<priority>1.0</priority>").count(), 1);
        assert!(xml.contains(
            "<loc>https://www.northwind.example/</loc>\n    <lastmod>2025-05-06</lastmod>\n    <changefreq>weekly</changefreq>\n    <priority>1.0</priority>"
        ));
    }

    #[test]
    fn test_press_detail_changes_monthly() {
        let xml = sitemap();
        assert_eq!(xml.matches("<changefreq>monthly</changefreq>").count(), 1);
        assert!(xml.contains(
            "<loc>https://www.northwind.example/press/seed</loc>\n    <lastmod>2025-05-06</lastmod>\n    <changefreq>monthly</changefreq>\n    <priority>0.8</priority>"
        ));
    }
}
