//! Route Table Builder.

use log::warn;
use prerender_kit_core::{ContentRecord, PageKind, RouteDescriptor, is_safe_slug};
use std::collections::HashSet;

/// Fixed pages, in generation order
pub const STATIC_ROUTES: &[(&str, PageKind)] = &[
    ("/", PageKind::Home),
    ("/product", PageKind::Product),
    ("/press", PageKind::Press),
    ("/about", PageKind::About),
    ("/404", PageKind::NotFound),
];

/// Path of the detail page for a content key
pub fn press_path(key: &str) -> String {
    format!("/press/{}", key)
}

/// Static routes followed by one `press-detail` route per usable record.
///
/// Records without a usable key, or whose path is already taken, are skipped
/// with a warning so that every path stays unique. Input order decides which
/// duplicate wins, so callers pass records newest first.
pub fn build_routes(records: &[ContentRecord]) -> Vec<RouteDescriptor> {
    let mut routes: Vec<RouteDescriptor> = STATIC_ROUTES
        .iter()
        .map(|(path, page)| RouteDescriptor::new(*path, *page))
        .collect();
    let mut taken: HashSet<String> = routes.iter().map(|r| r.path.clone()).collect();

    for record in records {
        let Some(key) = record.route_key() else {
            warn!(target: "routes", "Press release {} has no uid or slug; skipped", record.id);
            continue;
        };
        if !is_safe_slug(key) {
            warn!(target: "routes", "Press release {} has unusable uid '{}'; skipped", record.id, key);
            continue;
        }

        let path = press_path(key);
        if !taken.insert(path.clone()) {
            warn!(target: "routes", "Press release {} collides with existing route {}; skipped", record.id, path);
            continue;
        }

        routes.push(
            RouteDescriptor::new(path, PageKind::PressDetail)
                .with_param("uid", key)
                .with_param("title", record.title.as_str())
                .with_param("excerpt", record.excerpt.as_str()),
        );
    }

    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    fn count(routes: &[RouteDescriptor], page: PageKind) -> usize {
        routes.iter().filter(|r| r.page == page).count()
    }

    #[test]
    fn test_static_routes_only() {
        let routes = build_routes(&[]);
        assert_eq!(routes.len(), 5);
        for page in [
            PageKind::Home,
            PageKind::Product,
            PageKind::Press,
            PageKind::About,
            PageKind::NotFound,
        ] {
            assert_eq!(count(&routes, page), 1, "{}", page);
        }
        assert_eq!(count(&routes, PageKind::PressDetail), 0);
    }

    #[test]
    fn test_one_detail_route_per_record() {
        let records = vec![
            record("series-a", "Series A", "2025-04-01"),
            record("launch", "Launch", "2024-01-01"),
        ];
        let routes = build_routes(&records);
        assert_eq!(count(&routes, PageKind::PressDetail), 2);

        let detail = routes.iter().find(|r| r.path == "/press/series-a").unwrap();
        assert_eq!(detail.param("uid"), Some("series-a"));
        assert_eq!(detail.param("title"), Some("Series A"));
        assert_eq!(detail.param("excerpt"), Some("Series A excerpt"));
    }

    #[test]
    fn test_slug_used_when_uid_missing() {
        let mut r = record("ignored", "T", "2024-01-01");
        r.uid = None;
        r.slug = Some("from-slug".to_string());
        let routes = build_routes(&[r]);
        assert!(routes.iter().any(|r| r.path == "/press/from-slug"));
    }

    #[test]
    fn test_paths_are_unique_and_detail_has_uid() {
        let records = vec![
            record("dup", "Newest", "2025-01-01"),
            record("dup", "Older", "2024-01-01"),
            record("../escape", "Bad", "2024-01-01"),
            record("", "Empty", "2024-01-01"),
        ];
        let routes = build_routes(&records);

        let mut paths: Vec<_> = routes.iter().map(|r| r.path.as_str()).collect();
        let total = paths.len();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), total);

        let details: Vec<_> = routes
            .iter()
            .filter(|r| r.page == PageKind::PressDetail)
            .collect();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].param("title"), Some("Newest"));
        assert!(details.iter().all(|r| r.param("uid").is_some_and(|u| !u.is_empty())));
    }

    #[test]
    fn test_uid_named_like_static_page_stays_under_press() {
        let routes = build_routes(&[record("product", "Product news", "2025-01-01")]);
        assert!(routes.iter().any(|r| r.path == "/product" && r.page == PageKind::Product));
        assert!(
            routes
                .iter()
                .any(|r| r.path == "/press/product" && r.page == PageKind::PressDetail)
        );
        assert_eq!(count(&routes, PageKind::NotFound), 1);
    }
}
