use crate::config::SiteConfig;
use crate::types::PageKind;
use std::collections::BTreeMap;

/// Title and description used for `<title>`, meta and social tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
}

/// Metadata for a page. Pure: same inputs, same output.
///
/// `press-detail` uses the release title and excerpt from `params` when
/// present and generic press copy otherwise.
pub fn page_metadata(
    page: PageKind,
    params: &BTreeMap<String, String>,
    site: &SiteConfig,
) -> PageMetadata {
    let name = &site.name;
    let (title, description) = match page {
        PageKind::Home => (
            format!("{} | {}", name, site.tagline),
            site.description.clone(),
        ),
        PageKind::Product => (
            format!("Product | {}", name),
            format!(
                "Explore the {} platform: core features, integrations and accessibility built in from day one.",
                name
            ),
        ),
        PageKind::Press => (
            format!("Press | {}", name),
            format!(
                "The latest news, announcements and press releases from {}.",
                name
            ),
        ),
        PageKind::About => (
            format!("About | {}", name),
            format!(
                "Meet the team behind {} and learn about our mission.",
                name
            ),
        ),
        PageKind::PressDetail => {
            let title = non_empty(params, "title")
                .map(|t| format!("{} | {} Press", t, name))
                .unwrap_or_else(|| format!("Press Release | {}", name));
            let description = non_empty(params, "excerpt")
                .map(str::to_string)
                .unwrap_or_else(|| format!("Read the latest press release from {}.", name));
            (title, description)
        }
        PageKind::NotFound => (
            format!("Page Not Found | {}", name),
            "The page you are looking for does not exist or has moved.".to_string(),
        ),
    };

    PageMetadata { title, description }
}

fn non_empty<'a>(params: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_site_toml_str;

    fn site() -> SiteConfig {
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

    #[test]
    fn test_home_metadata_uses_site_copy() {
        let meta = page_metadata(PageKind::Home, &BTreeMap::new(), &site());
        assert_eq!(meta.title, "Northwind | Tools for everyone");
        assert_eq!(meta.description, "Accessible tooling for teams");
    }

    #[test]
    fn test_press_detail_interpolates_params() {
        let mut params = BTreeMap::new();
        params.insert("title".to_string(), "Seed Funding".to_string());
        params.insert("excerpt".to_string(), "We raised a round.".to_string());

        let meta = page_metadata(PageKind::PressDetail, &params, &site());
        assert_eq!(meta.title, "Seed Funding | Northwind Press");
        assert_eq!(meta.description, "We raised a round.");
    }

    #[test]
    fn test_press_detail_falls_back_to_generic_copy() {
        let mut params = BTreeMap::new();
        params.insert("title".to_string(), "  ".to_string());

        let meta = page_metadata(PageKind::PressDetail, &params, &site());
        assert_eq!(meta.title, "Press Release | Northwind");
        assert!(meta.description.contains("Northwind"));
    }

    #[test]
    fn test_every_page_has_metadata() {
        for kind in PageKind::ALL {
            let meta = page_metadata(kind, &BTreeMap::new(), &site());
            assert!(!meta.title.is_empty(), "{} has no title", kind);
            assert!(!meta.description.is_empty(), "{} has no description", kind);
        }
    }
}
