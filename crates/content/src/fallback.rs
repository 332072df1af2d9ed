//! Press releases shipped with the binary, used when the content API is unavailable.

use prerender_kit_core::ContentRecord;

struct Bundled {
    id: &'static str,
    slug: &'static str,
    title: &'static str,
    date: &'static str,
    excerpt: &'static str,
    content: &'static str,
    tags: &'static [&'static str],
    featured: bool,
}

const BUNDLED: &[Bundled] = &[
    Bundled {
        id: "fallback-3",
        slug: "accessibility-partnership",
        title: "Partnership Brings Accessible Design Tooling to Public Sector Teams",
        date: "2025-02-18",
        excerpt: "A new partnership makes our accessibility auditing available to public sector digital teams.",
        content: "<p>We are partnering with public sector digital services to bring automated accessibility \
                  auditing into everyday design reviews.</p>\
                  <p>Teams get WCAG 2.2 checks on every change, with guidance written for designers and \
                  engineers alike.</p>",
        tags: &["accessibility", "partnership"],
        featured: true,
    },
    Bundled {
        id: "fallback-2",
        slug: "seed-funding",
        title: "Seed Round Raised to Expand the Engineering Team",
        date: "2024-09-03",
        excerpt: "New funding will grow our engineering team and accelerate the product roadmap.",
        content: "<p>We have closed our seed round. The funding will be used to grow the engineering \
                  team and bring the platform to general availability.</p>",
        tags: &["funding"],
        featured: false,
    },
    Bundled {
        id: "fallback-1",
        slug: "platform-launch",
        title: "Platform Launches in Public Beta",
        date: "2024-03-12",
        excerpt: "Our platform is now available in public beta for teams of every size.",
        content: "<p>Today the platform opens to everyone in public beta.</p>\
                  <ul><li>Unlimited projects during the beta</li><li>Accessibility checks built in</li></ul>",
        tags: &["launch", "product"],
        featured: false,
    },
];

/// The bundled dataset, newest first
pub fn fallback_records() -> Vec<ContentRecord> {
    BUNDLED
        .iter()
        .map(|b| ContentRecord {
            id: b.id.to_string(),
            uid: Some(b.slug.to_string()),
            slug: Some(b.slug.to_string()),
            title: b.title.to_string(),
            date: b.date.to_string(),
            excerpt: b.excerpt.to_string(),
            content: b.content.to_string(),
            author: Some("Press Team".to_string()),
            featured_image: None,
            tags: b.tags.iter().map(|t| t.to_string()).collect(),
            featured: b.featured,
            last_modified: Some(b.date.to_string()),
        })
        .collect()
}
