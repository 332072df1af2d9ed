//! Pre-flight and post-build checks for a site.

use log::debug;
use prerender_kit_generator::{DocumentTemplate, INITIAL_STATE_GLOBAL, load_components};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Files every build leaves at the top of the output directory
const REQUIRED_OUTPUTS: &[&str] = &[
    "index.html",
    "404.html",
    "sitemap.xml",
    "robots.txt",
    "_redirects",
    ".htaccess",
    "hash/index.html",
];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.info.extend(other.info);
    }
}

/// Check the bundler's `index.html` for the anchors pages are assembled into.
///
/// Without a mount point or bundle script the output cannot hydrate, so those
/// are errors. Metadata anchors that are missing are only warnings.
pub fn validate_template(html: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    let document = DocumentTemplate::parse(html);

    for slot in document.missing_slots() {
        let message = format!("template has no {}", slot);
        if slot.is_essential() {
            report.errors.push(message);
        } else {
            report.warnings.push(message);
        }
    }
    if document.missing_slots().is_empty() {
        report.info.push("template provides every slot".to_string());
    }

    report
}

/// Check that every component override parses
pub fn validate_components(dir: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();
    if !dir.is_dir() {
        report
            .warnings
            .push(format!("components directory {} does not exist", dir.display()));
        return report;
    }

    match load_components(dir) {
        Ok(components) => {
            let mut pages: Vec<&str> = components.keys().map(|p| p.as_str()).collect();
            pages.sort_unstable();
            report.info.push(format!(
                "{} component override(s): {}",
                pages.len(),
                pages.join(", ")
            ));
        }
        Err(e) => report.errors.push(e.to_string()),
    }
    report
}

/// Inspect a finished build
pub fn validate_output(dir: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    for relative in REQUIRED_OUTPUTS {
        if !dir.join(relative).is_file() {
            report.errors.push(format!("missing {}", relative));
        }
    }

    let mut pages = 0;
    for entry in WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name() == "index.html")
    {
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        if relative.starts_with("hash") {
            continue;
        }

        debug!(target: "validate", "Checking {}", relative.display());
        let html = match fs::read_to_string(entry.path()) {
            Ok(html) => html,
            Err(e) => {
                report
                    .errors
                    .push(format!("cannot read {}: {}", relative.display(), e));
                continue;
            }
        };
        pages += 1;

        if !html.contains(r#"rel="canonical""#) {
            report
                .warnings
                .push(format!("{} has no canonical link", relative.display()));
        }
        if !html.contains(INITIAL_STATE_GLOBAL) {
            report
                .warnings
                .push(format!("{} has no hydration state", relative.display()));
        }
    }

    report.info.push(format!("{} pre-rendered page(s)", pages));
    report
}
