use super::{load_site, read_base_template};
use anyhow::Result;
use colored::Colorize;
use prerender_kit_core::{CmsConfig, SiteConfig};
use prerender_kit_validator::{
    ValidationReport, validate_components, validate_output, validate_template,
};
use std::path::{Path, PathBuf};

pub async fn run(path: PathBuf) -> Result<()> {
    println!("Validating site at: {}", path.display());

    let site = load_site(&path)?;
    println!("✓ site.toml valid");
    println!("  Site: {} ({})", site.name, site.base_url);

    match CmsConfig::from_env() {
        Ok(cms) => println!("✓ Content API: {}", cms.endpoint),
        Err(e) => println!("{} {}", "⚠".yellow(), e),
    }

    let report = check_site(&path, &site)?;
    print_report(&report);

    if !report.is_ok() {
        anyhow::bail!("{} problem(s) found", report.errors.len());
    }
    Ok(())
}

fn check_site(path: &Path, site: &SiteConfig) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();

    let template = read_base_template(path, site)?;
    report.merge(validate_template(&template));

    if let Some(dir) = &site.components {
        report.merge(validate_components(&path.join(dir)));
    }

    let output = path.join(&site.output);
    if output.join("sitemap.xml").exists() {
        report.merge(validate_output(&output));
    } else {
        report
            .info
            .push(format!("no build found in {}", output.display()));
    }

    Ok(report)
}

fn print_report(report: &ValidationReport) {
    for line in &report.info {
        println!("  {}", line.dimmed());
    }
    for line in &report.warnings {
        println!("{} {}", "⚠".yellow(), line);
    }
    for line in &report.errors {
        println!("{} {}", "✗".red(), line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::save_template_snapshot;
    use std::fs;
    use tempfile::TempDir;

    fn site_dir(template: &str) -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("site.toml"),
            "[site]\nname = \"Northwind\"\nbase_url = \"https://www.northwind.example\"\n",
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("dist")).unwrap();
        fs::write(dir.path().join("dist/index.html"), template).unwrap();
        let site = load_site(dir.path()).unwrap();
        (dir, site)
    }

    #[test]
    fn test_unbuilt_site_checks_template_only() {
        let (dir, site) = site_dir(
            r#"<head><script type="module" src="/assets/a.js"></script></head><div id="root"></div>"#,
        );
        let report = check_site(dir.path(), &site).unwrap();
        assert!(report.is_ok(), "{:?}", report.errors);
        assert!(report.info.iter().any(|i| i.starts_with("no build found")));
    }

    #[test]
    fn test_template_without_mount_fails() {
        let (dir, site) = site_dir("<html><head></head><body></body></html>");
        let report = check_site(dir.path(), &site).unwrap();
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_missing_template_is_error() {
        let (dir, site) = site_dir("");
        fs::remove_file(dir.path().join("dist/index.html")).unwrap();
        assert!(check_site(dir.path(), &site).is_err());
    }

    #[test]
    fn test_site_built_in_place_still_validates() {
        let template =
            r#"<head><script type="module" src="/assets/a.js"></script></head><div id="root"></div>"#;
        let (dir, site) = site_dir(template);
        save_template_snapshot(dir.path(), template).unwrap();
        fs::write(
            dir.path().join("dist/index.html"),
            r#"<head><script>window.__INITIAL_STATE__ = {};</script></head><div id="root"><h1>Home</h1></div>"#,
        )
        .unwrap();

        let report = check_site(dir.path(), &site).unwrap();
        assert!(report.is_ok(), "{:?}", report.errors);
    }
}
