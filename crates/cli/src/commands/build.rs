use super::{load_site, read_base_template, save_template_snapshot};
use crate::logging::format_elapsed;
use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use log::{info, warn};
use prerender_kit_content::{CmsClient, fetch_content_records};
use prerender_kit_core::{ArtifactKind, CmsConfig, PageKind};
use prerender_kit_generator::{
    Assembler, AssetVersion, BuildSummary, Renderer, SiteGenerator, build_routes, load_components,
};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Pre-render the site in `path`, reading content settings from the environment
pub async fn run(path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    println!("🔨 Pre-rendering site...");
    println!("   Source: {}", path.display());
    println!();

    let started = Instant::now();
    let summary = build_with_env(&path, output, |key| std::env::var(key).ok()).await?;

    println!();
    println!("✅ Build complete in {}", format_elapsed(started.elapsed()));
    println!("   Pages:          {}", summary.pages);
    println!("   Hash redirects: {}", summary.count(ArtifactKind::HashRedirect));
    println!("   Asset version:  {}", summary.version);
    if !summary.missing_slots.is_empty() {
        println!(
            "   {} {} template slot(s) were not filled; run 'prerender-kit validate {}'",
            "⚠".yellow(),
            summary.missing_slots.len(),
            path.display()
        );
    }

    Ok(())
}

/// The whole pipeline, with environment lookup injected.
///
/// Configuration, template and component problems abort before any output
/// is written. A template without a mount point or bundle script is one of
/// them. Content API failures do not abort; the fallback dataset is used.
pub(crate) async fn build_with_env<F>(
    path: &Path,
    output: Option<PathBuf>,
    lookup: F,
) -> Result<BuildSummary>
where
    F: Fn(&str) -> Option<String>,
{
    let site = load_site(path)?;
    let cms = CmsConfig::from_lookup(lookup).context("Content API is not configured")?;

    let template = read_base_template(path, &site)?;

    let components = match &site.components {
        Some(dir) => load_components(&path.join(dir)).context("Failed to load components")?,
        None => HashMap::new(),
    };

    let renderer = Renderer::new(&site).with_components(components);
    let assembler = Assembler::new(&site, &template, AssetVersion::now());
    let essential: Vec<String> = assembler
        .missing_slots()
        .iter()
        .filter(|slot| slot.is_essential())
        .map(|slot| slot.to_string())
        .collect();
    if !essential.is_empty() {
        anyhow::bail!(
            "Base template {} is missing {}",
            site.template.display(),
            essential.join(", ")
        );
    }
    for slot in assembler.missing_slots() {
        warn!(target: "build", "Base template is missing {}", slot);
    }
    save_template_snapshot(path, &template)?;

    let output = output.unwrap_or_else(|| path.join(&site.output));
    fs::create_dir_all(&output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    info!(target: "build", "Site {} -> {}", site.name, output.display());

    let client = CmsClient::new(&cms).context("Failed to create content API client")?;
    let records = fetch_content_records(&client).await;
    let routes = build_routes(&records);
    let releases = routes.iter().filter(|r| r.page == PageKind::PressDetail).count();
    info!(target: "build", "{} routes ({} press releases)", routes.len(), releases);

    let generator = SiteGenerator::new(&renderer, &assembler, Utc::now().date_naive());
    let summary = generator
        .generate(&site, &routes, &records, &output)
        .context("Failed to write site")?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <title>App</title>
    <meta name="description" content="" />
    <script type="module" crossorigin src="/assets/index.js"></script>
  </head>
  <body><div id="root"></div></body>
</html>
"#;

    const UNREACHABLE: &str = "http://127.0.0.1:9/api";

    fn site_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("site.toml"),
            "[site]\nname = \"Northwind\"\nbase_url = \"https://www.northwind.example\"\n",
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("dist")).unwrap();
        fs::write(dir.path().join("dist/index.html"), TEMPLATE).unwrap();
        dir
    }

    fn env(endpoint: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
        move |key| match key {
            "CMS_API_ENDPOINT" => endpoint.map(str::to_string),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_missing_endpoint_aborts_without_output() {
        let dir = site_dir();
        let output = dir.path().join("out");

        let err = build_with_env(dir.path(), Some(output.clone()), env(None))
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("CMS_API_ENDPOINT"));
        assert!(!output.exists());
        let template = fs::read_to_string(dir.path().join("dist/index.html")).unwrap();
        assert_eq!(template, TEMPLATE);
    }

    #[tokio::test]
    async fn test_missing_template_aborts() {
        let dir = site_dir();
        fs::remove_file(dir.path().join("dist/index.html")).unwrap();
        let output = dir.path().join("out");

        let err = build_with_env(dir.path(), Some(output.clone()), env(Some(UNREACHABLE)))
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("base template"));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_unreachable_api_builds_fallback_releases() {
        let dir = site_dir();

        let summary = build_with_env(dir.path(), None, env(Some(UNREACHABLE)))
            .await
            .unwrap();

        assert_eq!(summary.pages, 8);
        let dist = dir.path().join("dist");
        for uid in ["platform-launch", "seed-funding", "accessibility-partnership"] {
            assert!(dist.join(format!("press/{}/index.html", uid)).is_file(), "{}", uid);
            assert!(dist.join(format!("hash/press/{}/index.html", uid)).is_file(), "{}", uid);
        }

        let home = fs::read_to_string(dist.join("index.html")).unwrap();
        assert!(home.contains("window.__INITIAL_STATE__"));
        assert!(home.contains("<title>Northwind | "));

        let sitemap = fs::read_to_string(dist.join("sitemap.xml")).unwrap();
        assert_eq!(sitemap.matches("<url>").count(), 7);
    }

    #[tokio::test]
    async fn test_broken_component_aborts() {
        let dir = site_dir();
        let toml = fs::read_to_string(dir.path().join("site.toml")).unwrap();
        fs::write(
            dir.path().join("site.toml"),
            format!("{}\n[build]\ncomponents = \"components\"\n", toml),
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("components")).unwrap();
        fs::write(dir.path().join("components/home.html"), "{#if open}").unwrap();
        let output = dir.path().join("out");

        let err = build_with_env(dir.path(), Some(output.clone()), env(Some(UNREACHABLE)))
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("home.html"));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_rebuild_in_place_reuses_original_template() {
        let dir = site_dir();
        let dist = dir.path().join("dist");

        build_with_env(dir.path(), None, env(Some(UNREACHABLE))).await.unwrap();
        let summary = build_with_env(dir.path(), None, env(Some(UNREACHABLE))).await.unwrap();
        let page = fs::read_to_string(dist.join("press/seed-funding/index.html")).unwrap();

        assert_eq!(summary.pages, 8);
        assert!(page.contains("We have closed our seed round."));
        assert!(!page.contains(r#"class="hero""#));
        assert_eq!(page.matches("__INITIAL_STATE__").count(), 1);
        assert!(page.contains(r#""currentPage":"press-detail""#));
        assert_eq!(page.matches(r#"<div id="root">"#).count(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join(".prerender-kit/template.html")).unwrap(),
            TEMPLATE
        );
    }

    #[tokio::test]
    async fn test_template_without_mount_aborts() {
        let dir = site_dir();
        fs::write(
            dir.path().join("dist/index.html"),
            TEMPLATE.replace(r#"<div id="root"></div>"#, "<main></main>"),
        )
        .unwrap();
        let output = dir.path().join("out");

        let err = build_with_env(dir.path(), Some(output.clone()), env(Some(UNREACHABLE)))
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("root mount element"));
        assert!(!output.exists());
        assert!(!dir.path().join(".prerender-kit").exists());
    }
}
