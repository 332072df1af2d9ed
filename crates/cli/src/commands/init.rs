use anyhow::{Context, Result};
use prerender_kit_core::parse_site_toml_str;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_NAME: &str = "My Startup";
const DEFAULT_BASE_URL: &str = "https://www.example.com";

/// Escape a string for a TOML basic string.
///
/// The scaffold is written by hand so its comments survive.
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn render_site_toml(name: &str, base_url: &str) -> String {
    format!(
        r#"[site]
name = "{name}"
# Canonical origin, no trailing slash
base_url = "{base_url}"
tagline = "Tools for everyone"
description = "{name} builds accessible software for teams of every size."

[build]
# The bundler's index.html, relative to this directory
template = "dist/index.html"
output = "dist"
# Optional per-page overrides: components/home.html, components/press-detail.html, ...
# components = "components"
"#,
        name = toml_escape_string(name),
        base_url = toml_escape_string(base_url.trim_end_matches('/')),
    )
}

fn write_scaffold(path: &Path, name: &str, base_url: &str) -> Result<PathBuf> {
    if !path.exists() {
        anyhow::bail!(
            "Directory '{}' does not exist. Create it first: mkdir {}",
            path.display(),
            path.display()
        );
    }

    let site_toml_path = path.join("site.toml");
    if site_toml_path.exists() {
        anyhow::bail!(
            "site.toml already exists at {}\nHint: Delete it first or use a different directory",
            site_toml_path.display()
        );
    }

    let contents = render_site_toml(name, base_url);
    parse_site_toml_str(&contents).context("Generated site.toml is invalid")?;
    fs::write(&site_toml_path, contents)
        .with_context(|| format!("Failed to write {}", site_toml_path.display()))?;

    Ok(site_toml_path)
}

pub async fn run(path: PathBuf, name: Option<String>, base_url: Option<String>) -> Result<()> {
    println!("Initializing site directory: {}", path.display());

    let name = name.as_deref().unwrap_or(DEFAULT_NAME);
    let base_url = base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
    let written = write_scaffold(&path, name, base_url)?;

    println!("✓ Created {}", written.display());
    println!();
    println!("Next steps:");
    println!("  1. Build the client bundle so {} exists", path.join("dist/index.html").display());
    println!("  2. export CMS_API_ENDPOINT=https://your-repo.cdn.example/api/v2/documents/search");
    println!("  3. prerender-kit build {}", path.display());

    Ok(())
}
