pub mod build;
pub mod init;
pub mod preview;
pub mod validate;

use anyhow::{Context, Result};
use prerender_kit_core::{SiteConfig, parse_site_toml};
use prerender_kit_generator::{INITIAL_STATE_GLOBAL, is_prerendered};
use std::fs;
use std::path::{Path, PathBuf};

/// Copy of the bundler's template, kept so later builds never read their own output
pub(crate) fn template_snapshot_path(path: &Path) -> PathBuf {
    path.join(".prerender-kit").join("template.html")
}

/// Load `site.toml` from a site directory
pub(crate) fn load_site(path: &Path) -> Result<SiteConfig> {
    if !path.exists() {
        anyhow::bail!("Site directory does not exist: {}", path.display());
    }

    let site_toml_path = path.join("site.toml");
    if !site_toml_path.exists() {
        anyhow::bail!(
            "site.toml not found in {}\nRun 'prerender-kit init {}' first",
            path.display(),
            path.display()
        );
    }

    parse_site_toml(&site_toml_path).context("Failed to parse site.toml")
}

/// The base template as the bundler wrote it.
///
/// When the configured template is a page from an earlier build (the output
/// directory usually holds the template), the snapshot saved by that build is
/// read instead.
pub(crate) fn read_base_template(path: &Path, site: &SiteConfig) -> Result<String> {
    let template_path = path.join(&site.template);
    let template = fs::read_to_string(&template_path).with_context(|| {
        format!(
            "Failed to read base template {}\nBuild the client bundle first",
            template_path.display()
        )
    })?;

    if !is_prerendered(&template) {
        return Ok(template);
    }

    let snapshot = template_snapshot_path(path);
    if !snapshot.is_file() {
        anyhow::bail!(
            "Base template {} was written by an earlier build (it sets {}) and no saved copy exists at {}\nRebuild the client bundle first",
            template_path.display(),
            INITIAL_STATE_GLOBAL,
            snapshot.display()
        );
    }

    fs::read_to_string(&snapshot)
        .with_context(|| format!("Failed to read template snapshot {}", snapshot.display()))
}

/// Record the template read by this build for the next one
pub(crate) fn save_template_snapshot(path: &Path, template: &str) -> Result<()> {
    let snapshot = template_snapshot_path(path);
    if let Some(parent) = snapshot.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&snapshot, template)
        .with_context(|| format!("Failed to write template snapshot {}", snapshot.display()))
}
