//! Artifact Emitters: everything written after the pages themselves.

mod redirects;
mod server;
mod sitemap;

pub use redirects::{HashRedirect, hash_redirects, render_hash_index, render_hash_page};
pub use server::{render_htaccess, render_netlify_redirects, render_robots};
pub use sitemap::render_sitemap;

use crate::error::{GenerateError, Result};
use chrono::NaiveDate;
use log::{debug, info};
use prerender_kit_core::{ArtifactKind, GeneratedArtifact, PageKind, RouteDescriptor, SiteConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Write `contents` to `output/relative`, creating parent directories.
/// Returns `relative`.
pub(crate) fn write_file(output: &Path, relative: &str, contents: &str) -> Result<PathBuf> {
    let path = output.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| GenerateError::io(parent, e))?;
    }
    fs::write(&path, contents).map_err(|e| GenerateError::io(&path, e))?;
    debug!(target: "emit", "Wrote {}", path.display());
    Ok(PathBuf::from(relative))
}

/// Emit sitemap, 404 copy, hash redirect pages and server config.
///
/// Expects the pages for `routes` to be in `output` already.
pub fn emit_artifacts(
    site: &SiteConfig,
    routes: &[RouteDescriptor],
    output: &Path,
    build_date: NaiveDate,
) -> Result<Vec<GeneratedArtifact>> {
    let mut artifacts = Vec::new();

    let sitemap = render_sitemap(site, routes, build_date);
    artifacts.push(GeneratedArtifact::new(
        ArtifactKind::Sitemap,
        write_file(output, "sitemap.xml", &sitemap)?,
    ));

    if let Some(route) = routes.iter().find(|r| r.page == PageKind::NotFound) {
        let source = output.join(route.output_file());
        let page = fs::read_to_string(&source).map_err(|e| GenerateError::io(&source, e))?;
        artifacts.push(GeneratedArtifact::new(
            ArtifactKind::NotFoundPage,
            write_file(output, "404.html", &page)?,
        ));
    }

    let redirects = hash_redirects(routes);
    for redirect in &redirects {
        let page = render_hash_page(site, redirect);
        artifacts.push(GeneratedArtifact::new(
            ArtifactKind::HashRedirect,
            write_file(output, &redirect.output_file(), &page)?,
        ));
    }
    artifacts.push(GeneratedArtifact::new(
        ArtifactKind::HashRedirect,
        write_file(output, "hash/index.html", &render_hash_index(site))?,
    ));

    artifacts.push(GeneratedArtifact::new(
        ArtifactKind::Htaccess,
        write_file(output, ".htaccess", &render_htaccess(&redirects))?,
    ));
    artifacts.push(GeneratedArtifact::new(
        ArtifactKind::NetlifyRedirects,
        write_file(output, "_redirects", &render_netlify_redirects(&redirects))?,
    ));

    if output.join("robots.txt").exists() {
        info!(target: "emit", "robots.txt already present; left untouched");
    } else {
        artifacts.push(GeneratedArtifact::new(
            ArtifactKind::Robots,
            write_file(output, "robots.txt", &render_robots(site))?,
        ));
    }

    info!(
        target: "emit",
        "Emitted {} artifacts ({} hash redirects)",
        artifacts.len(),
        redirects.len() + 1
    );
    Ok(artifacts)
}
