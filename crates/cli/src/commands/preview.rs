use super::load_site;
use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tower_http::services::{ServeDir, ServeFile};

/// Directory a previous `build` wrote into
fn built_output(path: &Path) -> Result<PathBuf> {
    let site = load_site(path)?;
    let output = path.join(&site.output);

    if !output.join("index.html").is_file() {
        anyhow::bail!(
            "No generated site in {}\nRun 'prerender-kit build {}' first",
            output.display(),
            path.display()
        );
    }
    Ok(output)
}

/// Static files from `output`, with `404.html` for anything unknown
fn router(output: &Path) -> Router {
    let serve = ServeDir::new(output).not_found_service(ServeFile::new(output.join("404.html")));
    Router::new().fallback_service(serve)
}

/// Serve the generated site locally.
///
/// # Arguments
///
/// * `path` - Site directory containing site.toml
/// * `port` - Port to serve on (default: 8080)
pub async fn run(path: PathBuf, port: u16) -> Result<()> {
    println!("🌐 Starting preview server...");
    println!("   Site: {}", path.display());

    let output = built_output(&path)?;
    println!("   ✓ Serving: {}", output.display());

    let app = router(&output);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
