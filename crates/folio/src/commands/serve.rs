//! Preview server command.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::Router;
use folio_config::Config;
use tower_http::services::ServeDir;

/// Run the serve command.
pub async fn run(config_path: &Path, port: u16, dir: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    let dir = dir.unwrap_or_else(|| PathBuf::from(&config.dest.html));

    if !dir.exists() {
        anyhow::bail!(
            "Directory not found: {}. Run 'folio build' first.",
            dir.display()
        );
    }

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    tracing::info!("Serving {} at http://{}", dir.display(), addr);

    let app = Router::new().fallback_service(ServeDir::new(&dir));

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Open browser at the site's namespace
    let namespace = config.dest.namespace.trim_end_matches('/');
    let url = format!("http://{addr}{namespace}/");
    let _ = open::that(&url);

    axum::serve(listener, app).await?;

    Ok(())
}
