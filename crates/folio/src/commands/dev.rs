//! Development server command.

use std::path::Path;

use anyhow::{Context, Result};
use folio_config::Config;
use folio_server::{DevServer, DevServerConfig};

use super::build::build_config;

/// Run the dev server.
pub async fn run(config_path: &Path, port: u16, open: bool) -> Result<()> {
    tracing::info!("Starting development server on port {}", port);

    let config = Config::load(config_path).context("Failed to load configuration")?;

    let server_config = DevServerConfig {
        build: build_config(&config, None, true),
        port,
        open,
        ..Default::default()
    };

    DevServer::new(server_config).start().await?;

    Ok(())
}
