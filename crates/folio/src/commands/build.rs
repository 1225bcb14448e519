//! Site build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio_config::Config;
use folio_runtime::Viewport;
use folio_static::{BuildConfig, SiteBuilder};

/// Where seeded reader preferences persist between builds.
const PREFS_PATH: &str = ".folio/preferences.json";

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Building site...");

    let config = Config::load(config_path).context("Failed to load configuration")?;
    let build = build_config(&config, output, false);

    let result = SiteBuilder::new(build).build().await?;

    tracing::info!(
        "Built {} pages ({} components mounted, {} unmatched) in {}ms",
        result.pages,
        result.mounted,
        result.unmatched,
        result.duration_ms
    );
    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

/// Map the config file onto build settings.
pub(crate) fn build_config(
    config: &Config,
    output: Option<PathBuf>,
    live_reload: bool,
) -> BuildConfig {
    BuildConfig {
        src_dir: PathBuf::from(&config.src.base),
        output_dir: output.unwrap_or_else(|| PathBuf::from(&config.dest.html)),
        namespace: config.dest.namespace.clone(),
        theme: config.theme.clone(),
        title_base: config.page.title.base.clone(),
        init_hooks: config.bundle.init.clone(),
        viewport: Viewport::default(),
        live_reload,
        prefs_path: Some(PathBuf::from(PREFS_PATH)),
    }
}
