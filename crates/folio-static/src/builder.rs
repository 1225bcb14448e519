//! Site build pass.
//!
//! Walks a directory of generated pages, runs one bundle session per page
//! (init hooks, then placeholder hydration), and writes the enhanced pages
//! into the output tree under the configured namespace.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use folio_runtime::{
    resolve_hooks, HydrateReport, JsonFileStore, MemoryStore, PageDocument, PreferenceStore,
    Runtime, SiteInfo, Viewport,
};

use crate::assets;

/// Configuration for building a site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory of generated pages to enhance.
    pub src_dir: PathBuf,

    /// Output directory root.
    pub output_dir: PathBuf,

    /// URL prefix the site is served under; pages land in a matching
    /// subdirectory of the output root.
    pub namespace: String,

    /// Theme name for the `install-theme` hook.
    pub theme: String,

    /// Base title exposed to hooks and transports.
    pub title_base: String,

    /// Extra init hooks appended after the bundle defaults.
    pub init_hooks: Vec<String>,

    /// Viewport sessions are initialized for.
    pub viewport: Viewport,

    /// Inject the live-reload client into every page.
    pub live_reload: bool,

    /// Preference store file. `None` keeps preferences in memory for the
    /// duration of the build.
    pub prefs_path: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from("pages"),
            output_dir: PathBuf::from("dist"),
            namespace: "/".to_string(),
            theme: "slate".to_string(),
            title_base: "Documentation".to_string(),
            init_hooks: vec![],
            viewport: Viewport::default(),
            live_reload: false,
            prefs_path: None,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages written
    pub pages: usize,

    /// Number of components mounted across all pages
    pub mounted: usize,

    /// Number of placeholders no loaded bundle recognized
    pub unmatched: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read pages: {0}")]
    ReadError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A page to be built.
#[derive(Debug)]
struct PageInfo {
    /// Source file path
    source_path: PathBuf,

    /// Output path
    output_path: PathBuf,
}

/// Site builder running one bundle session per page.
pub struct SiteBuilder {
    config: BuildConfig,
    runtime: Runtime,
    store: Box<dyn PreferenceStore>,
}

impl SiteBuilder {
    /// Create a builder with the standard bundle and configured hooks loaded.
    ///
    /// An unusable preference file is downgraded to an in-memory store so a
    /// broken preference file never blocks a build.
    pub fn new(config: BuildConfig) -> Self {
        let store: Box<dyn PreferenceStore> = match &config.prefs_path {
            Some(path) => match JsonFileStore::open(path) {
                Ok(store) => Box::new(store),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "preference store unavailable; preferences will not persist past this build"
                    );
                    Box::new(MemoryStore::new())
                }
            },
            None => Box::new(MemoryStore::new()),
        };

        let mut runtime = Runtime::with_standard();
        runtime.append_hooks(resolve_hooks(&config.init_hooks));
        if config.live_reload {
            runtime.append_hooks(resolve_hooks(&["reload-on-change".to_string()]));
        }

        Self {
            config,
            runtime,
            store,
        }
    }

    /// Build the site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let site_root = self.site_root();
        fs::create_dir_all(&site_root).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let pages = self.discover_pages()?;
        let site = self.site_info();

        // Enhance pages in parallel
        let results: Vec<Result<HydrateReport, BuildError>> = pages
            .par_iter()
            .map(|page| self.build_page(page, &site))
            .collect();

        let mut mounted = 0;
        let mut unmatched = 0;

        for result in results {
            let report = result?;
            mounted += report.mounted;
            unmatched += report.unmatched;
        }

        assets::write_bundle_manifest(&site_root, self.runtime.manifests())?;
        assets::copy_assets(&self.config.src_dir.join("assets"), &site_root)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: pages.len(),
            mounted,
            unmatched,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Where built pages land: the output root plus the namespace.
    fn site_root(&self) -> PathBuf {
        self.config
            .output_dir
            .join(self.config.namespace.trim_start_matches('/'))
    }

    fn site_info(&self) -> SiteInfo {
        SiteInfo {
            theme: self.config.theme.clone(),
            namespace: self.config.namespace.clone(),
            title_base: self.config.title_base.clone(),
        }
    }

    /// Discover all page files in the source directory.
    fn discover_pages(&self) -> Result<Vec<PageInfo>, BuildError> {
        if !self.config.src_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Pages directory not found: {}",
                self.config.src_dir.display()
            )));
        }

        let assets_dir = self.config.src_dir.join("assets");
        let site_root = self.site_root();
        let mut pages = Vec::new();

        for entry in WalkDir::new(&self.config.src_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() || path.starts_with(&assets_dir) {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "html" && ext != "htm" {
                continue;
            }

            let relative_path = path
                .strip_prefix(&self.config.src_dir)
                .unwrap_or(path)
                .to_path_buf();

            pages.push(PageInfo {
                source_path: path.to_path_buf(),
                output_path: site_root.join(&relative_path),
            });
        }

        Ok(pages)
    }

    /// Build a single page.
    fn build_page(&self, page: &PageInfo, site: &SiteInfo) -> Result<HydrateReport, BuildError> {
        let source = fs::read_to_string(&page.source_path).map_err(|e| {
            BuildError::ReadError(format!("{}: {}", page.source_path.display(), e))
        })?;

        let mut doc = PageDocument::parse(&source);
        let report = self
            .runtime
            .enhance(&mut doc, self.config.viewport, self.store.as_ref(), site);

        if let Some(parent) = page.output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }
        fs::write(&page.output_path, doc.to_html())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        tracing::debug!(
            page = %page.source_path.display(),
            mounted = report.mounted,
            unmatched = report.unmatched,
            "built page"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_runtime::{component_hash, TOC_ACTIVE_KEY, BUNDLE_VERSION};
    use tempfile::tempdir;

    fn page_with(hash: &str) -> String {
        format!(
            r#"<html><head><title>T</title></head><body>
<script type="application/folio" id="f1" data-component="{hash}">{{"user": "octocat"}}</script>
</body></html>"#
        )
    }

    #[tokio::test]
    async fn builds_and_hydrates_pages_under_the_namespace() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("pages");
        let out = temp.path().join("dist");

        fs::create_dir_all(&src).unwrap();
        let hash = component_hash("github-search", BUNDLE_VERSION);
        fs::write(src.join("index.html"), page_with(&hash)).unwrap();

        let builder = SiteBuilder::new(BuildConfig {
            src_dir: src,
            output_dir: out.clone(),
            namespace: "/docs".to_string(),
            ..Default::default()
        });
        let result = builder.build().await.unwrap();

        assert_eq!(result.pages, 1);
        assert_eq!(result.mounted, 1);
        assert_eq!(result.unmatched, 0);

        let html = fs::read_to_string(out.join("docs").join("index.html")).unwrap();
        assert!(html.contains(r#"<folio-github-search user="octocat"></folio-github-search>"#));
        assert!(!html.contains("application/folio"));
        assert!(html.contains(r#"href="/docs/assets/theme-slate.css""#));
        assert!(out.join("docs").join("bundle.json").exists());
    }

    #[tokio::test]
    async fn unknown_hashes_survive_the_build() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("pages");
        let out = temp.path().join("dist");

        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("index.html"), page_with("ffffffffffffffff")).unwrap();

        let builder = SiteBuilder::new(BuildConfig {
            src_dir: src,
            output_dir: out.clone(),
            ..Default::default()
        });
        let result = builder.build().await.unwrap();

        assert_eq!(result.unmatched, 1);
        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains(r#"data-component="ffffffffffffffff""#));
    }

    #[tokio::test]
    async fn nested_pages_and_assets_land_in_the_output_tree() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("pages");
        let out = temp.path().join("dist");

        fs::create_dir_all(src.join("guide")).unwrap();
        fs::create_dir_all(src.join("assets")).unwrap();
        fs::write(src.join("guide").join("intro.html"), "<p>hi</p>").unwrap();
        fs::write(src.join("assets").join("theme-slate.css"), "body{}").unwrap();

        let builder = SiteBuilder::new(BuildConfig {
            src_dir: src,
            output_dir: out.clone(),
            namespace: "/docs".to_string(),
            ..Default::default()
        });
        let result = builder.build().await.unwrap();

        assert_eq!(result.pages, 1);
        assert!(out.join("docs/guide/intro.html").exists());
        assert!(out.join("docs/assets/theme-slate.css").exists());
    }

    #[tokio::test]
    async fn configured_toc_hook_seeds_the_preference_file_once() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("pages");
        let out = temp.path().join("dist");
        let prefs = temp.path().join(".folio").join("preferences.json");

        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("index.html"), "<html><body></body></html>").unwrap();

        let config = BuildConfig {
            src_dir: src,
            output_dir: out,
            init_hooks: vec!["toc-default-open".to_string()],
            prefs_path: Some(prefs.clone()),
            ..Default::default()
        };

        SiteBuilder::new(config.clone()).build().await.unwrap();
        let first = fs::read_to_string(&prefs).unwrap();
        assert!(first.contains(TOC_ACTIVE_KEY));

        SiteBuilder::new(config).build().await.unwrap();
        let second = fs::read_to_string(&prefs).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn live_reload_builds_inject_the_client_script() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("pages");
        let out = temp.path().join("dist");

        fs::create_dir_all(&src).unwrap();
        fs::write(
            src.join("index.html"),
            "<html><head></head><body></body></html>",
        )
        .unwrap();

        let builder = SiteBuilder::new(BuildConfig {
            src_dir: src,
            output_dir: out.clone(),
            live_reload: true,
            ..Default::default()
        });
        builder.build().await.unwrap();

        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains(r#"<script src="/__folio.js" defer></script>"#));
    }

    #[tokio::test]
    async fn missing_source_directory_is_an_error() {
        let temp = tempdir().unwrap();

        let builder = SiteBuilder::new(BuildConfig {
            src_dir: temp.path().join("nope"),
            output_dir: temp.path().join("dist"),
            ..Default::default()
        });

        let err = builder.build().await.unwrap_err();
        assert!(matches!(err, BuildError::ReadError(_)));
    }
}
