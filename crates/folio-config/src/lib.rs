//! Site configuration loaded from `folio.toml`.
//!
//! Every field has a default, so an empty or missing file is a valid site.
//! A file that exists but does not parse is an error; silently building
//! with defaults when the author clearly wrote configuration helps nobody.
//!
//! ```toml
//! theme = "slate"
//!
//! [page.title]
//! base = "Folio Docs"
//!
//! [src]
//! base = "pages"
//!
//! [dest]
//! html = "dist"
//! namespace = "/docs"
//!
//! [github]
//! user = "octocat"
//! repo = "hello-world"
//! action = "star"
//!
//! [bundle]
//! init = ["toc-default-open"]
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Root configuration for a folio site.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    /// Theme name, resolved to `assets/theme-<name>.css`.
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default)]
    pub page: PageConfig,

    #[serde(default)]
    pub src: SrcConfig,

    #[serde(default)]
    pub dest: DestConfig,

    /// GitHub integration for the search and star widgets.
    #[serde(default)]
    pub github: Option<GithubConfig>,

    /// Extra init hooks appended after the bundle defaults.
    #[serde(default)]
    pub bundle: BundleConfig,
}

/// Page-level settings.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct PageConfig {
    #[serde(default)]
    pub title: TitleConfig,
}

/// Title composition settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TitleConfig {
    /// Base title documents append to their own.
    #[serde(default = "default_title_base")]
    pub base: String,
}

/// Where page sources live.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SrcConfig {
    /// Directory of generated pages to enhance, relative to the project root.
    #[serde(default = "default_src_base")]
    pub base: String,
}

/// Where the built site goes and how it is addressed.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DestConfig {
    /// Output directory for built pages.
    #[serde(default = "default_dest_html")]
    pub html: String,

    /// URL prefix the site is served under.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

/// GitHub repository the docs belong to.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GithubConfig {
    pub user: String,
    pub repo: String,

    /// Which action the repo widget suggests.
    #[serde(default)]
    pub action: GithubAction,
}

/// Action offered by the GitHub repo widget.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GithubAction {
    #[default]
    Star,
    Watch,
    Fork,
    Follow,
}

impl fmt::Display for GithubAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GithubAction::Star => "star",
            GithubAction::Watch => "watch",
            GithubAction::Fork => "fork",
            GithubAction::Follow => "follow",
        };
        f.write_str(s)
    }
}

/// Client bundle settings.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct BundleConfig {
    /// Init hook names appended after the bundle's own defaults.
    #[serde(default)]
    pub init: Vec<String>,
}

fn default_theme() -> String {
    "slate".to_string()
}
fn default_title_base() -> String {
    "Documentation".to_string()
}
fn default_src_base() -> String {
    "pages".to_string()
}
fn default_dest_html() -> String {
    "dist".to_string()
}
fn default_namespace() -> String {
    "/".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            page: PageConfig::default(),
            src: SrcConfig::default(),
            dest: DestConfig::default(),
            github: None,
            bundle: BundleConfig::default(),
        }
    }
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            base: default_title_base(),
        }
    }
}

impl Default for SrcConfig {
    fn default() -> Self {
        Self {
            base: default_src_base(),
        }
    }
}

impl Default for DestConfig {
    fn default() -> Self {
        Self {
            html: default_dest_html(),
            namespace: default_namespace(),
        }
    }
}

impl Config {
    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults. The namespace is normalized to
    /// start with `/` and carry no trailing slash.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
            let config: Config =
                toml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
            tracing::info!(path = %path.display(), "loaded site config");
            config
        } else {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            Config::default()
        };

        config.validate()?;
        config.normalize();
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.src.base.trim().is_empty() {
            return Err(ConfigError::Invalid("src.base must not be empty".to_string()));
        }
        if self.dest.html.trim().is_empty() {
            return Err(ConfigError::Invalid("dest.html must not be empty".to_string()));
        }
        Ok(())
    }

    fn normalize(&mut self) {
        if !self.dest.namespace.starts_with('/') {
            self.dest.namespace.insert(0, '/');
        }
        while self.dest.namespace.len() > 1 && self.dest.namespace.ends_with('/') {
            self.dest.namespace.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn load_from_str(raw: &str) -> Result<Config, ConfigError> {
        let temp = tempdir().unwrap();
        let path = temp.path().join("folio.toml");
        fs::write(&path, raw).unwrap();
        Config::load(&path)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();

        let config = Config::load(&temp.path().join("folio.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.theme, "slate");
        assert_eq!(config.src.base, "pages");
        assert_eq!(config.dest.namespace, "/");
        assert!(config.bundle.init.is_empty());
    }

    #[test]
    fn parses_a_full_document() {
        let config = load_from_str(
            r#"
theme = "ink"

[page.title]
base = "Folio Docs"

[src]
base = "md"

[dest]
html = "out"
namespace = "/docs"

[github]
user = "octocat"
repo = "hello-world"
action = "watch"

[bundle]
init = ["toc-default-open"]
"#,
        )
        .unwrap();

        assert_eq!(config.theme, "ink");
        assert_eq!(config.page.title.base, "Folio Docs");
        assert_eq!(config.src.base, "md");
        assert_eq!(config.dest.html, "out");
        assert_eq!(config.dest.namespace, "/docs");
        let github = config.github.unwrap();
        assert_eq!(github.user, "octocat");
        assert_eq!(github.action, GithubAction::Watch);
        assert_eq!(config.bundle.init, vec!["toc-default-open".to_string()]);
    }

    #[test]
    fn partial_documents_keep_defaults_elsewhere() {
        let config = load_from_str("[dest]\nnamespace = \"/docs\"\n").unwrap();

        assert_eq!(config.dest.namespace, "/docs");
        assert_eq!(config.dest.html, "dist");
        assert_eq!(config.theme, "slate");
        assert!(config.github.is_none());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = load_from_str("theme = [unclosed").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_github_action_is_rejected() {
        let err = load_from_str("[github]\nuser = \"a\"\nrepo = \"b\"\naction = \"clone\"\n")
            .unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn namespace_is_normalized() {
        let config = load_from_str("[dest]\nnamespace = \"docs/\"\n").unwrap();

        assert_eq!(config.dest.namespace, "/docs");
    }

    #[test]
    fn root_namespace_stays_a_single_slash() {
        let config = load_from_str("[dest]\nnamespace = \"/\"\n").unwrap();

        assert_eq!(config.dest.namespace, "/");
    }

    #[test]
    fn empty_src_base_is_invalid() {
        let err = load_from_str("[src]\nbase = \"\"\n").unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn github_action_displays_lowercase() {
        assert_eq!(GithubAction::Star.to_string(), "star");
        assert_eq!(GithubAction::Follow.to_string(), "follow");
    }
}
