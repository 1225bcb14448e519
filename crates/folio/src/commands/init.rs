//! Initialize a folio site in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use folio_runtime::{component_hash, standard::STANDARD, BUNDLE_VERSION};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing folio...");

    let pages_dir = Path::new("pages");

    // Check if pages already exists
    if pages_dir.exists() && !yes {
        tracing::warn!("pages/ directory already exists. Use --yes to overwrite.");
        return Ok(());
    }
    fs::create_dir_all(pages_dir.join("assets")).context("Failed to create pages directory")?;

    // Create default config
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG).context("Failed to write config file")?;
        tracing::info!("Created {}", config_path.display());
    }

    // Create sample pages
    let index_path = pages_dir.join("index.html");
    if !index_path.exists() || yes {
        fs::write(&index_path, fill_hashes(INDEX_PAGE)).context("Failed to write index.html")?;
        tracing::info!("Created pages/index.html");
    }

    let guide_path = pages_dir.join("guide.html");
    if !guide_path.exists() || yes {
        fs::write(&guide_path, fill_hashes(GUIDE_PAGE)).context("Failed to write guide.html")?;
        tracing::info!("Created pages/guide.html");
    }

    // Create starter theme
    let theme_path = pages_dir.join("assets").join("theme-slate.css");
    if !theme_path.exists() || yes {
        fs::write(&theme_path, THEME_CSS).context("Failed to write theme stylesheet")?;
        tracing::info!("Created pages/assets/theme-slate.css");
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'folio dev' to start the development server.");

    Ok(())
}

/// Replace `@component-name@` tokens with the hashes the standard bundle
/// registers, so scaffolded placeholders resolve against this build.
fn fill_hashes(template: &str) -> String {
    let mut page = template.to_string();
    for (name, _) in STANDARD {
        page = page.replace(
            &format!("@{name}@"),
            &component_hash(name, BUNDLE_VERSION),
        );
    }
    page
}

const DEFAULT_CONFIG: &str = r#"# Folio configuration

theme = "slate"

[page.title]
# Base title documents append to their own
base = "My Documentation"

[src]
# Directory of generated pages to enhance
base = "pages"

[dest]
# Output directory for the built site
html = "dist"
# URL prefix the site is served under
namespace = "/"

# [github]
# user = "your-name"
# repo = "your-repo"
# action = "star"

[bundle]
# Extra init hooks appended after the defaults
init = ["toc-default-open"]
"#;

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Welcome</title>
</head>
<body>
  <main>
    <h1>Welcome</h1>
    <p>This page came out of your documentation engine; folio enhanced it.</p>
    <p>The elements below were mounted from placeholders at build time:</p>
  </main>
  <script type="application/folio" id="f1" data-component="@dark-mode-switch@"></script>
  <script type="application/folio" id="f2" data-component="@github-search@">
  {"user": "your-name", "repo": "your-repo"}
  </script>
  <script type="application/folio" id="f3" data-component="@toc-prevnext@">
  {"next": {"title": "Guide", "url": "guide.html"}}
  </script>
</body>
</html>
"#;

const GUIDE_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Guide</title>
</head>
<body>
  <script type="application/folio" id="f1" data-component="@toc-toggle@"></script>
  <main>
    <h1>Guide</h1>
    <p>Pick your tooling:</p>
    <script type="application/folio" id="f2" data-component="@tab-selector@">
    {"tabs": ["npm", "cargo"], "selected": "cargo"}
    </script>
    <p>Long sections collapse:</p>
    <script type="application/folio" id="f3" data-component="@collapse-control@"></script>
  </main>
  <script type="application/folio" id="f4" data-component="@toc-prevnext@">
  {"prev": {"title": "Welcome", "url": "index.html"}}
  </script>
</body>
</html>
"#;

const THEME_CSS: &str = r#"/* folio slate theme */

:root {
  --folio-bg: #ffffff;
  --folio-fg: #1a1a1e;
  --folio-muted: #6b7280;
  --folio-accent: #4c6ef5;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--folio-bg);
  color: var(--folio-fg);
  line-height: 1.6;
  max-width: 800px;
  margin: 2rem auto;
  padding: 0 1rem;
}

body.folio-smooth {
  animation: folio-fade 0.2s ease-in;
}

@keyframes folio-fade {
  from { opacity: 0; }
  to { opacity: 1; }
}

folio-toc-prevnext {
  display: flex;
  justify-content: space-between;
  margin-top: 3rem;
}

folio-toc-prevnext a {
  color: var(--folio-accent);
  text-decoration: none;
}

folio-toc-prevnext a[rel="prev"]::before {
  content: "\2190 ";
}

folio-toc-prevnext a[rel="next"]::after {
  content: " \2192";
}

folio-dark-mode-switch,
folio-toc-toggle,
folio-collapse-control {
  display: inline-block;
  color: var(--folio-muted);
}

folio-tab-selector {
  display: block;
  margin: 1rem 0;
  border-bottom: 1px solid var(--folio-muted);
}
"#;
