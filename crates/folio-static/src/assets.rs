//! Site asset handling: the bundle manifest and static file copying.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use folio_runtime::BundleManifest;

use crate::builder::BuildError;

/// Write `bundle.json` describing every loaded bundle next to the built site.
pub fn write_bundle_manifest(
    site_root: &Path,
    manifests: &[BundleManifest],
) -> Result<(), BuildError> {
    let json = serde_json::to_string_pretty(manifests)
        .map_err(|e| BuildError::WriteError(e.to_string()))?;

    fs::write(site_root.join("bundle.json"), json)
        .map_err(|e| BuildError::WriteError(e.to_string()))
}

/// Copy the source `assets/` directory into the built site, preserving
/// structure. A missing assets directory is fine; themes can ship their own.
pub fn copy_assets(assets_dir: &Path, site_root: &Path) -> Result<(), BuildError> {
    if !assets_dir.exists() {
        return Ok(());
    }

    let mut copied = 0;
    for entry in WalkDir::new(assets_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(assets_dir).unwrap_or(path);
        let dest = site_root.join("assets").join(relative);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }
        fs::copy(path, &dest).map_err(|e| BuildError::WriteError(e.to_string()))?;
        copied += 1;
    }

    if copied > 0 {
        tracing::debug!(copied, "copied site assets");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_runtime::Bundle;
    use tempfile::tempdir;

    #[test]
    fn manifest_lists_loaded_bundles() {
        let temp = tempdir().unwrap();
        let manifests = vec![Bundle::standard().manifest()];

        write_bundle_manifest(temp.path(), &manifests).unwrap();

        let raw = fs::read_to_string(temp.path().join("bundle.json")).unwrap();
        let parsed: Vec<BundleManifest> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, manifests);
        assert_eq!(parsed[0].bundle, "folio-standard");
    }

    #[test]
    fn copies_nested_asset_files() {
        let temp = tempdir().unwrap();
        let assets = temp.path().join("assets");
        let site = temp.path().join("site");

        fs::create_dir_all(assets.join("fonts")).unwrap();
        fs::create_dir_all(&site).unwrap();
        fs::write(assets.join("theme-slate.css"), "body{}").unwrap();
        fs::write(assets.join("fonts").join("inter.woff2"), [0u8; 4]).unwrap();

        copy_assets(&assets, &site).unwrap();

        assert!(site.join("assets/theme-slate.css").exists());
        assert!(site.join("assets/fonts/inter.woff2").exists());
    }

    #[test]
    fn missing_assets_directory_is_not_an_error() {
        let temp = tempdir().unwrap();

        copy_assets(&temp.path().join("assets"), temp.path()).unwrap();
    }
}
