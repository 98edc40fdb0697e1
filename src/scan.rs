//! Filesystem scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Finds the media files in the source
//! directory, hands the resulting discovery mapping to the catalog builder,
//! and produces a [`Manifest`] the generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! animations/                  # Source directory
//! ├── config.toml              # Site configuration (optional)
//! ├── notes.md                 # Dashboard notes, rendered in the sidebar (optional)
//! ├── inicio 1.mp4             # → Stream Intro, "Inicio 1"
//! ├── inicio 2.mp4
//! ├── donacion-grande.webm     # → Donations, "Donacion Grande"
//! ├── camara v2.png            # → Camera Frame, "Camara V2"
//! └── .drafts/                 # Hidden entries are skipped
//! ```
//!
//! Only the top level is scanned unless `discovery.recursive` is set.
//!
//! ## Discovery Mapping
//!
//! Each accepted file becomes one entry: its `/`-separated path relative to
//! the source directory, mapped to the URL the generated site serves it
//! from (`media/` + the path, each segment percent-encoded).

use crate::catalog::build_catalog_with_paths;
use crate::config::{self, DiscoveryConfig, SiteConfig};
use crate::link::encode_component;
use crate::types::AnimationAsset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Directory inside the output where media files are copied.
pub const MEDIA_DIR: &str = "media";

/// Optional markdown file with notes for the dashboard sidebar.
pub const NOTES_FILENAME: &str = "notes.md";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Source directory not found: {0}")]
    MissingSource(PathBuf),
}

/// Manifest output from the scan stage
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    /// Catalog in display order.
    pub assets: Vec<AnimationAsset>,
    /// Asset id → source-relative path, for copying media.
    pub files: BTreeMap<String, String>,
    /// Raw markdown from `notes.md`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub config: SiteConfig,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingSource(root.to_path_buf()));
    }

    // Load site config (uses defaults if config.toml doesn't exist)
    let config = config::load_config(root)?;

    let discovered = discover(root, &config.discovery)?;
    let catalog = build_catalog_with_paths(&discovered);
    if catalog.assets.is_empty() {
        log::warn!("no media files found in {}", root.display());
    } else {
        log::info!(
            "found {} media files in {}",
            catalog.assets.len(),
            root.display()
        );
    }

    let notes = read_notes(root)?;

    Ok(Manifest {
        assets: catalog.assets,
        files: catalog.paths,
        notes,
        config,
    })
}

/// Build the discovery mapping: relative path → resolved media URL.
pub fn discover(
    root: &Path,
    discovery: &DiscoveryConfig,
) -> Result<BTreeMap<String, String>, ScanError> {
    let max_depth = if discovery.recursive { usize::MAX } else { 1 };
    let mut found = BTreeMap::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !discovery.accepts(entry.path()) {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let segments: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        let url = format!("{MEDIA_DIR}/{}", media_url_path(&segments));
        log::debug!("discovered {}", rel.display());
        found.insert(segments.join("/"), url);
    }

    Ok(found)
}

fn media_url_path(segments: &[String]) -> String {
    segments
        .iter()
        .map(|s| encode_component(s))
        .collect::<Vec<_>>()
        .join("/")
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn read_notes(root: &Path) -> Result<Option<String>, ScanError> {
    let notes_path = root.join(NOTES_FILENAME);
    if !notes_path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&notes_path)?.trim().to_string();
    Ok(if content.is_empty() { None } else { Some(content) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{asset_titles, find_asset, setup_assets};
    use crate::types::{AssetType, Category};
    use tempfile::TempDir;

    #[test]
    fn scan_finds_media_files() {
        let tmp = setup_assets(&["inicio 1.mp4", "brb.webm", "marco.png", "loop.gif"]);
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.assets.len(), 4);
    }

    #[test]
    fn non_media_files_ignored() {
        let tmp = setup_assets(&["intro.mp4", "readme.txt", "script.js"]);
        fs::write(tmp.path().join(NOTES_FILENAME), "# Notes").unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(asset_titles(&manifest.assets), vec!["Intro"]);
    }

    #[test]
    fn hidden_files_and_dirs_skipped() {
        let tmp = setup_assets(&[".secret.mp4", "visible.mp4"]);
        fs::create_dir_all(tmp.path().join(".drafts")).unwrap();
        fs::write(tmp.path().join(".drafts/draft.mp4"), "fake video").unwrap();

        let config = DiscoveryConfig {
            recursive: true,
            ..DiscoveryConfig::default()
        };
        let found = discover(tmp.path(), &config).unwrap();
        assert_eq!(found.keys().collect::<Vec<_>>(), vec!["visible.mp4"]);
    }

    #[test]
    fn subdirectories_need_recursive() {
        let tmp = setup_assets(&["top.png"]);
        fs::create_dir_all(tmp.path().join("alerts")).unwrap();
        fs::write(tmp.path().join("alerts/follow 1.webm"), "fake video").unwrap();

        let flat = discover(tmp.path(), &DiscoveryConfig::default()).unwrap();
        assert_eq!(flat.len(), 1);

        let config = DiscoveryConfig {
            recursive: true,
            ..DiscoveryConfig::default()
        };
        let deep = discover(tmp.path(), &config).unwrap();
        assert_eq!(deep["alerts/follow 1.webm"], "media/alerts/follow%201.webm");
    }

    #[test]
    fn uppercase_extensions_discovered() {
        let tmp = setup_assets(&["CLIP.MP4"]);
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.assets[0].asset_type, AssetType::Video);
    }

    #[test]
    fn media_urls_are_percent_encoded() {
        let tmp = setup_assets(&["cámara #2.png"]);
        let manifest = scan(tmp.path()).unwrap();
        let asset = find_asset(&manifest.assets, "Cámara #2");
        assert_eq!(asset.src, "media/c%C3%A1mara%20%232.png");
        assert_eq!(asset.category, Some(Category::OverlayCam));
    }

    #[test]
    fn files_map_ids_to_relative_paths() {
        let tmp = setup_assets(&["intro 2.mp4"]);
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.files["intro 2-mp4"], "intro 2.mp4");
    }

    #[test]
    fn empty_source_gives_empty_catalog() {
        let tmp = TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert!(manifest.assets.is_empty());
        assert!(manifest.files.is_empty());
    }

    #[test]
    fn missing_source_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(&tmp.path().join("nope"));
        assert!(matches!(result, Err(ScanError::MissingSource(_))));
    }

    #[test]
    fn notes_read_when_present() {
        let tmp = setup_assets(&["intro.mp4"]);
        fs::write(tmp.path().join(NOTES_FILENAME), "\n# Drop files here\n\n").unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.notes.as_deref(), Some("# Drop files here"));
    }

    #[test]
    fn config_extensions_restrict_discovery() {
        let tmp = setup_assets(&["intro.mp4", "frame.png"]);
        fs::write(
            tmp.path().join(config::CONFIG_FILENAME),
            "[discovery]\nextensions = [\"png\"]\n",
        )
        .unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(asset_titles(&manifest.assets), vec!["Frame"]);
    }

    #[test]
    fn invalid_config_fails_scan() {
        let tmp = setup_assets(&["intro.mp4"]);
        fs::write(tmp.path().join(config::CONFIG_FILENAME), "bogus = 1").unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::Config(_))));
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let tmp = setup_assets(&["inicio.mp4", "marco.png"]);
        let manifest = scan(tmp.path()).unwrap();
        let json = serde_json::to_string(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.assets, manifest.assets);
        assert_eq!(back.files, manifest.files);
    }
}
