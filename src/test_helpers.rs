//! Shared test utilities for the overlay-gal test suite.
//!
//! Provides fixture setup, discovery-mapping builders, and lookup helpers
//! that work with catalog data (`AnimationAsset` slices).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_assets(&["inicio 1.mp4", "marco.png"]);
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let asset = find_asset(&manifest.assets, "Inicio 1");
//! assert_eq!(asset.id, "inicio 1-mp4");
//! ```

use std::collections::BTreeMap;
use tempfile::TempDir;

use crate::scan::MEDIA_DIR;
use crate::types::AnimationAsset;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp source directory containing placeholder media files.
///
/// Scanning only looks at names, so the contents are a fixed short string.
pub fn setup_assets(filenames: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for name in filenames {
        let path = tmp.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, "fake media").unwrap();
    }
    tmp
}

/// Build a discovery mapping for the given paths, resolving each under `media/`.
pub fn discovered(paths: &[&str]) -> BTreeMap<String, String> {
    paths
        .iter()
        .map(|p| (p.to_string(), format!("{MEDIA_DIR}/{p}")))
        .collect()
}

// =========================================================================
// Catalog lookups: panic with a clear message on miss
// =========================================================================

/// Find an asset by title. Panics if not found.
pub fn find_asset<'a>(assets: &'a [AnimationAsset], title: &str) -> &'a AnimationAsset {
    assets.iter().find(|a| a.title == title).unwrap_or_else(|| {
        let titles = asset_titles(assets);
        panic!("asset '{title}' not found. Available: {titles:?}")
    })
}

/// All asset titles in catalog order.
pub fn asset_titles(assets: &[AnimationAsset]) -> Vec<&str> {
    assets.iter().map(|a| a.title.as_str()).collect()
}

/// All asset ids in catalog order.
pub fn asset_ids(assets: &[AnimationAsset]) -> Vec<&str> {
    assets.iter().map(|a| a.id.as_str()).collect()
}
