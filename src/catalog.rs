//! Catalog building: discovered files → ordered asset records.
//!
//! The catalog builder is the pure heart of the pipeline. It takes the
//! discovery mapping (source-relative path → resolved URL), classifies each
//! file, and returns the assets sorted the way creators expect to see them.
//! It never touches the filesystem and never fails: an empty mapping is an
//! empty catalog.
//!
//! ## Ordering
//!
//! Assets are sorted by title with [`natural_cmp`], which compares runs of
//! digits as numbers and ignores case and Latin accents. Creators rely on
//! numeric suffixes to order the gallery, so `Intro 2` must come before
//! `Intro 10`.
//!
//! ## Identifier Collisions
//!
//! Identifiers replace dots with dashes, so `a.b.mp4` and `a-b.mp4` both
//! map to `a-b-mp4`. The first path (in mapping order) keeps the plain id;
//! later ones get `-2`, `-3`, ... so every deep link stays addressable.

use crate::classify::{classify_category, classify_type};
use crate::naming::{asset_id, format_title};
use crate::types::AnimationAsset;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Filename used when a discovered path ends in a separator.
const UNKNOWN_FILENAME: &str = "unknown-file";

/// Result of a catalog build.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Assets in display order.
    pub assets: Vec<AnimationAsset>,
    /// Asset id → discovered (source-relative) path.
    pub paths: BTreeMap<String, String>,
}

/// Build the ordered asset list from a discovery mapping.
pub fn build_catalog(discovered: &BTreeMap<String, String>) -> Vec<AnimationAsset> {
    build_catalog_with_paths(discovered).assets
}

/// Build the ordered asset list and keep track of where each asset came from.
pub fn build_catalog_with_paths(discovered: &BTreeMap<String, String>) -> Catalog {
    let mut paths: BTreeMap<String, String> = BTreeMap::new();
    let mut assets = Vec::with_capacity(discovered.len());

    for (path, url) in discovered {
        let filename = match path.rsplit('/').next() {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_FILENAME,
        };

        let base = asset_id(filename);
        let id = unique_id(&base, &paths);
        if id != base {
            log::warn!("{path} collides with {} on id '{base}'; using '{id}'", paths[&base]);
        }
        log::debug!("catalog entry {id} ← {path}");
        paths.insert(id.clone(), path.clone());

        assets.push(AnimationAsset {
            id,
            title: format_title(filename),
            category: Some(classify_category(filename)),
            asset_type: classify_type(filename),
            src: url.clone(),
            loop_playback: true,
            width: None,
            height: None,
        });
    }

    // Stable: equal titles keep mapping order.
    assets.sort_by(|a, b| natural_cmp(&a.title, &b.title));

    Catalog { assets, paths }
}

fn unique_id(base: &str, taken: &BTreeMap<String, String>) -> String {
    if !taken.contains_key(base) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken.contains_key(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Compare two titles the way a person reads them.
///
/// Digit runs compare by numeric value, everything else compares by
/// lowercased, accent-folded character.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let (l, r) = match (left.peek(), right.peek()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(&l), Some(&r)) => (l, r),
        };

        if l.is_ascii_digit() && r.is_ascii_digit() {
            let ln = take_digits(&mut left);
            let rn = take_digits(&mut right);
            match cmp_digit_runs(&ln, &rn) {
                Ordering::Equal => continue,
                other => return other,
            }
        }

        match fold(l).cmp(&fold(r)) {
            Ordering::Equal => {
                left.next();
                right.next();
            }
            other => return other,
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits
}

/// Numeric comparison of arbitrarily long digit strings.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Lowercase and strip Latin-1 accents.
fn fold(c: char) -> char {
    let lower = c.to_lowercase().next().unwrap_or(c);
    match lower {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{asset_ids, asset_titles, discovered, find_asset};
    use crate::types::{AssetType, Category};

    #[test]
    fn empty_discovery_is_empty_catalog() {
        assert!(build_catalog(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn numeric_suffixes_sort_numerically() {
        let catalog = build_catalog(&discovered(&[
            "animations/Intro 10.mp4",
            "animations/Intro 2.mp4",
            "animations/Intro 1.mp4",
        ]));
        assert_eq!(asset_titles(&catalog), vec!["Intro 1", "Intro 2", "Intro 10"]);
    }

    #[test]
    fn sort_ignores_case_and_accents() {
        let catalog = build_catalog(&discovered(&["b.png", "Álbum.png", "apple.png"]));
        assert_eq!(asset_titles(&catalog), vec!["Álbum", "Apple", "B"]);
    }

    #[test]
    fn record_fields_derived_from_filename() {
        let catalog = build_catalog(&discovered(&["animations/donacion_grande.webm"]));
        let asset = find_asset(&catalog, "Donacion Grande");
        assert_eq!(asset.id, "donacion_grande-webm");
        assert_eq!(asset.category, Some(Category::AlertsDonation));
        assert_eq!(asset.asset_type, AssetType::Video);
        assert_eq!(asset.src, "media/animations/donacion_grande.webm");
        assert!(asset.loop_playback);
    }

    #[test]
    fn images_loop_too() {
        let catalog = build_catalog(&discovered(&["marco.png"]));
        assert!(catalog[0].loop_playback);
        assert_eq!(catalog[0].asset_type, AssetType::Image);
    }

    #[test]
    fn colliding_ids_are_suffixed() {
        let built = build_catalog_with_paths(&discovered(&["a-b.mp4", "a.b.mp4"]));
        let mut ids = asset_ids(&built.assets);
        ids.sort();
        assert_eq!(ids, vec!["a-b-mp4", "a-b-mp4-2"]);
        // Mapping order decides who keeps the plain id.
        assert_eq!(built.paths["a-b-mp4"], "a-b.mp4");
        assert_eq!(built.paths["a-b-mp4-2"], "a.b.mp4");
    }

    #[test]
    fn suffix_skips_ids_already_taken() {
        // Mapping order: "a-mp4", "a-mp4-2", "a.mp4".
        let built = build_catalog_with_paths(&discovered(&["a.mp4", "a-mp4", "a-mp4-2"]));
        let ids: Vec<&str> = built.paths.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["a-mp4", "a-mp4-2", "a-mp4-3"]);
        assert_eq!(built.paths["a-mp4-3"], "a.mp4");
    }

    #[test]
    fn trailing_separator_uses_unknown_filename() {
        let catalog = build_catalog(&discovered(&["animations/"]));
        assert_eq!(catalog[0].id, "unknown-file");
    }

    #[test]
    fn natural_cmp_cases() {
        assert_eq!(natural_cmp("Item 2", "Item 10"), Ordering::Less);
        assert_eq!(natural_cmp("item 02", "Item 2"), Ordering::Equal);
        assert_eq!(natural_cmp("Inicio", "inicio 1"), Ordering::Less);
        assert_eq!(natural_cmp("Cámara", "camara"), Ordering::Equal);
        assert_eq!(natural_cmp("a 99999999999999999999", "a 100000000000000000000"), Ordering::Less);
    }
}
