//! Deep-link resolution against the catalog.
//!
//! Resolution is the only step in the pipeline that can fail, and it fails
//! with a value rather than a panic so the overlay can show a visible
//! message instead of a blank transparent page.

use crate::link::LinkRequest;
use crate::types::AnimationAsset;
use thiserror::Error;

/// Identifier given to assets synthesized from external-source links.
pub const EXTERNAL_PREVIEW_ID: &str = "external-preview";

/// Title given to assets synthesized from external-source links.
pub const EXTERNAL_PREVIEW_TITLE: &str = "External Preview";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unknown id: {0}")]
    UnknownId(String),
    #[error("missing identifier")]
    MissingIdentifier,
}

impl ResolveError {
    /// Message the overlay view shows in place of the asset.
    pub fn user_message(&self) -> &'static str {
        "Animation not found. Check the ID or the URL."
    }
}

fn find<'a>(catalog: &'a [AnimationAsset], id: &str) -> Option<&'a AnimationAsset> {
    catalog.iter().find(|asset| asset.id == id)
}

/// Find the asset a deep link refers to.
///
/// A catalog match on the path segment always wins; an external `src` is
/// only synthesized into an asset when the segment matches nothing.
pub fn resolve(
    request: &LinkRequest,
    catalog: &[AnimationAsset],
) -> Result<AnimationAsset, ResolveError> {
    match request {
        LinkRequest::ById { id } => find(catalog, id)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownId(id.clone())),
        LinkRequest::External { id, src, asset_type } => {
            if let Some(asset) = id.as_deref().and_then(|id| find(catalog, id)) {
                return Ok(asset.clone());
            }
            Ok(AnimationAsset {
                id: EXTERNAL_PREVIEW_ID.to_string(),
                title: EXTERNAL_PREVIEW_TITLE.to_string(),
                category: None,
                asset_type: *asset_type,
                src: src.clone(),
                loop_playback: true,
                width: None,
                height: None,
            })
        }
        LinkRequest::Invalid => Err(ResolveError::MissingIdentifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::link::{decode_link, encode_external_link, encode_link};
    use crate::test_helpers::discovered;
    use crate::types::{AssetType, Category};

    fn catalog() -> Vec<AnimationAsset> {
        build_catalog(&discovered(&["inicio 1.mp4", "brb.webm", "marco.png"]))
    }

    #[test]
    fn resolves_catalog_asset_by_id() {
        let catalog = catalog();
        let asset = resolve(
            &LinkRequest::ById {
                id: "brb-webm".to_string(),
            },
            &catalog,
        )
        .unwrap();
        assert_eq!(asset.title, "Brb");
        assert_eq!(asset.category, Some(Category::SceneBrb));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let err = resolve(
            &LinkRequest::ById {
                id: "missing".to_string(),
            },
            &catalog(),
        )
        .unwrap_err();
        assert_eq!(err, ResolveError::UnknownId("missing".to_string()));
        assert_eq!(err.to_string(), "unknown id: missing");
    }

    #[test]
    fn invalid_request_is_missing_identifier() {
        let err = resolve(&LinkRequest::Invalid, &catalog()).unwrap_err();
        assert_eq!(err, ResolveError::MissingIdentifier);
        assert!(err.user_message().contains("not found"));
    }

    #[test]
    fn external_request_synthesizes_uncategorized_asset() {
        let request = decode_link(&encode_external_link(
            "https://host/",
            "https://cdn.example/alert.png",
            AssetType::Image,
        ));
        let asset = resolve(&request, &[]).unwrap();
        assert_eq!(asset.id, EXTERNAL_PREVIEW_ID);
        assert_eq!(asset.title, EXTERNAL_PREVIEW_TITLE);
        assert_eq!(asset.category, None);
        assert_eq!(asset.asset_type, AssetType::Image);
        assert_eq!(asset.src, "https://cdn.example/alert.png");
        assert!(asset.loop_playback);
    }

    #[test]
    fn catalog_id_wins_over_src() {
        let catalog = catalog();
        let request = decode_link("https://host/#/overlay/brb-webm?src=https%3A%2F%2Fcdn%2Fx.mp4");
        let asset = resolve(&request, &catalog).unwrap();
        assert_eq!(asset.id, "brb-webm");
        assert_eq!(asset.category, Some(Category::SceneBrb));
    }

    #[test]
    fn unmatched_id_falls_back_to_src() {
        let request = decode_link("https://host/#/overlay/gone-webm?src=https%3A%2F%2Fcdn%2Fx.mp4");
        let asset = resolve(&request, &catalog()).unwrap();
        assert_eq!(asset.id, EXTERNAL_PREVIEW_ID);
        assert_eq!(asset.src, "https://cdn/x.mp4");
        assert_eq!(asset.asset_type, AssetType::Video);
    }

    #[test]
    fn malformed_escape_in_id_is_not_found() {
        let err = resolve(&decode_link("https://host/#/overlay/%E0%A4"), &catalog()).unwrap_err();
        assert_eq!(err, ResolveError::UnknownId("\u{FFFD}".to_string()));
    }

    #[test]
    fn reserved_characters_in_ids_resolve() {
        let catalog = build_catalog(&discovered(&["what?.mp4", "100%25 off.mp4", "brb.webm"]));
        for asset in &catalog {
            let request = decode_link(&encode_link("https://host/", &asset.id));
            assert_eq!(resolve(&request, &catalog).unwrap(), *asset);
        }
    }

    #[test]
    fn every_catalog_link_resolves_to_its_asset() {
        let catalog = catalog();
        for asset in &catalog {
            let request = decode_link(&encode_link("https://host/", &asset.id));
            assert_eq!(resolve(&request, &catalog).unwrap(), *asset);
        }
    }
}
