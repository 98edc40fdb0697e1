//! Shared types used across the scan and generate stages.
//!
//! These types are serialized to JSON in the scan manifest and read back by
//! the generator, so their serde names are part of the on-disk format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Media kind of an asset, decided by file extension only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetType {
    Video,
    Image,
    Gif,
}

impl AssetType {
    /// Wire name, as used in `type=` deep-link parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            AssetType::Video => "VIDEO",
            AssetType::Image => "IMAGE",
            AssetType::Gif => "GIF",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sidebar bucket an asset is filed under.
///
/// The set is closed. [`Category::SceneIntro`] doubles as the fallback when
/// a filename matches no keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    AlertsDonation,
    AlertsFollower,
    AlertsSub,
    #[default]
    SceneIntro,
    SceneEnding,
    SceneBrb,
    OverlayCam,
}

impl Category {
    /// All categories in sidebar order.
    pub const ALL: [Category; 7] = [
        Category::AlertsDonation,
        Category::AlertsFollower,
        Category::AlertsSub,
        Category::SceneIntro,
        Category::SceneEnding,
        Category::SceneBrb,
        Category::OverlayCam,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::AlertsDonation => "Donations",
            Category::AlertsFollower => "New Followers",
            Category::AlertsSub => "Subscribers",
            Category::SceneIntro => "Stream Intro",
            Category::SceneEnding => "Stream Ending",
            Category::SceneBrb => "Be Right Back (BRB)",
            Category::OverlayCam => "Camera Frame",
        }
    }

    /// URL-safe name used for category page filenames and CLI filters.
    pub fn slug(self) -> &'static str {
        match self {
            Category::AlertsDonation => "donations",
            Category::AlertsFollower => "followers",
            Category::AlertsSub => "subscribers",
            Category::SceneIntro => "intro",
            Category::SceneEnding => "ending",
            Category::SceneBrb => "brb",
            Category::OverlayCam => "camera",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

/// Active dashboard filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, asset: &AnimationAsset) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(cat) => asset.category == Some(cat),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "Overview",
            CategoryFilter::Only(cat) => cat.label(),
        }
    }
}

/// A single displayable media item.
///
/// Catalog entries always carry a category. The synthetic external preview
/// built from deep-link parameters has none, since nothing displays it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationAsset {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    /// Resolved URL: a site-relative media path or a remote URL.
    pub src: String,
    #[serde(rename = "loop", default = "default_loop")]
    pub loop_playback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

fn default_loop() -> bool {
    true
}
