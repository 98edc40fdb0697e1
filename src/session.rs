//! Per-session gallery state for the editable dashboard.
//!
//! The scanned catalog is immutable; a [`Session`] owns a working copy that
//! an admin can reshape for the current session only. Nothing here writes to
//! disk: hiding an asset filters it out of the list, and temporary assets
//! point at ephemeral local references that die with the session.
//!
//! Every mutation replaces the asset list wholesale (a filter or a prepend),
//! so readers holding `&[AnimationAsset]` never observe a partial update.
//!
//! The admin gate is a plain shared-secret comparison. It keeps casual
//! visitors away from the editing controls; it is not access control.

use crate::types::{AnimationAsset, AssetType, Category, CategoryFilter};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Prefix of identifiers given to temporary local assets.
pub const TEMP_ID_PREFIX: &str = "temp-";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("admin mode is locked")]
    Locked,
    #[error("unknown id: {0}")]
    UnknownId(String),
}

/// An asset's media failed to load in the rendering layer.
///
/// The asset stays in the list; the mark only changes how it is shown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{id}: {reason}")]
pub struct MediaLoadError {
    pub id: String,
    pub reason: String,
}

/// Exact-match shared secret.
#[derive(Debug, Clone)]
pub struct AdminGate {
    secret: String,
}

impl AdminGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn check(&self, attempt: &str) -> bool {
        attempt == self.secret
    }
}

/// A local file picked for a quick, session-only preview.
#[derive(Debug, Clone)]
pub struct LocalFile {
    pub name: String,
    pub mime: String,
    /// Ephemeral reference to the file's bytes (a blob or `file://` URL).
    pub blob_url: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    assets: Vec<AnimationAsset>,
    gate: AdminGate,
    admin: bool,
    failures: BTreeMap<String, MediaLoadError>,
}

impl Session {
    pub fn new(assets: Vec<AnimationAsset>, gate: AdminGate) -> Self {
        Self {
            assets,
            gate,
            admin: false,
            failures: BTreeMap::new(),
        }
    }

    pub fn assets(&self) -> &[AnimationAsset] {
        &self.assets
    }

    /// Assets matching the filter, in catalog order.
    pub fn visible(&self, filter: CategoryFilter) -> Vec<&AnimationAsset> {
        self.assets.iter().filter(|a| filter.matches(a)).collect()
    }

    /// Try the secret. A wrong attempt leaves the current mode unchanged.
    pub fn unlock(&mut self, attempt: &str) -> bool {
        if self.gate.check(attempt) {
            self.admin = true;
        }
        self.admin
    }

    pub fn lock(&mut self) {
        self.admin = false;
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Remove an asset from this session's view. The file is untouched.
    pub fn hide_asset(&mut self, id: &str) -> Result<(), SessionError> {
        self.require_admin()?;
        if !self.assets.iter().any(|a| a.id == id) {
            return Err(SessionError::UnknownId(id.to_string()));
        }
        self.assets = self
            .assets
            .iter()
            .filter(|a| a.id != id)
            .cloned()
            .collect();
        log::info!("hid {id} for this session");
        Ok(())
    }

    /// Put a local file at the front of the list for this session.
    ///
    /// The asset is filed under the active category, or Donations when the
    /// dashboard shows everything.
    pub fn add_temporary_asset(
        &mut self,
        file: LocalFile,
        active: CategoryFilter,
    ) -> Result<&AnimationAsset, SessionError> {
        self.require_admin()?;

        let asset_type = if file.mime.starts_with("video") {
            AssetType::Video
        } else {
            AssetType::Image
        };
        let category = match active {
            CategoryFilter::All => Category::AlertsDonation,
            CategoryFilter::Only(cat) => cat,
        };

        let asset = AnimationAsset {
            id: self.temp_id(),
            title: format!("{} (local only)", file.name),
            category: Some(category),
            asset_type,
            src: file.blob_url,
            loop_playback: asset_type == AssetType::Video,
            width: None,
            height: None,
        };
        log::info!("added temporary asset {} from {}", asset.id, file.name);

        let mut assets = Vec::with_capacity(self.assets.len() + 1);
        assets.push(asset);
        assets.extend(self.assets.iter().cloned());
        self.assets = assets;
        Ok(&self.assets[0])
    }

    /// Record that an asset's media could not be loaded.
    pub fn mark_load_failed(&mut self, id: &str, reason: impl Into<String>) {
        let failure = MediaLoadError {
            id: id.to_string(),
            reason: reason.into(),
        };
        log::warn!("media failed to load: {failure}");
        self.failures.insert(id.to_string(), failure);
    }

    /// The recorded load failure for an asset, if any.
    pub fn load_failure(&self, id: &str) -> Option<&MediaLoadError> {
        self.failures.get(id)
    }

    fn require_admin(&self) -> Result<(), SessionError> {
        if self.admin {
            Ok(())
        } else {
            Err(SessionError::Locked)
        }
    }

    /// `temp-<unix millis>`, suffixed when two adds land in the same millisecond.
    fn temp_id(&self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let base = format!("{TEMP_ID_PREFIX}{millis}");
        let taken = |id: &str| self.assets.iter().any(|a| a.id == id);
        if !taken(&base) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::test_helpers::{asset_titles, discovered};

    fn session() -> Session {
        let assets = build_catalog(&discovered(&["inicio.mp4", "brb.webm", "marco.png"]));
        Session::new(assets, AdminGate::new("s3cret"))
    }

    fn clip() -> LocalFile {
        LocalFile {
            name: "test.webm".to_string(),
            mime: "video/webm".to_string(),
            blob_url: "blob:local/1".to_string(),
        }
    }

    #[test]
    fn gate_is_exact_match() {
        let gate = AdminGate::new("s3cret");
        assert!(gate.check("s3cret"));
        assert!(!gate.check("S3CRET"));
        assert!(!gate.check("s3cret "));
        assert!(!gate.check(""));
    }

    #[test]
    fn wrong_secret_stays_locked() {
        let mut s = session();
        assert!(!s.unlock("nope"));
        assert!(!s.is_admin());
        assert!(s.unlock("s3cret"));
        s.lock();
        assert!(!s.is_admin());
    }

    #[test]
    fn hide_requires_admin() {
        let mut s = session();
        assert_eq!(s.hide_asset("brb-webm"), Err(SessionError::Locked));
        assert_eq!(s.assets().len(), 3);
    }

    #[test]
    fn hide_filters_by_id() {
        let mut s = session();
        s.unlock("s3cret");
        s.hide_asset("brb-webm").unwrap();
        assert_eq!(asset_titles(s.assets()), vec!["Inicio", "Marco"]);
        assert_eq!(
            s.hide_asset("brb-webm"),
            Err(SessionError::UnknownId("brb-webm".to_string()))
        );
    }

    #[test]
    fn visible_respects_filter() {
        let s = session();
        assert_eq!(s.visible(CategoryFilter::All).len(), 3);
        let cams = s.visible(CategoryFilter::Only(Category::OverlayCam));
        assert_eq!(cams.len(), 1);
        assert_eq!(cams[0].id, "marco-png");
        assert!(s.visible(CategoryFilter::Only(Category::AlertsSub)).is_empty());
    }

    #[test]
    fn temporary_asset_is_prepended() {
        let mut s = session();
        s.unlock("s3cret");
        let asset = s.add_temporary_asset(clip(), CategoryFilter::All).unwrap().clone();
        assert!(asset.id.starts_with(TEMP_ID_PREFIX));
        assert_eq!(asset.title, "test.webm (local only)");
        assert_eq!(asset.category, Some(Category::AlertsDonation));
        assert_eq!(asset.asset_type, AssetType::Video);
        assert!(asset.loop_playback);
        assert_eq!(asset.src, "blob:local/1");
        assert_eq!(s.assets()[0], asset);
        assert_eq!(s.assets().len(), 4);
    }

    #[test]
    fn temporary_image_takes_active_category_and_does_not_loop() {
        let mut s = session();
        s.unlock("s3cret");
        let file = LocalFile {
            name: "frame.png".to_string(),
            mime: "image/png".to_string(),
            blob_url: "blob:local/2".to_string(),
        };
        let asset = s
            .add_temporary_asset(file, CategoryFilter::Only(Category::SceneBrb))
            .unwrap();
        assert_eq!(asset.category, Some(Category::SceneBrb));
        assert_eq!(asset.asset_type, AssetType::Image);
        assert!(!asset.loop_playback);
    }

    #[test]
    fn temporary_ids_are_unique() {
        let mut s = session();
        s.unlock("s3cret");
        let first = s.add_temporary_asset(clip(), CategoryFilter::All).unwrap().id.clone();
        let second = s.add_temporary_asset(clip(), CategoryFilter::All).unwrap().id.clone();
        assert_ne!(first, second);
    }

    #[test]
    fn temporary_asset_requires_admin() {
        let mut s = session();
        assert!(matches!(
            s.add_temporary_asset(clip(), CategoryFilter::All),
            Err(SessionError::Locked)
        ));
    }

    #[test]
    fn load_failure_keeps_asset() {
        let mut s = session();
        s.mark_load_failed("marco-png", "file is empty");
        assert_eq!(s.assets().len(), 3);
        let failure = s.load_failure("marco-png").unwrap();
        assert_eq!(failure.to_string(), "marco-png: file is empty");
        assert!(s.load_failure("brb-webm").is_none());
    }
}
