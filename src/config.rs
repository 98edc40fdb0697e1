//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the source directory next to the media files; stock defaults are
//! overridden by whatever keys the file sets.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Stream Assets"          # Dashboard heading and <title>
//! subtitle = "OBS overlay manager" # Line under the heading
//! base_url = ""                    # Prefix for deep links ("" = relative)
//!
//! [discovery]
//! recursive = false                # Also look inside subdirectories
//! extensions = ["mp4", "webm", "mov", "png", "gif", "jpg", "jpeg", "svg"]
//!
//! [admin]
//! secret = "admin"                 # Shared secret for the admin gate
//!
//! [colors]
//! background = "#0f172a"
//! surface = "#1e293b"
//! text = "#f1f5f9"
//! text_muted = "#94a3b8"
//! accent = "#a855f7"
//! border = "#334155"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [colors]
//! accent = "#22c55e"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file inside the source directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Dashboard heading and page title.
    pub title: String,
    /// Line shown under the heading.
    pub subtitle: String,
    /// Page URL deep links are built on. Empty keeps links relative to the
    /// dashboard (`#/overlay/<id>`).
    pub base_url: String,
    /// Which files count as media.
    pub discovery: DiscoveryConfig,
    /// Admin gate settings.
    pub admin: AdminConfig,
    /// Dashboard color scheme.
    pub colors: ColorScheme,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Stream Assets".to_string(),
            subtitle: "OBS overlay manager".to_string(),
            base_url: String::new(),
            discovery: DiscoveryConfig::default(),
            admin: AdminConfig::default(),
            colors: ColorScheme::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if self.discovery.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "discovery.extensions must not be empty".into(),
            ));
        }
        if let Some(bad) = self
            .discovery
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.contains('.'))
        {
            return Err(ConfigError::Validation(format!(
                "discovery.extensions entries are bare extensions without dots, got {bad:?}"
            )));
        }
        if self.admin.secret.is_empty() {
            return Err(ConfigError::Validation(
                "admin.secret must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Media discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Descend into subdirectories of the source directory.
    pub recursive: bool,
    /// Accepted file extensions, compared case-insensitively.
    pub extensions: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            extensions: ["mp4", "webm", "mov", "png", "gif", "jpg", "jpeg", "svg"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl DiscoveryConfig {
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .map(|e| {
                let ext = e.to_string_lossy();
                self.extensions.iter().any(|x| x.eq_ignore_ascii_case(&ext))
            })
            .unwrap_or(false)
    }
}

/// Admin gate settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdminConfig {
    /// Compared verbatim against the attempt. Visible to anyone who can read
    /// the config; it gates editing controls, nothing more.
    pub secret: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            secret: "admin".to_string(),
        }
    }
}

/// Dashboard color scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Sidebar and card background.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Secondary text (counts, hints, link previews).
    pub text_muted: String,
    /// Active filter, category badges, buttons.
    pub accent: String,
    /// Border color.
    pub border: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: "#0f172a".to_string(),
            surface: "#1e293b".to_string(),
            text: "#f1f5f9".to_string(),
            text_muted: "#94a3b8".to_string(),
            accent: "#a855f7".to_string(),
            border: "#334155".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    if overlay.is_some() {
        log::debug!("loaded {}", root.join(CONFIG_FILENAME).display());
    }
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# overlay-gal configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the source directory, next to your media files.
# Unknown keys will cause an error.

# Dashboard heading and page title.
title = "Stream Assets"

# Line shown under the heading.
subtitle = "OBS overlay manager"

# Page URL deep links are built on, e.g. "https://me.github.io/overlays/".
# Leave empty to keep links relative to the dashboard ("#/overlay/<id>").
base_url = ""

# ---------------------------------------------------------------------------
# Discovery
# ---------------------------------------------------------------------------
[discovery]
# Also look for media inside subdirectories.
recursive = false

# File extensions that count as media (case-insensitive, no dots).
extensions = ["mp4", "webm", "mov", "png", "gif", "jpg", "jpeg", "svg"]

# ---------------------------------------------------------------------------
# Admin gate
# ---------------------------------------------------------------------------
[admin]
# Shared secret for the editing controls. Anyone who can read this file can
# read the secret: it hides controls, it does not protect anything.
secret = "admin"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#0f172a"
surface = "#1e293b"
text = "#f1f5f9"
text_muted = "#94a3b8"    # Counts, hints, link previews
accent = "#a855f7"        # Active filter, badges, buttons
border = "#334155"
"##
}

/// Generate CSS custom properties from the color scheme.
pub fn generate_color_css(colors: &ColorScheme) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-surface: {surface};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-accent: {accent};
    --color-border: {border};
}}"#,
        background = colors.background,
        surface = colors.surface,
        text = colors.text,
        text_muted = colors.text_muted,
        accent = colors.accent,
        border = colors.border,
    )
}
