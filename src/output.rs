//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every asset is shown
//! by its positional index and title, with its source file and overlay link
//! as indented context lines. The output reads as an inventory of what the
//! dashboard will show while still letting users trace each card back to a
//! file.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Stream Intro (2 animations)
//!     001 Inicio 1
//!         Source: inicio 1.mp4
//!         Link: #/overlay/inicio%201-mp4
//!     002 Inicio 2
//!         Source: inicio 2.mp4
//!         Link: #/overlay/inicio%202-mp4
//!
//! Notes
//!     notes.md
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Generate
//!
//! ```text
//! Dashboard → index.html
//! Categories
//!     Donations → category/donations.html
//! Overlays
//!     001 Inicio 1 → overlay/inicio 1-mp4.html
//!     External Preview → overlay/custom.html
//!
//! Generated 8 dashboard pages, 3 overlay pages, 2 media files
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions do no I/O,
//! except that the scan summary checks whether `config.toml` exists.

use crate::config::CONFIG_FILENAME;
use crate::generate::GeneratedSite;
use crate::link::encode_link;
use crate::resolve::{EXTERNAL_PREVIEW_TITLE, ResolveError};
use crate::scan::{Manifest, NOTES_FILENAME};
use crate::session::MediaLoadError;
use crate::types::{AnimationAsset, Category, CategoryFilter};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Format a category header with its asset count.
///
/// ```text
/// Stream Intro (2 animations)
/// ```
fn group_header(category: Category, count: usize) -> String {
    format!("{} ({})", category.label(), plural(count, "animation"))
}

/// Format an asset line: titled assets show their title, untitled ones the id.
///
/// ```text
/// 001 Inicio 1          // titled
/// 001 (brb)             // dotless filename, empty title
/// ```
fn asset_line(index: usize, asset: &AnimationAsset) -> String {
    if asset.title.is_empty() {
        format!("{} ({})", format_index(index), asset.id)
    } else {
        format!("{} {}", format_index(index), asset.title)
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

// ============================================================================
// Scan output
// ============================================================================

/// Format scan output: assets grouped by category in sidebar order.
///
/// Each asset shows its source file and overlay link as context lines.
/// Categories with no assets are skipped.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let base = &manifest.config.base_url;

    if manifest.assets.is_empty() {
        lines.push("No animations found".to_string());
    }

    for category in Category::ALL {
        let filter = CategoryFilter::Only(category);
        let group: Vec<&AnimationAsset> =
            manifest.assets.iter().filter(|a| filter.matches(a)).collect();
        if group.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(group_header(category, group.len()));
        for (i, asset) in group.iter().enumerate() {
            lines.push(format!("{}{}", indent(1), asset_line(i + 1, asset)));
            if let Some(file) = manifest.files.get(&asset.id) {
                lines.push(format!("{}Source: {}", indent(2), file));
            }
            lines.push(format!("{}Link: {}", indent(2), encode_link(base, &asset.id)));
        }
    }

    if let Some(notes) = &manifest.notes {
        lines.push(String::new());
        lines.push("Notes".to_string());
        lines.push(format!("{}{}", indent(1), NOTES_FILENAME));
        if let Some(first) = notes.lines().next() {
            lines.push(format!("{}{}", indent(1), truncate(first.trim(), 60)));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join(CONFIG_FILENAME).exists() {
        lines.push(format!("{}{}", indent(1), CONFIG_FILENAME));
    } else {
        lines.push(format!("{}(defaults)", indent(1)));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format generate output: every written page, keyed by what it shows.
pub fn format_generate_output(manifest: &Manifest, site: &GeneratedSite) -> Vec<String> {
    let mut lines = Vec::new();

    let mut dashboards = site.dashboards.iter();
    if let Some(index) = dashboards.next() {
        lines.push(format!("Dashboard → {}", index));
    }
    lines.push("Categories".to_string());
    for (category, path) in Category::ALL.iter().zip(dashboards) {
        lines.push(format!("{}{} → {}", indent(1), category.label(), path));
    }

    lines.push("Overlays".to_string());
    for (i, asset) in manifest.assets.iter().enumerate() {
        if let Some(path) = site.overlays.get(i) {
            lines.push(format!("{}{} → {}", indent(1), asset_line(i + 1, asset), path));
        }
    }
    if let Some(custom) = site.overlays.get(manifest.assets.len()) {
        lines.push(format!("{}{} → {}", indent(1), EXTERNAL_PREVIEW_TITLE, custom));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}",
        plural(site.dashboards.len(), "dashboard page"),
        plural(site.overlays.len(), "overlay page"),
        plural(site.media_copied, "media file"),
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(manifest: &Manifest, site: &GeneratedSite) {
    for line in format_generate_output(manifest, site) {
        println!("{}", line);
    }
}

// ============================================================================
// Session views: list, check
// ============================================================================

/// Format the assets a dashboard filter shows, as the session currently sees them.
///
/// ```text
/// Overview: 2 animations detected
/// 001 Inicio 1 [Stream Intro, VIDEO]
///     Link: #/overlay/inicio%201-mp4
/// ```
pub fn format_list_output(
    assets: &[&AnimationAsset],
    filter: CategoryFilter,
    base: &str,
) -> Vec<String> {
    let mut lines = vec![format!(
        "{}: {} detected",
        filter.label(),
        plural(assets.len(), "animation")
    )];
    if assets.is_empty() {
        lines.push(format!("{}Empty folder", indent(1)));
        return lines;
    }
    for (i, asset) in assets.iter().enumerate() {
        let category = asset.category.map(|c| c.label()).unwrap_or("Uncategorized");
        lines.push(format!(
            "{} [{}, {}]",
            asset_line(i + 1, asset),
            category,
            asset.asset_type
        ));
        lines.push(format!("{}Link: {}", indent(1), encode_link(base, &asset.id)));
    }
    lines
}

/// Print list output to stdout.
pub fn print_list_output(assets: &[&AnimationAsset], filter: CategoryFilter, base: &str) {
    for line in format_list_output(assets, filter, base) {
        println!("{}", line);
    }
}

/// Format a media check: one line per failure, then a verdict.
pub fn format_check_output<'a>(
    checked: usize,
    failures: impl IntoIterator<Item = &'a MediaLoadError>,
) -> Vec<String> {
    let failed: Vec<String> = failures
        .into_iter()
        .map(|f| format!("{}✗ {}", indent(1), f))
        .collect();
    let mut lines = vec![format!("Checked {}", plural(checked, "animation"))];
    if failed.is_empty() {
        lines.push("All media loads".to_string());
    } else {
        lines.push(format!("{} failed to load", plural(failed.len(), "file")));
        lines.extend(failed);
    }
    lines
}

/// Print check output to stdout.
pub fn print_check_output<'a>(
    checked: usize,
    failures: impl IntoIterator<Item = &'a MediaLoadError>,
) {
    for line in format_check_output(checked, failures) {
        println!("{}", line);
    }
}

// ============================================================================
// Resolve output
// ============================================================================

/// Format what a deep link resolves to, or the message the overlay would show.
pub fn format_resolve_output(result: &Result<AnimationAsset, ResolveError>) -> Vec<String> {
    match result {
        Ok(asset) => {
            let category = asset.category.map(|c| c.label()).unwrap_or("none");
            vec![
                if asset.title.is_empty() {
                    format!("({})", asset.id)
                } else {
                    asset.title.clone()
                },
                format!("{}Id: {}", indent(1), asset.id),
                format!("{}Type: {}", indent(1), asset.asset_type),
                format!("{}Category: {}", indent(1), category),
                format!("{}Source: {}", indent(1), asset.src),
                format!(
                    "{}Loop: {}",
                    indent(1),
                    if asset.loop_playback { "yes" } else { "no" }
                ),
            ]
        }
        Err(err) => vec![
            err.user_message().to_string(),
            format!("{}({})", indent(1), err),
        ],
    }
}

/// Print resolve output to stdout.
pub fn print_resolve_output(result: &Result<AnimationAsset, ResolveError>) {
    for line in format_resolve_output(result) {
        println!("{}", line);
    }
}
