//! HTML site generation.
//!
//! Stage 2 of the overlay-gal build pipeline. Takes the scanned manifest and
//! writes a static site that needs no server-side logic.
//!
//! ## Generated Pages
//!
//! - **Dashboard** (`/index.html`): every asset, sidebar with per-category counts
//! - **Category pages** (`/category/{slug}.html`): the dashboard filtered to one category
//! - **Overlay pages** (`/overlay/{id}.html`): a single asset on a transparent page
//! - **External preview** (`/overlay/custom.html`): plays the `src` from its query string
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Dashboard, also routes #/overlay/... deep links
//! ├── category/
//! │   ├── donations.html
//! │   └── ...
//! ├── overlay/
//! │   ├── inicio 1-mp4.html
//! │   ├── custom.html
//! │   └── ...
//! └── media/
//!     └── inicio 1.mp4           # Source files (copied)
//! ```
//!
//! Deep links keep the `#/overlay/<id>` form. The dashboard ships a small
//! router script that forwards them to the matching overlay page, so a link
//! copied from any card works as a browser source.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/router.js`: Deep-link forwarding on the dashboard
//! - `static/custom.js`: Media element for the external preview

use crate::config;
use crate::link::{LinkRequest, encode_link};
use crate::resolve::{EXTERNAL_PREVIEW_TITLE, ResolveError, resolve};
use crate::scan::{MEDIA_DIR, Manifest};
use crate::types::{AnimationAsset, AssetType, Category, CategoryFilter};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),
    #[error("Manifest lists asset {0} without a source file")]
    MissingFile(String),
}

/// What a generate run wrote, for reporting.
#[derive(Debug, Default)]
pub struct GeneratedSite {
    /// Dashboard pages, index first, relative to the output directory.
    pub dashboards: Vec<String>,
    /// Overlay pages, one per asset plus the external preview.
    pub overlays: Vec<String>,
    /// Number of media files copied.
    pub media_copied: usize,
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const ROUTER_JS: &str = include_str!("../static/router.js");
const CUSTOM_JS: &str = include_str!("../static/custom.js");

const CATEGORY_DIR: &str = "category";
const OVERLAY_DIR: &str = "overlay";

/// Relative path of the page a category filter renders to.
pub fn dashboard_page_path(filter: CategoryFilter) -> String {
    match filter {
        CategoryFilter::All => "index.html".to_string(),
        CategoryFilter::Only(cat) => format!("{CATEGORY_DIR}/{}.html", cat.slug()),
    }
}

/// Relative path of an asset's overlay page.
pub fn overlay_page_path(id: &str) -> String {
    format!("{OVERLAY_DIR}/{id}.html")
}

pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GeneratedSite, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;

    // Generate CSS with colors from config
    let color_css = config::generate_color_css(&manifest.config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);

    let mut site = GeneratedSite::default();
    fs::create_dir_all(output_dir.join(CATEGORY_DIR))?;
    fs::create_dir_all(output_dir.join(OVERLAY_DIR))?;

    site.media_copied = copy_media(&manifest, source_root, output_dir)?;
    log::info!("copied {} media files", site.media_copied);

    let filters = std::iter::once(CategoryFilter::All)
        .chain(Category::ALL.into_iter().map(CategoryFilter::Only));
    for filter in filters {
        let page = render_dashboard(&manifest, filter, &css)?;
        let path = dashboard_page_path(filter);
        fs::write(output_dir.join(&path), page.into_string())?;
        log::debug!("generated {path}");
        site.dashboards.push(path);
    }

    for asset in &manifest.assets {
        let request = LinkRequest::ById {
            id: asset.id.clone(),
        };
        let resolved = resolve(&request, &manifest.assets)?;
        let page = render_overlay_page(&resolved, &css);
        let path = overlay_page_path(&resolved.id);
        fs::write(output_dir.join(&path), page.into_string())?;
        site.overlays.push(path);
    }
    log::debug!("generated {} overlay pages", manifest.assets.len());

    let custom = render_external_page(&css);
    let custom_path = format!("{OVERLAY_DIR}/custom.html");
    fs::write(output_dir.join(&custom_path), custom.into_string())?;
    site.overlays.push(custom_path);

    log::info!("site generated at {}", output_dir.display());
    Ok(site)
}

/// Copy each catalog asset's source file under `media/`, keeping its relative path.
fn copy_media(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
) -> Result<usize, GenerateError> {
    let media_dir = output_dir.join(MEDIA_DIR);
    let mut copied = 0;
    for asset in &manifest.assets {
        let rel = manifest
            .files
            .get(&asset.id)
            .ok_or_else(|| GenerateError::MissingFile(asset.id.clone()))?;
        let dst = media_dir.join(rel);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source_root.join(rel), &dst)?;
        copied += 1;
    }
    Ok(copied)
}

/// Prefix a site-relative URL so it resolves from a page `root` levels down.
///
/// Absolute and scheme URLs pass through.
fn site_url(root: &str, src: &str) -> String {
    if src.contains(':') || src.starts_with('/') {
        src.to_string()
    } else {
        format!("{root}{src}")
    }
}

fn count_label(n: usize) -> String {
    if n == 1 {
        "1 animation detected".to_string()
    } else {
        format!("{n} animations detected")
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (css) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Renders the sidebar: brand, category filters with counts, optional notes
fn render_sidebar(manifest: &Manifest, current: CategoryFilter, root: &str) -> Markup {
    let count = |filter: CategoryFilter| manifest.assets.iter().filter(|a| filter.matches(a)).count();

    let notes_html = manifest.notes.as_deref().map(|notes| {
        let mut body = String::new();
        md_html::push_html(&mut body, Parser::new(notes));
        body
    });

    html! {
        aside.sidebar {
            div.brand {
                h1 { (manifest.config.title) }
                p.subtitle { (manifest.config.subtitle) }
            }
            nav.filters {
                a.filter.current[current == CategoryFilter::All]
                    href={ (root) (dashboard_page_path(CategoryFilter::All)) } {
                    span { "All animations" }
                    span.count { (count(CategoryFilter::All)) }
                }
                p.filters-heading { "Categories" }
                @for cat in Category::ALL {
                    @let filter = CategoryFilter::Only(cat);
                    a.filter.current[current == filter]
                        href={ (root) (dashboard_page_path(filter)) } {
                        span { (cat.label()) }
                        span.count { (count(filter)) }
                    }
                }
            }
            @if let Some(body) = notes_html {
                section.notes {
                    (PreEscaped(body))
                }
            }
        }
    }
}

/// Renders the preview element used inside a dashboard card
fn render_preview(asset: &AnimationAsset, root: &str) -> Markup {
    let src = site_url(root, &asset.src);
    html! {
        @match asset.asset_type {
            AssetType::Video => {
                video src=(src) muted loop playsinline preload="metadata" {}
            }
            AssetType::Image | AssetType::Gif => {
                img src=(src) alt=(asset.title) loading="lazy";
            }
        }
    }
}

/// Renders one gallery card with its overlay link
fn render_card(asset: &AnimationAsset, root: &str, link_base: &str) -> Markup {
    let link = encode_link(link_base, &asset.id);
    html! {
        article.asset-card data-id=(asset.id) {
            a.preview href=(link) target="_blank" rel="noopener" {
                (render_preview(asset, root))
            }
            div.card-body {
                @if let Some(cat) = asset.category {
                    span.badge { (cat.label()) }
                }
                h3.card-title title=(asset.title) { (asset.title) }
                div.link-box {
                    code { (link) }
                    a.open href=(link) target="_blank" rel="noopener" { "Open" }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the dashboard for one category filter.
///
/// The unfiltered dashboard sits at the site root and carries the deep-link
/// router; category pages sit one directory down.
fn render_dashboard(
    manifest: &Manifest,
    filter: CategoryFilter,
    css: &str,
) -> Result<Markup, GenerateError> {
    let root = match filter {
        CategoryFilter::All => "",
        CategoryFilter::Only(_) => "../",
    };
    let link_base = if !manifest.config.base_url.is_empty() {
        manifest.config.base_url.clone()
    } else if root.is_empty() {
        String::new()
    } else {
        format!("{root}{}", dashboard_page_path(CategoryFilter::All))
    };

    let visible: Vec<&AnimationAsset> =
        manifest.assets.iter().filter(|a| filter.matches(a)).collect();
    let ids: Vec<&str> = manifest.assets.iter().map(|a| a.id.as_str()).collect();
    let ids_json = serde_json::to_string(&ids)?;

    let content = html! {
        (render_sidebar(manifest, filter, root))
        main.gallery {
            header.gallery-header {
                span.eyebrow { "Active gallery" }
                h2 { (filter.label()) }
                p.asset-count { (count_label(visible.len())) }
            }
            @if visible.is_empty() {
                div.empty-state {
                    p.empty-title { "Empty folder" }
                    p { "No media files match this category." }
                }
            } @else {
                div.asset-grid {
                    @for asset in &visible {
                        (render_card(asset, root, &link_base))
                    }
                }
            }
        }
        @if filter == CategoryFilter::All {
            div id="overlay-router" hidden data-ids=(ids_json)
                data-missing=(ResolveError::MissingIdentifier.user_message()) {}
            script { (PreEscaped(ROUTER_JS)) }
        }
    };

    let title = match filter {
        CategoryFilter::All => manifest.config.title.clone(),
        CategoryFilter::Only(_) => format!("{} · {}", filter.label(), manifest.config.title),
    };
    Ok(base_document(&title, css, Some("dashboard"), content))
}

/// Renders a single asset on a transparent, chrome-free page
fn render_overlay_page(asset: &AnimationAsset, css: &str) -> Markup {
    let src = site_url("../", &asset.src);
    let content = html! {
        main.overlay-stage {
            @match asset.asset_type {
                AssetType::Video => {
                    video src=(src) autoplay playsinline loop[asset.loop_playback] {}
                }
                AssetType::Image | AssetType::Gif => {
                    img src=(src) alt="Overlay";
                }
            }
        }
    };
    base_document(&asset.title, css, Some("overlay-view"), content)
}

/// Renders the external preview page; the media element is built client-side
fn render_external_page(css: &str) -> Markup {
    let content = html! {
        main.overlay-stage id="stage"
            data-missing=(ResolveError::MissingIdentifier.user_message()) {}
        script { (PreEscaped(CUSTOM_JS)) }
    };
    base_document(EXTERNAL_PREVIEW_TITLE, css, Some("overlay-view"), content)
}

// ============================================================================
// Tests
// ============================================================================
