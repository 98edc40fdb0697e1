//! # Overlay Gal
//!
//! A gallery and overlay generator for stream-production media. Your media
//! folder is the data source: every video or image becomes a dashboard card,
//! filed by keywords in its filename, and gets a transparent overlay page
//! that broadcast software can use as a browser source.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      animations/  →  manifest.json    (filesystem → catalog)
//! 2. Generate  manifest     →  dist/            (dashboard + overlay pages)
//! ```
//!
//! The manifest is human-readable JSON, so the catalog a build is based on
//! can be inspected before any HTML is written. Everything between discovery
//! and rendering is a pure function over strings, which is where most of
//! the tests live.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the source directory and produces the manifest |
//! | [`generate`] | Stage 2: renders the dashboard and overlay pages with Maud |
//! | [`catalog`] | Discovery mapping → ordered assets, with natural title sort |
//! | [`classify`] | Category and media type from a filename |
//! | [`naming`] | Display titles and identifiers derived from filenames |
//! | [`link`] | Encoding and decoding of `#/overlay/...` deep links |
//! | [`resolve`] | Deep link → asset, or a not-found error |
//! | [`session`] | Admin gate, hidden assets, and temporary local assets |
//! | [`config`] | `config.toml` loading, validation, and CSS generation |
//! | [`types`] | Shared types serialized in the manifest (`AnimationAsset`, `Category`) |
//! | [`output`] | CLI output formatting for every command |
//!
//! # Design Decisions
//!
//! ## Identity Comes From the Filename
//!
//! There is no metadata store. An asset's id, title, category, and media
//! type are all derived from its filename, so renaming a file is how it gets
//! re-filed. Ids are the filename with dots replaced by dashes, which keeps
//! deep links stable for as long as the file keeps its name.
//!
//! ## Deep Links Are a Public Contract
//!
//! Overlay URLs get pasted into broadcast scenes and left there. The
//! `#/overlay/<id>` and `#/overlay/custom?src=...` formats are fixed, and
//! the [`link`] codec encodes exactly like a browser's `encodeURIComponent`
//! so links built by the CLI and links built on the dashboard agree.
//!
//! ## Session Edits Never Touch Disk
//!
//! Hiding an asset or previewing a local file only reshapes the current
//! [`session::Session`]. The source directory is the single source of truth.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod generate;
pub mod link;
pub mod naming;
pub mod output;
pub mod resolve;
pub mod scan;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
