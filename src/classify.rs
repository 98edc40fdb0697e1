//! Filename-driven classification.
//!
//! Creators file assets by naming them: `donation 1.webm` lands in
//! Donations, `camera v2.png` in Camera Frame. Classification never fails;
//! an unknown extension is an image and an unknown name is an intro scene,
//! so every file stays visible even when it is mis-filed.
//!
//! ## Keyword Priority
//!
//! Names routinely carry several keywords (`intro-donacion-final.mp4`), so
//! the rules are an ordered list and the first matching group wins:
//!
//! | # | Category       | Keywords                                                    |
//! |---|----------------|-------------------------------------------------------------|
//! | 1 | Stream Intro   | intro, inicio, comienzo                                     |
//! | 2 | Stream Ending  | fin, ending, cierre, off                                    |
//! | 3 | BRB            | brb, espera, vuelvo, pausa                                  |
//! | 4 | Camera Frame   | camara, cámara, cam, webcam, marco, frame                   |
//! | 5 | New Followers  | follow, seguidor                                            |
//! | 6 | Subscribers    | sub, suscri, prime                                          |
//! | 7 | Donations      | donacion, donación, donation, bit, dinero, tip, alerta, alert |

use crate::types::{AssetType, Category};

/// Ordered keyword rules. Reordering changes results for multi-keyword names.
const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (Category::SceneIntro, &["intro", "inicio", "comienzo"]),
    (Category::SceneEnding, &["fin", "ending", "cierre", "off"]),
    (Category::SceneBrb, &["brb", "espera", "vuelvo", "pausa"]),
    (
        Category::OverlayCam,
        &["camara", "cámara", "cam", "webcam", "marco", "frame"],
    ),
    (Category::AlertsFollower, &["follow", "seguidor"]),
    (Category::AlertsSub, &["sub", "suscri", "prime"]),
    (
        Category::AlertsDonation,
        &[
            "donacion", "donación", "donation", "bit", "dinero", "tip", "alerta", "alert",
        ],
    ),
];

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];

/// Lowercased text after the last `.`, or `None` when there is no dot.
fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Infer the sidebar category from keywords in the filename.
pub fn classify_category(filename: &str) -> Category {
    let lower = filename.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or_default()
}

/// Infer the media type from the file extension (case-insensitive).
pub fn classify_type(filename: &str) -> AssetType {
    match extension(filename).as_deref() {
        Some(ext) if VIDEO_EXTENSIONS.contains(&ext) => AssetType::Video,
        Some("gif") => AssetType::Gif,
        _ => AssetType::Image,
    }
}

/// MIME type for a media filename, used when previewing local files.
pub fn media_mime(filename: &str) -> &'static str {
    match extension(filename).as_deref() {
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("gif") => "image/gif",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
