//! Filename-derived names: display titles and asset identifiers.
//!
//! The filename is the only metadata an asset has, so both the title shown
//! on the dashboard and the identifier used in deep links come from it.
//!
//! ## Display Titles
//!
//! The final extension is dropped, dashes and underscores become spaces, and
//! each word is capitalized:
//! - `mi-video_intro.mp4` → "Mi Video Intro"
//! - `inicio 2.webm` → "Inicio 2"
//! - `cámara.v2.png` → "Cámara.v2"
//!
//! ## Identifiers
//!
//! Every `.` in the filename becomes `-`: `intro 2.mp4` → `intro 2-mp4`.
//! Two files can map to the same identifier (`a.b.mp4` and `a-b.mp4`); the
//! catalog builder disambiguates those.

/// Turn a media filename into a display title.
///
/// A name without any `.` has nothing left after the extension is removed
/// and yields an empty title.
pub fn format_title(filename: &str) -> String {
    let stem = filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or("");

    let mut title = String::with_capacity(stem.len());
    let mut word_start = true;
    for c in stem.chars() {
        let c = if c == '-' || c == '_' { ' ' } else { c };
        if c.is_whitespace() {
            word_start = true;
            title.push(c);
        } else if word_start {
            word_start = false;
            title.extend(c.to_uppercase());
        } else {
            title.push(c);
        }
    }
    title
}

/// Derive the deep-link identifier for a filename.
pub fn asset_id(filename: &str) -> String {
    filename.replace('.', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashes_and_underscores_become_spaces() {
        assert_eq!(format_title("mi-video_intro.mp4"), "Mi Video Intro");
    }

    #[test]
    fn numbers_and_spaces_preserved() {
        assert_eq!(format_title("inicio 2.webm"), "Inicio 2");
        assert_eq!(format_title("2-fast.mp4"), "2 Fast");
    }

    #[test]
    fn only_final_extension_stripped() {
        assert_eq!(format_title("cámara.v2.png"), "Cámara.v2");
    }

    #[test]
    fn accented_first_letter_capitalized() {
        assert_eq!(format_title("éxito_total.gif"), "Éxito Total");
    }

    #[test]
    fn inner_letters_untouched() {
        assert_eq!(format_title("OBS-BRB.png"), "OBS BRB");
        assert_eq!(format_title("mIxEd.png"), "MIxEd");
    }

    #[test]
    fn repeated_separators_keep_their_spaces() {
        assert_eq!(format_title("a--b.png"), "A  B");
    }

    #[test]
    fn degenerate_names() {
        assert_eq!(format_title(".mp4"), "");
        assert_eq!(format_title("noext"), "");
        assert_eq!(format_title(""), "");
    }

    #[test]
    fn id_replaces_every_dot() {
        assert_eq!(asset_id("intro 2.mp4"), "intro 2-mp4");
        assert_eq!(asset_id("a.b.c.png"), "a-b-c-png");
        assert_eq!(asset_id("plain"), "plain");
    }
}
