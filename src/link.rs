//! Overlay deep links.
//!
//! A deep link selects one asset for the overlay view. Broadcast software is
//! pointed at it as a browser source, so the format is a public contract:
//!
//! ```text
//! <base>#/overlay/<id>                                      catalog asset
//! <base>#/overlay/custom?src=<encoded-url>&type=<VIDEO|IMAGE> external source
//! ```
//!
//! Both the id and `src` are encoded exactly like JavaScript's
//! `encodeURIComponent`, and the query string is read back with
//! `URLSearchParams` rules (`+` is a space, first occurrence wins), so links
//! built here and links built in a browser are interchangeable.
//!
//! A link may carry both a path segment and a `src`. The segment is tried
//! against the catalog first; `src` only applies when nothing matches.

use crate::types::AssetType;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Route prefix inside the URL fragment.
pub const OVERLAY_ROUTE: &str = "/overlay/";

/// Path segment used for external-source links.
pub const EXTERNAL_SEGMENT: &str = "custom";

/// Characters `encodeURIComponent` leaves alone, removed from the escape set.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// What a deep link asks the overlay view to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRequest {
    /// A catalog asset by identifier.
    ById { id: String },
    /// An ad-hoc media URL, used unless `id` names a catalog asset.
    External {
        id: Option<String>,
        src: String,
        asset_type: AssetType,
    },
    /// Not an overlay link, or an overlay link with nothing to select.
    Invalid,
}

/// Drop any fragment already present on a page URL.
fn page_base(base: &str) -> &str {
    base.split_once('#').map(|(page, _)| page).unwrap_or(base)
}

/// Percent-encode a string the way `encodeURIComponent` does.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Deep link to a catalog asset.
pub fn encode_link(base: &str, id: &str) -> String {
    format!("{}#{OVERLAY_ROUTE}{}", page_base(base), encode_component(id))
}

/// Deep link to an external media URL.
pub fn encode_external_link(base: &str, src: &str, asset_type: AssetType) -> String {
    format!(
        "{}#{OVERLAY_ROUTE}{EXTERNAL_SEGMENT}?src={}&type={}",
        page_base(base),
        encode_component(src),
        asset_type
    )
}

/// Parse a deep link (a full URL, or just its `/overlay/...` route).
pub fn decode_link(url: &str) -> LinkRequest {
    let route = url.split_once('#').map(|(_, frag)| frag).unwrap_or(url);
    let Some(rest) = route.strip_prefix(OVERLAY_ROUTE) else {
        return LinkRequest::Invalid;
    };

    let (segment, query) = rest.split_once('?').unwrap_or((rest, ""));
    let id = (!segment.is_empty())
        .then(|| percent_decode_str(segment).decode_utf8_lossy().into_owned());

    if let Some(src) = query_param(query, "src").filter(|s| !s.is_empty()) {
        let asset_type = match query_param(query, "type").as_deref() {
            Some("IMAGE") => AssetType::Image,
            _ => AssetType::Video,
        };
        return LinkRequest::External { id, src, asset_type };
    }

    match id {
        Some(id) => LinkRequest::ById { id },
        None => LinkRequest::Invalid,
    }
}

/// First value for `key` in an `application/x-www-form-urlencoded` query.
fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(k, _)| form_decode(k) == key)
        .map(|(_, v)| form_decode(v))
}

fn form_decode(value: &str) -> String {
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
