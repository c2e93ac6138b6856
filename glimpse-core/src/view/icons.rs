//! src/view/icons.rs
//! ============================================================================
//! # Result-kind Icons (Nerd Fonts)
//!
//! Glyphs for the content kinds the search endpoint reports, to add visual
//! flair to result cards.

pub const ACCOUNT_ICON: &str = "";
pub const COMMUNITY_ICON: &str = "";
pub const CONTENT_ICON: &str = "";
pub const DEFAULT_ICON: &str = "";

/// Icon for a backend-reported result kind. Unknown kinds get the default
/// glyph rather than nothing.
#[must_use]
pub fn for_kind(kind: &str) -> &'static str {
    match kind.to_ascii_lowercase().as_str() {
        "account" | "profile" | "person" => ACCOUNT_ICON,
        "community" | "group" => COMMUNITY_ICON,
        "content" | "document" | "file" => CONTENT_ICON,
        _ => DEFAULT_ICON,
    }
}
