//! src/view/components/card.rs
//! ============================================================================
//! # Result card assembly
//!
//! Builds the display lines for one search result: a heading with kind icon,
//! title and kind label, a description line, and a meta line carrying the
//! link and thumbnail link. Empty title and kind are omitted entirely — no
//! empty heading fragments are ever emitted. Title and both links pass
//! through `escape_markup` before they land in card text.
//!
//! Assembly is pure so the card contract stays testable without a terminal.

use ratatui::text::{Line, Span};

use crate::{
    model::search_state::SearchResult,
    util::escape::escape_markup,
    view::{icons, theme},
};

/// Uniform rendered card height, in rows. Cards shorter than this (omitted
/// heading or description) are padded by the results panel so pointer
/// hit-testing stays a plain division.
pub const CARD_HEIGHT: u16 = 4;

/// Build the lines of one card, in display order. Lines for empty fields
/// are omitted, never emitted blank.
#[must_use]
pub fn build_card(result: &SearchResult) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(CARD_HEIGHT as usize);

    let title = escape_markup(result.title.trim());
    let kind = result.kind.trim();

    let mut heading: Vec<Span<'static>> = Vec::new();
    if !title.is_empty() {
        heading.push(Span::styled(
            format!("{} ", icons::for_kind(kind)),
            theme::card_kind_style(),
        ));
        heading.push(Span::styled(title, theme::card_title_style()));
    }
    if !kind.is_empty() {
        let label = if heading.is_empty() {
            format!("{} {kind}", icons::for_kind(kind))
        } else {
            format!("  {kind}")
        };
        heading.push(Span::styled(label, theme::card_kind_style()));
    }
    if !heading.is_empty() {
        lines.push(Line::from(heading));
    }

    let description = result.description.trim();
    if !description.is_empty() {
        lines.push(Line::from(Span::styled(
            description.to_string(),
            theme::card_description_style(),
        )));
    }

    let mut meta: Vec<Span<'static>> = vec![Span::styled(
        format!("→ {}", escape_markup(result.link.trim())),
        theme::card_meta_style(),
    )];
    let thumbnail = result.thumbnail.trim();
    if !thumbnail.is_empty() {
        meta.push(Span::styled(
            format!("  ▦ {}", escape_markup(thumbnail)),
            theme::card_meta_style(),
        ));
    }
    lines.push(Line::from(meta));

    lines
}
