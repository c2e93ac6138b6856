//! src/view/components/search_bar.rs
//! ============================================================================
//! # Search input box
//!
//! One-line input with a border color that tracks the input state: idle,
//! below the minimum search length, or active. Shows the configured
//! placeholder while empty.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph},
};

use crate::{config::UiConfig, model::search_state::SearchState, view::theme};

pub struct SearchBar;

impl SearchBar {
    pub fn render(
        f: &mut Frame<'_>,
        state: &SearchState,
        ui: &UiConfig,
        min_search_length: usize,
        area: Rect,
        show_cursor: bool,
    ) {
        let (title, color) = match state.input.chars().count() {
            0 => (" Search ", theme::CYAN),
            n if n < min_search_length => (" Search (type more) ", theme::COMMENT),
            _ => (" Search ", theme::YELLOW),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(color));

        let content = if state.input.is_empty() {
            Span::styled(ui.placeholder_text.clone(), theme::placeholder_style())
        } else {
            Span::styled(
                state.input.to_string(),
                Style::default().fg(theme::FOREGROUND),
            )
        };

        f.render_widget(Paragraph::new(content).block(block), area);

        if show_cursor {
            let cursor_x = (area.x
                + 1
                + state.input.as_str()[..state.input_cursor].chars().count() as u16)
                .min(area.x + area.width.saturating_sub(2));
            f.set_cursor_position((cursor_x, area.y + 1));
        }
    }
}
