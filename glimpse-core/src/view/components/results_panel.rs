//! src/view/components/results_panel.rs
//! ============================================================================
//! # Results panel
//!
//! Renders the current result set as a highlight-tracked card list, the
//! configured no-results message when a completed query matched nothing, or
//! a quiet searching note before the first response lands. The panel's
//! contents are replaced wholesale per render from `SearchState`; nothing
//! is diffed or merged.
//!
//! After drawing the list, the inner geometry (area, card height, scroll
//! offset) is written back to `SearchState` so pointer clicks can be mapped
//! to the card under the cell.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    config::UiConfig,
    model::search_state::{PanelLayout, SearchState},
    view::{
        components::card::{CARD_HEIGHT, build_card},
        theme,
    },
};

pub struct ResultsPanel {
    list_state: ListState,
}

impl Default for ResultsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsPanel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
        }
    }

    pub fn render(
        &mut self,
        f: &mut Frame<'_>,
        state: &mut SearchState,
        ui: &UiConfig,
        area: Rect,
    ) {
        if !state.results.is_empty() {
            self.draw_cards(f, state, area);
            return;
        }

        state.layout = None;

        if state.searching {
            Self::draw_message(f, "Searching…", area);
        } else {
            Self::draw_message(f, &ui.no_results_text, area);
        }
    }

    fn draw_cards(&mut self, f: &mut Frame<'_>, state: &mut SearchState, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} result(s) ", state.results.len()))
            .border_style(theme::overlay_border_style());
        let inner = block.inner(area);

        let items: Vec<ListItem<'_>> = state
            .results
            .iter()
            .map(|result| {
                let mut lines = build_card(result);
                // Uniform card height keeps click hit-testing a division.
                while lines.len() < CARD_HEIGHT as usize {
                    lines.push(Line::default());
                }
                ListItem::new(Text::from(lines))
            })
            .collect();

        self.list_state.select(state.active);

        f.render_stateful_widget(
            List::new(items)
                .block(block)
                .highlight_symbol("▶ ")
                .highlight_style(theme::active_card_style()),
            area,
            &mut self.list_state,
        );

        state.layout = Some(PanelLayout {
            area: inner,
            card_height: CARD_HEIGHT,
            offset: self.list_state.offset(),
        });
    }

    fn draw_message(f: &mut Frame<'_>, message: &str, area: Rect) {
        let w = Paragraph::new(message.to_string())
            .style(theme::placeholder_style())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::overlay_border_style()),
            );
        f.render_widget(w, area);
    }
}
