//! src/view/ui.rs
//! ============================================================================
//! # Top-level renderer
//!
//! Lays the screen out as search bar / results panel / status line and
//! draws the confirmation overlay on top when an activation is pending.
//! The results panel is drawn only while it has something to show; its
//! recorded hit-test geometry is dropped whenever it is hidden.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{
    config::Config,
    model::search_state::SearchState,
    view::components::{
        confirm_overlay::ConfirmOverlay, results_panel::ResultsPanel, search_bar::SearchBar,
        status_bar::StatusBar,
    },
};

pub struct UIRenderer {
    results_panel: ResultsPanel,
    status_bar: StatusBar,
}

impl Default for UIRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UIRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            results_panel: ResultsPanel::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn render(&mut self, f: &mut Frame<'_>, state: &mut SearchState, config: &Config) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // input
                Constraint::Min(0),    // results
                Constraint::Length(1), // status
            ])
            .split(f.area());

        SearchBar::render(
            f,
            state,
            &config.ui,
            config.search.min_search_length,
            chunks[0],
            state.pending_open.is_none(),
        );

        if state.panel_visible {
            self.results_panel.render(f, state, &config.ui, chunks[1]);
        } else {
            state.layout = None;
        }

        self.status_bar.render(f, state, chunks[2]);

        if let Some(pending) = state.pending_open.clone() {
            ConfirmOverlay::render(f, &pending, f.area());
        }
    }
}
