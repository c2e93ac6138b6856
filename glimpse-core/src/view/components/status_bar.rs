//! src/view/components/status_bar.rs
//! ============================================================================
//! # Status bar
//!
//! One line at the bottom: in-flight spinner, transient notifications, or a
//! contextual key hint. Purely derived from `SearchState`; renders whatever
//! is most urgent.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Span,
    widgets::Paragraph,
};

use crate::{
    model::search_state::{NotificationLevel, SearchState},
    view::theme,
};

const FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const SPIN_MS: u64 = 80;

pub struct StatusBar {
    epoch: Instant,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, state: &SearchState, area: Rect) {
        let content = if state.searching {
            let idx = ((self.epoch.elapsed().as_millis() / u128::from(SPIN_MS))
                % FRAMES.len() as u128) as usize;
            Span::styled(
                format!("{} Searching \"{}\" …", FRAMES[idx], state.input),
                Style::default().fg(theme::CYAN),
            )
        } else if let Some(n) = state.current_notification() {
            let color = match n.level {
                NotificationLevel::Info => theme::CYAN,
                NotificationLevel::Success => theme::GREEN,
                NotificationLevel::Error => theme::RED,
            };
            Span::styled(n.message.to_string(), Style::default().fg(color))
        } else if state.panel_visible {
            Span::styled(
                format!(
                    "{} result(s) · ↑/↓ select · Enter open · Esc clear",
                    state.results.len()
                ),
                Style::default().fg(theme::COMMENT),
            )
        } else {
            Span::styled(
                "Type to search · Ctrl+C quit",
                Style::default().fg(theme::COMMENT),
            )
        };

        f.render_widget(Paragraph::new(content), area);
    }
}
