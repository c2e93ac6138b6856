//! src/view/components/confirm_overlay.rs
//! ============================================================================
//! # Open-link confirmation overlay
//!
//! Centered modal shown before a result link is handed to the system
//! handler, when `ui.confirm_open` is enabled. Enter or `y` proceeds,
//! Esc or `n` dismisses.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::{model::search_state::PendingOpen, view::theme};

pub struct ConfirmOverlay;

impl ConfirmOverlay {
    pub fn render(f: &mut Frame<'_>, pending: &PendingOpen, area: Rect) {
        let popup = centered(area, 64, 7);
        f.render_widget(Clear, popup);

        let title_line = if pending.title.is_empty() {
            Line::from(Span::styled(
                "Open this result?",
                Style::default()
                    .fg(theme::FOREGROUND)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                pending.title.clone(),
                Style::default()
                    .fg(theme::FOREGROUND)
                    .add_modifier(Modifier::BOLD),
            ))
        };

        let lines = vec![
            title_line,
            Line::from(Span::styled(
                pending.link.clone(),
                Style::default().fg(theme::CYAN),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[Enter] Open    [Esc] Cancel",
                Style::default().fg(theme::COMMENT),
            )),
        ];

        let dialog = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Open link? ")
                    .title_alignment(Alignment::Center)
                    .border_style(theme::overlay_border_style())
                    .style(Style::default().bg(theme::BACKGROUND)),
            );

        f.render_widget(dialog, popup);
    }
}

/// Fixed-size rect centered in `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
