//! src/model/search_state.rs
//! ============================================================================
//! # Search state: result set, input buffer and active-selection tracking
//!
//! One explicit state object owns everything the live-search widget shows:
//! the input text, the current result set, the active (highlighted) index
//! and the panel geometry of the last render. The main loop is the only
//! writer; background tasks report through the action channel and never
//! touch this struct directly.
//!
//! Selection invariant: `active` is `Some(i)` with `i < results.len()`
//! exactly when `results` is non-empty, `None` otherwise. All transitions
//! below preserve it.

use std::time::Instant;

use compact_str::CompactString;
use ratatui::layout::Rect;
use serde::Deserialize;

/// One ranked record from the search endpoint. Wire field names follow the
/// endpoint contract (`thumb`, `type`); absent fields decode as empty.
/// Immutable once received; wire order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub link: String,

    #[serde(default, rename = "thumb")]
    pub thumbnail: String,

    #[serde(default, rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,
}

/// Notification levels for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info = 0,
    Success = 1,
    Error = 3,
}

/// Transient status-line message with timestamp.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: CompactString,
    pub level: NotificationLevel,
    pub timestamp: Instant,
}

/// Seconds a notification stays on the status line.
const NOTIFICATION_TTL_SECS: u64 = 5;

/// Geometry of the last rendered results panel, recorded by the renderer
/// so pointer clicks can be mapped back to a card index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    /// Inner area the cards were drawn into (borders excluded).
    pub area: Rect,

    /// Rows per card, uniform across the list.
    pub card_height: u16,

    /// Index of the first visible card (list scroll offset).
    pub offset: usize,
}

/// A link activation awaiting user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOpen {
    pub link: String,
    pub title: String,
}

/// Complete live-search widget state.
#[derive(Debug)]
pub struct SearchState {
    /// Current search box text.
    pub input: CompactString,

    /// Byte offset of the cursor within `input`.
    pub input_cursor: usize,

    /// Result set for the latest applied response. Replaced wholesale,
    /// never merged.
    pub results: Vec<SearchResult>,

    /// Active (highlighted) card index. See the module invariant.
    pub active: Option<usize>,

    /// Results panel visibility. Hidden and empty whenever the input is
    /// cleared; visible after any applied response, including an empty one
    /// (which shows the no-results placeholder).
    pub panel_visible: bool,

    /// A request is in flight for the latest issued sequence.
    pub searching: bool,

    /// Link activation awaiting confirmation (when `ui.confirm_open` is set).
    pub pending_open: Option<PendingOpen>,

    /// Transient status-line message.
    pub notification: Option<Notification>,

    /// Geometry of the last render, for pointer hit-testing.
    pub layout: Option<PanelLayout>,

    redraw: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: CompactString::default(),
            input_cursor: 0,
            results: Vec::new(),
            active: None,
            panel_visible: false,
            searching: false,
            pending_open: None,
            notification: None,
            layout: None,
            redraw: true,
        }
    }

    // ------------------------------------------------------------------
    // Input editing
    // ------------------------------------------------------------------

    pub fn insert_char(&mut self, ch: char) {
        let mut input_str = self.input.to_string();
        input_str.insert(self.input_cursor, ch);
        self.input = input_str.into();
        self.input_cursor += ch.len_utf8();
        self.request_redraw();
    }

    pub fn delete_char_before(&mut self) -> bool {
        if self.input_cursor > 0 {
            let mut input_str = self.input.to_string();
            if let Some((char_pos, _)) = input_str
                .char_indices()
                .rev()
                .find(|(pos, _)| *pos < self.input_cursor)
            {
                input_str.remove(char_pos);
                self.input = input_str.into();
                self.input_cursor = char_pos;
                self.request_redraw();
                return true;
            }
        }
        false
    }

    // ------------------------------------------------------------------
    // Result set transitions
    // ------------------------------------------------------------------

    /// Install a freshly received result set, discarding the previous one.
    /// The first card becomes active; an empty set clears the selection and
    /// leaves the panel visible for the no-results placeholder.
    pub fn install_results(&mut self, results: Vec<SearchResult>) {
        self.active = if results.is_empty() { None } else { Some(0) };
        self.results = results;
        self.panel_visible = true;
        self.searching = false;
        self.layout = None;
        self.request_redraw();
    }

    /// Drop the result set and hide the panel. Used when the input is
    /// cleared or the widget is dismissed.
    pub fn clear_results(&mut self) {
        self.results.clear();
        self.active = None;
        self.panel_visible = false;
        self.searching = false;
        self.layout = None;
        self.request_redraw();
    }

    // ------------------------------------------------------------------
    // Active-selection transitions
    // ------------------------------------------------------------------

    /// Move the highlight one card up. No-op at the first card.
    pub fn move_selection_up(&mut self) {
        if let Some(i) = self.active
            && i > 0
        {
            self.active = Some(i - 1);
            self.request_redraw();
        }
    }

    /// Move the highlight one card down. No-op at the last card.
    pub fn move_selection_down(&mut self) {
        if let Some(i) = self.active
            && i + 1 < self.results.len()
        {
            self.active = Some(i + 1);
            self.request_redraw();
        }
    }

    /// Link of the active card, if any.
    #[must_use]
    pub fn active_result(&self) -> Option<&SearchResult> {
        self.active.and_then(|i| self.results.get(i))
    }

    /// Result at an explicit card index, independent of the highlight.
    #[must_use]
    pub fn result_at(&self, index: usize) -> Option<&SearchResult> {
        self.results.get(index)
    }

    /// Map a terminal cell to the card rendered there, using the recorded
    /// panel geometry. Pointer activation ignores the active index.
    #[must_use]
    pub fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        let layout = self.layout?;
        if !self.panel_visible || !layout.area.contains((column, row).into()) {
            return None;
        }
        let card = usize::from((row - layout.area.y) / layout.card_height.max(1));
        let index = layout.offset + card;
        (index < self.results.len()).then_some(index)
    }

    // ------------------------------------------------------------------
    // Status line
    // ------------------------------------------------------------------

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<CompactString>) {
        self.notification = Some(Notification {
            message: message.into(),
            level,
            timestamp: Instant::now(),
        });
        self.request_redraw();
    }

    /// Current notification, if it has not aged out yet.
    #[must_use]
    pub fn current_notification(&self) -> Option<&Notification> {
        self.notification
            .as_ref()
            .filter(|n| n.timestamp.elapsed().as_secs() < NOTIFICATION_TTL_SECS)
    }

    // ------------------------------------------------------------------
    // Redraw bookkeeping
    // ------------------------------------------------------------------

    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Consume the redraw flag; the caller draws when this returns true.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(link: &str) -> SearchResult {
        SearchResult {
            link: link.to_string(),
            title: format!("title {link}"),
            ..SearchResult::default()
        }
    }

    fn three_results() -> Vec<SearchResult> {
        vec![result("/a"), result("/b"), result("/c")]
    }

    #[test]
    fn test_first_card_active_after_install() {
        let mut state = SearchState::new();
        state.install_results(three_results());

        assert_eq!(state.active, Some(0));
        assert!(state.panel_visible);
    }

    #[test]
    fn test_empty_install_has_no_selection() {
        let mut state = SearchState::new();
        state.install_results(Vec::new());

        assert_eq!(state.active, None);
        assert!(state.panel_visible, "placeholder still needs the panel");
    }

    #[test]
    fn test_selection_down_stops_at_last_card() {
        let mut state = SearchState::new();
        state.install_results(three_results());

        state.move_selection_down();
        state.move_selection_down();
        assert_eq!(state.active, Some(2));

        // Boundary: one more down is a no-op.
        state.move_selection_down();
        assert_eq!(state.active, Some(2));
    }

    #[test]
    fn test_selection_up_stops_at_first_card() {
        let mut state = SearchState::new();
        state.install_results(three_results());

        state.move_selection_up();
        assert_eq!(state.active, Some(0));
    }

    #[test]
    fn test_activation_follows_the_highlight() {
        let mut state = SearchState::new();
        state.install_results(three_results());
        state.move_selection_down();

        let active = state.active_result().expect("selection exists");
        assert_eq!(active.link, "/b");
    }

    #[test]
    fn test_result_at_ignores_the_highlight() {
        let mut state = SearchState::new();
        state.install_results(three_results());
        state.move_selection_down();

        assert_eq!(state.result_at(2).map(|r| r.link.as_str()), Some("/c"));
    }

    #[test]
    fn test_clear_results_resets_selection_and_hides_panel() {
        let mut state = SearchState::new();
        state.install_results(three_results());
        state.clear_results();

        assert_eq!(state.active, None);
        assert!(state.results.is_empty());
        assert!(!state.panel_visible);
    }

    #[test]
    fn test_new_result_set_replaces_old_wholesale() {
        let mut state = SearchState::new();
        state.install_results(three_results());
        state.move_selection_down();

        state.install_results(vec![result("/z")]);
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.active, Some(0));
    }

    #[test]
    fn test_card_at_maps_rows_to_indices() {
        let mut state = SearchState::new();
        state.install_results(three_results());
        state.layout = Some(PanelLayout {
            area: Rect::new(0, 5, 40, 9),
            card_height: 3,
            offset: 0,
        });

        assert_eq!(state.card_at(10, 5), Some(0));
        assert_eq!(state.card_at(10, 8), Some(1));
        assert_eq!(state.card_at(10, 13), Some(2));
        // Outside the panel.
        assert_eq!(state.card_at(10, 2), None);
    }

    #[test]
    fn test_card_at_respects_scroll_offset() {
        let mut state = SearchState::new();
        state.install_results(three_results());
        state.layout = Some(PanelLayout {
            area: Rect::new(0, 5, 40, 6),
            card_height: 3,
            offset: 1,
        });

        assert_eq!(state.card_at(0, 5), Some(1));
        assert_eq!(state.card_at(0, 8), Some(2));
    }

    #[test]
    fn test_input_editing_tracks_cursor() {
        let mut state = SearchState::new();
        state.insert_char('a');
        state.insert_char('b');
        assert_eq!(state.input.as_str(), "ab");
        assert_eq!(state.input_cursor, 2);

        assert!(state.delete_char_before());
        assert_eq!(state.input.as_str(), "a");
        assert_eq!(state.input_cursor, 1);

        assert!(state.delete_char_before());
        assert!(!state.delete_char_before());
        assert!(state.input.is_empty());
    }

    #[test]
    fn test_wire_format_decodes_with_absent_fields() {
        let json = r#"[{"link":"/p/1","thumb":"/t.png","type":"account",
                        "title":"Alice","description":"profile"},
                       {"link":"/p/2"}]"#;
        let results: Vec<SearchResult> = serde_json::from_str(json).expect("valid payload");

        assert_eq!(results[0].kind, "account");
        assert_eq!(results[0].thumbnail, "/t.png");
        assert_eq!(results[1].title, "");
        assert_eq!(results[1].description, "");
    }
}
