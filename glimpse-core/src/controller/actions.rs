//! src/controller/actions.rs
//! ============================================================================
//! # Actions: Centralized Application Commands
//!
//! Defines the `Action` enum, which represents all user inputs and internal
//! events the application responds to. Raw terminal events are translated
//! into these commands at the edge; everything downstream of the main loop
//! speaks Actions only.

use crate::model::search_state::SearchResult;

/// Represents a high-level action that the application can perform.
#[derive(Debug, Clone)]
pub enum Action {
    /// Pointer activation of whatever card sits under the given cell.
    ActivateAt { column: u16, row: u16 },

    /// Activate the highlighted card (Enter).
    ActivateSelected,

    /// Dismiss the pending open-link confirmation.
    CancelPendingOpen,

    /// Clear the search box and hide the results panel.
    ClearSearch,

    /// Approve the pending open-link confirmation.
    ConfirmPendingOpen,

    /// Delete the character before the cursor in the search box.
    DeleteCharBack,

    /// A debounced query is ready for dispatch.
    DispatchQuery(String),

    /// Insert a character at the cursor in the search box.
    InsertChar(char),

    /// Move the highlight down one card.
    MoveSelectionDown,

    /// Move the highlight up one card.
    MoveSelectionUp,

    /// Quit the application.
    Quit,

    /// A terminal resize event.
    Resize(u16, u16),

    /// A query task finished; `seq` identifies the request it answers.
    SearchCompleted {
        seq: u64,
        outcome: Result<Vec<SearchResult>, String>,
    },

    /// An internal tick event for periodic updates (spinner animation).
    Tick,
}
