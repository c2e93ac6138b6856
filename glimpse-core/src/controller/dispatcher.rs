//! src/controller/dispatcher.rs
//! ============================================================================
//! # `ActionDispatcher`: state mutations and query dispatch
//!
//! Owns the `SearchState` and applies every `Action` to it. This is the
//! query dispatcher of the live-search widget: input edits feed the
//! debouncer, debounced queries are gated on the configured minimum length,
//! and each issued request carries a sequence token. A response is applied
//! only when its token is still the latest issued one; everything else is
//! discarded as stale, which also covers queries cleared or shortened while
//! a request was in flight.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, trace, warn};

use crate::{
    config::Config,
    controller::actions::Action,
    error::AppError,
    model::search_state::{NotificationLevel, PendingOpen, SearchResult, SearchState},
    search::{client::SearchClient, query_task::spawn_query_task},
    util::debounce::Debouncer,
};

/// Decision taken for one dispatched query. Pure; the side effects live in
/// `dispatch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DispatchPlan {
    /// Empty input: clear and hide synchronously, no network.
    Clear,

    /// Below the minimum search length: no request, panel hidden.
    TooShort,

    /// Issue a request under this sequence token.
    Issue { seq: u64 },
}

pub struct ActionDispatcher {
    pub state: SearchState,
    config: Arc<Config>,
    client: Arc<SearchClient>,
    debouncer: Debouncer<String>,
    action_tx: UnboundedSender<Action>,
    base_url: Option<reqwest::Url>,
    latest_seq: u64,
}

impl ActionDispatcher {
    pub fn new(
        config: Arc<Config>,
        client: Arc<SearchClient>,
        debouncer: Debouncer<String>,
        action_tx: UnboundedSender<Action>,
    ) -> Self {
        let base_url = reqwest::Url::parse(&config.search.endpoint).ok();
        Self {
            state: SearchState::new(),
            config,
            client,
            debouncer,
            action_tx,
            base_url,
            latest_seq: 0,
        }
    }

    /// Apply one action. Returns false when the application should exit.
    pub async fn handle(&mut self, action: Action) -> bool {
        trace!(?action, "dispatching action");

        match action {
            Action::InsertChar(ch) => {
                self.state.insert_char(ch);
                self.on_input_changed().await;
            }
            Action::DeleteCharBack => {
                if self.state.delete_char_before() {
                    self.on_input_changed().await;
                }
            }
            Action::DispatchQuery(query) => self.dispatch(query),
            Action::SearchCompleted { seq, outcome } => self.apply_response(seq, outcome),
            Action::MoveSelectionUp => self.state.move_selection_up(),
            Action::MoveSelectionDown => self.state.move_selection_down(),
            Action::ActivateSelected => {
                let target = self
                    .state
                    .active_result()
                    .map(|r| (r.link.clone(), r.title.clone()));
                if let Some((link, title)) = target {
                    self.activate(link, title);
                }
            }
            Action::ActivateAt { column, row } => {
                let target = self
                    .state
                    .card_at(column, row)
                    .and_then(|i| self.state.result_at(i))
                    .map(|r| (r.link.clone(), r.title.clone()));
                if let Some((link, title)) = target {
                    self.activate(link, title);
                }
            }
            Action::ConfirmPendingOpen => {
                if let Some(pending) = self.state.pending_open.take() {
                    self.open_link(&pending.link);
                    self.state.request_redraw();
                }
            }
            Action::CancelPendingOpen => {
                if self.state.pending_open.take().is_some() {
                    self.state.request_redraw();
                }
            }
            Action::ClearSearch => self.clear_search(),
            Action::Resize(_, _) => self.state.request_redraw(),
            Action::Tick => {
                // Spinner animation and notification aging both repaint on
                // the tick; everything else redraws on state change.
                if self.state.searching || self.state.notification.is_some() {
                    self.state.request_redraw();
                }
            }
            Action::Quit => {
                info!("Quit action received");
                return false;
            }
        }

        true
    }

    // ------------------------------------------------------------------
    // Query dispatch
    // ------------------------------------------------------------------

    /// Input text changed: empty input clears synchronously, anything else
    /// waits out the quiet period in the debouncer.
    async fn on_input_changed(&mut self) {
        if self.state.input.is_empty() {
            self.dispatch(String::new());
        } else {
            self.debouncer.submit(self.state.input.to_string()).await;
        }
    }

    /// Decide what to do with one query. Every branch bumps the sequence
    /// token, so responses to superseded requests always compare stale —
    /// including requests whose query has since been cleared or shortened
    /// below the minimum length.
    fn plan_dispatch(&mut self, query: &str) -> DispatchPlan {
        self.latest_seq += 1;

        if query.is_empty() {
            DispatchPlan::Clear
        } else if query.chars().count() < self.config.search.min_search_length {
            DispatchPlan::TooShort
        } else {
            DispatchPlan::Issue {
                seq: self.latest_seq,
            }
        }
    }

    fn dispatch(&mut self, query: String) {
        match self.plan_dispatch(&query) {
            DispatchPlan::Clear => {
                trace!("empty query; clearing results panel");
                self.state.clear_results();
            }
            DispatchPlan::TooShort => {
                trace!(
                    min = self.config.search.min_search_length,
                    query = %query,
                    "query below minimum search length; suppressing request"
                );
                self.state.clear_results();
            }
            DispatchPlan::Issue { seq } => {
                debug!(seq, query = %query, "issuing search request");
                self.state.searching = true;
                self.state.request_redraw();
                spawn_query_task(seq, query, Arc::clone(&self.client), self.action_tx.clone());
            }
        }
    }

    /// Apply a completed request if it is still the latest one issued.
    fn apply_response(&mut self, seq: u64, outcome: Result<Vec<SearchResult>, String>) {
        if seq != self.latest_seq {
            debug!(seq, latest = self.latest_seq, "discarding stale search response");
            return;
        }

        match outcome {
            Ok(results) => {
                debug!(seq, count = results.len(), "applying search response");
                self.state.install_results(results);
            }
            Err(err) => {
                // Failures render as the empty result state rather than a
                // perpetual spinner.
                warn!(seq, error = %err, "search failed; showing empty result state");
                self.state.install_results(Vec::new());
                self.state
                    .notify(NotificationLevel::Error, format!("Search failed: {err}"));
            }
        }
    }

    fn clear_search(&mut self) {
        if self.state.pending_open.take().is_some() {
            self.state.request_redraw();
            return;
        }
        self.state.input = Default::default();
        self.state.input_cursor = 0;
        self.dispatch(String::new());
    }

    // ------------------------------------------------------------------
    // Activation
    // ------------------------------------------------------------------

    /// Activate a result link: the terminal-app equivalent of following the
    /// card's href. Optionally gated behind a confirmation overlay.
    fn activate(&mut self, link: String, title: String) {
        let url = self.absolutize(&link);

        if self.config.ui.confirm_open {
            self.state.pending_open = Some(PendingOpen { link: url, title });
            self.state.request_redraw();
        } else {
            self.open_link(&url);
        }
    }

    fn open_link(&mut self, url: &str) {
        match open::that_detached(url) {
            Ok(()) => {
                info!(url = %url, "opened result link");
                self.state
                    .notify(NotificationLevel::Success, format!("Opened {url}"));
            }
            Err(e) => {
                let err = AppError::open_link(url, e);
                warn!(error = %err, "failed to open result link");
                self.state.notify(NotificationLevel::Error, err.to_string());
            }
        }
    }

    /// Resolve site-relative result links against the endpoint origin.
    /// Already-absolute links pass through untouched.
    fn absolutize(&self, link: &str) -> String {
        if reqwest::Url::parse(link).is_ok() {
            return link.to_string();
        }
        match self.base_url.as_ref().and_then(|base| base.join(link).ok()) {
            Some(url) => url.to_string(),
            None => link.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::search_state::PanelLayout,
        util::debounce::{DebounceConfig, Debouncer},
    };
    use ratatui::layout::Rect;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn make_dispatcher(confirm_open: bool) -> (ActionDispatcher, UnboundedReceiver<Action>) {
        let mut config = Config::default();
        config.ui.confirm_open = confirm_open;
        let config = Arc::new(config);

        let client = Arc::new(SearchClient::new(&config.search).expect("client"));
        let (debouncer, _query_rx) = Debouncer::new(DebounceConfig::default());
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        (
            ActionDispatcher::new(config, client, debouncer, action_tx),
            action_rx,
        )
    }

    fn results(links: &[&str]) -> Vec<SearchResult> {
        links
            .iter()
            .map(|l| SearchResult {
                link: (*l).to_string(),
                title: format!("title {l}"),
                ..SearchResult::default()
            })
            .collect()
    }

    #[test]
    fn test_empty_query_plans_synchronous_clear() {
        let (mut d, _rx) = make_dispatcher(false);
        assert_eq!(d.plan_dispatch(""), DispatchPlan::Clear);
    }

    #[test]
    fn test_short_query_suppresses_request() {
        let (mut d, _rx) = make_dispatcher(false);
        assert_eq!(d.plan_dispatch("a"), DispatchPlan::TooShort);
    }

    #[test]
    fn test_issued_sequences_are_monotonic() {
        let (mut d, _rx) = make_dispatcher(false);
        let first = d.plan_dispatch("ab");
        let second = d.plan_dispatch("abc");
        assert_eq!(first, DispatchPlan::Issue { seq: 1 });
        assert_eq!(second, DispatchPlan::Issue { seq: 2 });
    }

    #[tokio::test]
    async fn test_short_query_hides_panel_without_searching() {
        let (mut d, _rx) = make_dispatcher(false);
        d.state.install_results(results(&["/old"]));

        assert!(d.handle(Action::DispatchQuery("a".to_string())).await);

        assert!(d.state.results.is_empty());
        assert!(!d.state.panel_visible);
        assert!(!d.state.searching, "no request may be issued");
    }

    #[test]
    fn test_suppression_invalidates_in_flight_request() {
        let (mut d, _rx) = make_dispatcher(false);
        let DispatchPlan::Issue { seq } = d.plan_dispatch("abc") else {
            panic!("expected issue");
        };

        // The query was shortened below the threshold before the response
        // arrived; the old sequence must now compare stale.
        assert_eq!(d.plan_dispatch("a"), DispatchPlan::TooShort);
        d.apply_response(seq, Ok(results(&["/late"])));

        assert!(d.state.results.is_empty());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let (mut d, _rx) = make_dispatcher(false);
        let DispatchPlan::Issue { seq: old } = d.plan_dispatch("ab") else {
            panic!("expected issue");
        };
        let DispatchPlan::Issue { seq: new } = d.plan_dispatch("abc") else {
            panic!("expected issue");
        };

        d.apply_response(new, Ok(results(&["/fresh"])));
        d.apply_response(old, Ok(results(&["/stale"])));

        assert_eq!(d.state.results.len(), 1);
        assert_eq!(d.state.results[0].link, "/fresh");
    }

    #[test]
    fn test_failed_response_renders_empty_state_with_note() {
        let (mut d, _rx) = make_dispatcher(false);
        let DispatchPlan::Issue { seq } = d.plan_dispatch("ab") else {
            panic!("expected issue");
        };

        d.apply_response(seq, Err("connection refused".to_string()));

        assert!(d.state.results.is_empty());
        assert!(d.state.panel_visible, "empty state still renders the panel");
        assert!(!d.state.searching, "no perpetual loading state");
        assert!(d.state.current_notification().is_some());
    }

    #[tokio::test]
    async fn test_clear_search_empties_input_and_hides_panel() {
        let (mut d, _rx) = make_dispatcher(false);
        d.state.insert_char('a');
        d.state.insert_char('b');
        d.state.install_results(results(&["/a"]));

        assert!(d.handle(Action::ClearSearch).await);

        assert!(d.state.input.is_empty());
        assert!(d.state.results.is_empty());
        assert!(!d.state.panel_visible);
        assert_eq!(d.state.active, None);
    }

    #[tokio::test]
    async fn test_enter_activates_the_highlighted_card() {
        let (mut d, _rx) = make_dispatcher(true);
        d.state.install_results(results(&["/a", "/b", "/c"]));
        d.state.move_selection_down();

        assert!(d.handle(Action::ActivateSelected).await);

        let pending = d.state.pending_open.as_ref().expect("confirmation pending");
        assert_eq!(pending.link, "http://localhost:8000/b");
    }

    #[tokio::test]
    async fn test_click_activates_the_clicked_card_not_the_highlight() {
        let (mut d, _rx) = make_dispatcher(true);
        d.state.install_results(results(&["/a", "/b", "/c"]));
        d.state.layout = Some(PanelLayout {
            area: Rect::new(0, 3, 60, 9),
            card_height: 3,
            offset: 0,
        });

        // Highlight stays on the first card; the click lands on the third.
        assert!(d.handle(Action::ActivateAt { column: 5, row: 9 }).await);

        let pending = d.state.pending_open.as_ref().expect("confirmation pending");
        assert_eq!(pending.link, "http://localhost:8000/c");
        assert_eq!(d.state.active, Some(0));
    }

    #[tokio::test]
    async fn test_escape_cancels_pending_confirmation_first() {
        let (mut d, _rx) = make_dispatcher(true);
        d.state.install_results(results(&["/a"]));
        assert!(d.handle(Action::ActivateSelected).await);
        assert!(d.state.pending_open.is_some());

        assert!(d.handle(Action::ClearSearch).await);

        assert!(d.state.pending_open.is_none());
        // The result set survives; only the confirmation was dismissed.
        assert_eq!(d.state.results.len(), 1);
    }

    #[tokio::test]
    async fn test_quit_stops_the_loop() {
        let (mut d, _rx) = make_dispatcher(false);
        assert!(!d.handle(Action::Quit).await);
    }

    #[test]
    fn test_absolutize_joins_relative_links() {
        let (d, _rx) = make_dispatcher(false);
        assert_eq!(d.absolutize("/p/7"), "http://localhost:8000/p/7");
        assert_eq!(d.absolutize("https://example.net/x"), "https://example.net/x");
    }
}
