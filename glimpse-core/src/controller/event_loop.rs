//! src/controller/event_loop.rs
//! ============================================================================
//! # Event loop: merged action sources
//!
//! Folds the two background channels — task results from query tasks and
//! debounced queries from the input debouncer — into a single stream of
//! `Action`s for the main select loop, with lightweight counters for the
//! shutdown metrics log.

use tokio::sync::mpsc;
use tracing::info;

use crate::controller::actions::Action;

pub struct EventLoop {
    action_rx: mpsc::UnboundedReceiver<Action>,
    query_rx: mpsc::UnboundedReceiver<String>,
    actions_processed: u64,
    queries_debounced: u64,
}

/// Point-in-time counters snapshot.
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnap {
    pub actions: u64,
    pub queries: u64,
}

impl EventLoop {
    #[must_use]
    pub fn new(
        action_rx: mpsc::UnboundedReceiver<Action>,
        query_rx: mpsc::UnboundedReceiver<String>,
    ) -> Self {
        info!("Initializing event loop controller");
        Self {
            action_rx,
            query_rx,
            actions_processed: 0,
            queries_debounced: 0,
        }
    }

    /// Next background action. Debounced queries surface as
    /// `Action::DispatchQuery`. Resolves to `Quit` if every sender is gone.
    pub async fn next_action(&mut self) -> Action {
        tokio::select! {
            Some(action) = self.action_rx.recv() => {
                self.actions_processed += 1;
                action
            }
            Some(query) = self.query_rx.recv() => {
                self.queries_debounced += 1;
                Action::DispatchQuery(query)
            }
            else => Action::Quit,
        }
    }

    #[must_use]
    pub fn snapshot_metrics(&self) -> MetricsSnap {
        MetricsSnap {
            actions: self.actions_processed,
            queries: self.queries_debounced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_debounced_queries_become_dispatch_actions() {
        let (_action_tx, action_rx) = mpsc::unbounded_channel();
        let (query_tx, query_rx) = mpsc::unbounded_channel();
        let mut event_loop = EventLoop::new(action_rx, query_rx);

        query_tx.send("cats".to_string()).expect("send");

        match event_loop.next_action().await {
            Action::DispatchQuery(q) => assert_eq!(q, "cats"),
            other => panic!("expected DispatchQuery, got {other:?}"),
        }
        assert_eq!(event_loop.snapshot_metrics().queries, 1);
    }

    #[tokio::test]
    async fn test_closed_channels_resolve_to_quit() {
        let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();
        let (query_tx, query_rx) = mpsc::unbounded_channel::<String>();
        let mut event_loop = EventLoop::new(action_rx, query_rx);

        drop(action_tx);
        drop(query_tx);

        assert!(matches!(event_loop.next_action().await, Action::Quit));
    }
}
