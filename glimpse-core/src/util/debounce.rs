//! src/util/debounce.rs
//! ============================================================================
//! # Debounce utility for keystroke-driven dispatch
//!
//! Trailing-edge debouncer: an event is delivered only after the input has
//! been quiet for the configured delay, and only the latest event survives
//! a burst. Async-safe: the pending sleeper is a `tokio::time` task that is
//! aborted and replaced on every submit, so no green threads leak under
//! keystroke storms.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
    time::sleep,
};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct DebounceConfig {
    pub delay: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(200),
        }
    }
}

impl DebounceConfig {
    /// Config for search input debouncing with the configured quiet time.
    #[must_use]
    pub const fn search_input(delay: Duration) -> Self {
        Self { delay }
    }
}

/// Single-slot trailing-edge debouncer. Holds at most one pending event;
/// each submit replaces it and restarts the quiet-time clock.
pub struct Debouncer<T> {
    cfg: DebounceConfig,
    pending: Arc<Mutex<Option<T>>>,
    sleeper: Mutex<Option<JoinHandle<()>>>,
    tx: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a new debouncer and its Rx endpoint.
    #[must_use]
    pub fn new(cfg: DebounceConfig) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let deb = Self {
            cfg,
            pending: Arc::new(Mutex::new(None)),
            sleeper: Mutex::new(None),
            tx,
        };
        (deb, rx)
    }

    /// Submit an event for debouncing. The previous pending event, if any,
    /// is discarded.
    pub async fn submit(&self, ev: T) {
        trace!("Debouncer received event");

        *self.pending.lock().await = Some(ev);

        // Cancel the running sleeper and start the quiet-time clock over.
        let mut sleeper = self.sleeper.lock().await;
        if let Some(handle) = sleeper.take() {
            handle.abort();
        }

        let delay = self.cfg.delay;
        let pending = Arc::clone(&self.pending);
        let tx = self.tx.clone();

        *sleeper = Some(tokio::spawn(async move {
            sleep(delay).await;

            if let Some(event) = pending.lock().await.take() {
                trace!("Debouncer trailing edge fired");
                let _ = tx.send(event);
            }
        }));
    }

    /// Force-deliver the pending event without waiting out the delay.
    pub async fn flush(&self) {
        if let Some(handle) = self.sleeper.lock().await.take() {
            handle.abort();
        }
        if let Some(event) = self.pending.lock().await.take() {
            let _ = self.tx.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_burst_delivers_only_latest_event() {
        let (deb, mut rx) = Debouncer::new(DebounceConfig::search_input(Duration::from_millis(200)));

        deb.submit("ab".to_string()).await;
        tokio::time::advance(Duration::from_millis(50)).await;
        deb.submit("abc".to_string()).await;

        let fired = rx.recv().await.expect("trailing edge should fire");
        assert_eq!(fired, "abc");

        // Nothing else pending.
        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiet_period_required_before_delivery() {
        let (deb, mut rx) = Debouncer::new(DebounceConfig::search_input(Duration::from_millis(200)));

        deb.submit(1u32).await;
        tokio::time::advance(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err(), "must stay quiet for the full delay");

        tokio::time::advance(Duration::from_millis(250)).await;
        assert_eq!(rx.recv().await, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_delivers_immediately() {
        let (deb, mut rx) = Debouncer::new(DebounceConfig::default());

        deb.submit(7u32).await;
        deb.flush().await;

        assert_eq!(rx.recv().await, Some(7));
    }
}
