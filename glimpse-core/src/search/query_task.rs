//! src/search/query_task.rs
//! ============================================================================
//! # Query task: one background fetch per issued request
//!
//! Spawns the HTTP fetch for a dispatched query and reports the outcome
//! back to the main loop as an `Action::SearchCompleted` carrying the
//! request's sequence token. Errors cross the channel as strings; the
//! dispatcher decides how they surface.

use std::{sync::Arc, time::Instant};

use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};
use tracing::{debug, warn};

use crate::{controller::actions::Action, search::client::SearchClient};

pub fn spawn_query_task(
    seq: u64,
    query: String,
    client: Arc<SearchClient>,
    action_tx: UnboundedSender<Action>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let started = Instant::now();
        let outcome = client.fetch(&query).await;

        match &outcome {
            Ok(results) => debug!(
                seq,
                query = %query,
                count = results.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Search request completed"
            ),
            Err(e) => warn!(
                seq,
                query = %query,
                elapsed_ms = started.elapsed().as_millis() as u64,
                error = %e,
                "Search request failed"
            ),
        }

        // The receiver may be gone during shutdown; nothing to do then.
        let _ = action_tx.send(Action::SearchCompleted {
            seq,
            outcome: outcome.map_err(|e| e.to_string()),
        });
    })
}
