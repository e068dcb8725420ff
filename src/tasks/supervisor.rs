//! Connection Supervisor Task
//!
//! Background task that keeps the connectivity flag in line with the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Connectivity, KeyValueStore};

/// Shortest pause between probes; smaller intervals are raised to this.
pub const MIN_PROBE_INTERVAL: Duration = Duration::from_millis(10);

/// Probes the server once and records the outcome on the flag.
///
/// While connected this is a PING; while disconnected it is a fresh connect
/// attempt. Returns the resulting liveness.
pub async fn probe<S: KeyValueStore + ?Sized>(store: &S, connectivity: &Connectivity) -> bool {
    let outcome = if connectivity.is_alive() {
        store.ping().await
    } else {
        store.connect().await
    };

    match outcome {
        Ok(()) => {
            connectivity.mark_connected();
            true
        }
        Err(err) => {
            connectivity.mark_disconnected(&err.to_string());
            false
        }
    }
}

/// Spawns a background task that probes the server at a fixed interval.
///
/// The task runs until aborted. There is no backoff; `interval` is the only
/// pacing between reconnect attempts, floored at `MIN_PROBE_INTERVAL`.
///
/// # Returns
/// A JoinHandle for the spawned task, aborted by `CacheClient::close`.
pub fn spawn_supervisor<S: KeyValueStore>(
    store: Arc<S>,
    connectivity: Arc<Connectivity>,
    interval: Duration,
) -> JoinHandle<()> {
    let interval = interval.max(MIN_PROBE_INTERVAL);

    tokio::spawn(async move {
        info!(
            "Starting connection supervisor with interval of {:?}",
            interval
        );

        loop {
            tokio::time::sleep(interval).await;

            let was_alive = connectivity.is_alive();
            let alive = probe(store.as_ref(), &connectivity).await;

            if !was_alive && alive {
                info!("Supervisor restored cache server connection");
            } else {
                debug!(alive, "Supervisor health check complete");
            }
        }
    })
}
