//! Cache Client
//!
//! Façade over a `KeyValueStore` that gates every operation on the
//! last-known connectivity flag.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{ConnectionState, ConnectionStatus, Connectivity, KeyValueStore, RedisStore};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::tasks::{probe, spawn_supervisor};

// == Cache Client ==
/// Cache client with an explicit `open`/`close` lifecycle.
///
/// Share one instance behind an `Arc`. Operations add no locking of their
/// own; atomicity of each get/set/delete is the server's.
pub struct CacheClient<S: KeyValueStore = RedisStore> {
    store: Arc<S>,
    connectivity: Arc<Connectivity>,
    health_check_interval: Duration,
    supervisor: Mutex<Option<JoinHandle<()>>>,
}

impl CacheClient<RedisStore> {
    /// Creates a Redis-backed client from configuration. Does not connect.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = RedisStore::new(&config.redis_url)?;
        Ok(Self::new(store, config.health_check_period()))
    }
}

impl<S: KeyValueStore> CacheClient<S> {
    // == Constructor ==
    /// Creates a client in the `Disconnected` state.
    pub fn new(store: S, health_check_interval: Duration) -> Self {
        Self {
            store: Arc::new(store),
            connectivity: Arc::new(Connectivity::new()),
            health_check_interval,
            supervisor: Mutex::new(None),
        }
    }

    // == Open ==
    /// Starts the connection supervisor and makes the first connect attempt.
    ///
    /// A failed attempt is returned to the caller, but the supervisor stays
    /// up and keeps retrying every health check interval.
    pub async fn open(&self) -> Result<()> {
        {
            let mut supervisor = self.supervisor.lock().await;
            if supervisor.is_none() {
                *supervisor = Some(spawn_supervisor(
                    self.store.clone(),
                    self.connectivity.clone(),
                    self.health_check_interval,
                ));
            }
        }

        if self.connectivity.is_alive() {
            return Ok(());
        }

        match self.store.connect().await {
            Ok(()) => {
                self.connectivity.mark_connected();
                Ok(())
            }
            Err(err) => {
                self.connectivity.mark_disconnected(&err.to_string());
                Err(err)
            }
        }
    }

    // == Close ==
    /// Stops the supervisor and drops the connection. Safe to call twice.
    ///
    /// Waits for the supervisor to finish so an in-flight probe cannot mark
    /// the client connected again after this returns.
    pub async fn close(&self) {
        let supervisor = self.supervisor.lock().await.take();
        if let Some(handle) = supervisor {
            handle.abort();
            // Cancellation is the expected outcome
            let _ = handle.await;
            debug!("Connection supervisor stopped");
        }
        self.store.disconnect().await;
        self.connectivity.reset();
        info!("Cache client closed");
    }

    // == Status ==
    /// Returns the last-known connectivity flag without a network round-trip.
    pub fn is_alive(&self) -> bool {
        self.connectivity.is_alive()
    }

    pub fn state(&self) -> ConnectionState {
        self.connectivity.state()
    }

    pub fn status(&self) -> ConnectionStatus {
        self.connectivity.status()
    }

    /// Probes the server now instead of waiting for the supervisor.
    pub async fn health_check(&self) -> bool {
        probe(self.store.as_ref(), &self.connectivity).await
    }

    // == Get ==
    /// Retrieves the value under `key`; `None` if the server has no such key.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        self.ensure_connected()?;
        let result = self.store.get(key).await;
        self.observe(result)
    }

    // == Set ==
    /// Stores `value` under `key` for `duration` seconds, replacing any
    /// existing value and expiry.
    ///
    /// `duration` is passed through as-is; Redis rejects zero.
    pub async fn set(&self, key: &str, value: &str, duration: u64) -> Result<()> {
        self.ensure_connected()?;
        let result = self.store.set_ex(key, value, duration).await;
        self.observe(result)
    }

    // == Delete ==
    /// Removes `key`. Deleting a key that does not exist is not an error.
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.ensure_connected()?;
        let result = self.store.delete(key).await;
        self.observe(result)
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.connectivity.is_alive() {
            Ok(())
        } else {
            Err(CacheError::NotConnected)
        }
    }

    /// Connection-level failures are error events; the error itself is returned unchanged.
    fn observe<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if err.is_connection_error() {
                self.connectivity.mark_disconnected(&err.to_string());
            }
        }
        result
    }
}

impl<S: KeyValueStore> Drop for CacheClient<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.supervisor.get_mut().take() {
            handle.abort();
        }
    }
}

impl<S: KeyValueStore + std::fmt::Debug> std::fmt::Debug for CacheClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheClient")
            .field("store", &self.store)
            .field("state", &self.connectivity.state())
            .field("health_check_interval", &self.health_check_interval)
            .finish()
    }
}
