//! Connection State Module
//!
//! Tracks the last observed connectivity of the cache server.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

// == Connection State ==
/// The two states of the client connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

// == Connection Status ==
/// Point-in-time snapshot of the connectivity flag.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionStatus {
    /// Current state
    pub state: ConnectionState,
    /// When the state last changed, RFC 3339
    pub since: String,
    /// Message of the most recent error event, if any
    pub last_error: Option<String>,
}

#[derive(Debug)]
struct Transition {
    since: DateTime<Utc>,
    last_error: Option<String>,
}

// == Connectivity ==
/// Last-known connectivity flag, updated by connect and error events.
///
/// Reads are a single atomic load and never touch the network.
#[derive(Debug)]
pub struct Connectivity {
    connected: AtomicBool,
    transition: RwLock<Transition>,
}

impl Connectivity {
    // == Constructor ==
    /// Creates a flag in the `Disconnected` state.
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
            transition: RwLock::new(Transition {
                since: Utc::now(),
                last_error: None,
            }),
        }
    }

    // == Is Alive ==
    /// Returns the last-known connectivity flag.
    pub fn is_alive(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    // == State ==
    pub fn state(&self) -> ConnectionState {
        if self.is_alive() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    // == Mark Connected ==
    /// Records a successful connect event.
    ///
    /// Returns true if this changed the state.
    pub fn mark_connected(&self) -> bool {
        let changed = !self.connected.swap(true, Ordering::AcqRel);
        if changed {
            self.touch(None);
            info!("Cache server connected");
        } else {
            debug!("Cache server still connected");
        }
        changed
    }

    // == Mark Disconnected ==
    /// Records an error event.
    ///
    /// Returns true if this changed the state.
    pub fn mark_disconnected(&self, reason: &str) -> bool {
        let changed = self.connected.swap(false, Ordering::AcqRel);
        if changed {
            self.touch(Some(reason.to_string()));
            warn!(error = %reason, "Cache server connection lost");
        } else {
            if let Ok(mut transition) = self.transition.write() {
                transition.last_error = Some(reason.to_string());
            }
            debug!(error = %reason, "Cache server still unreachable");
        }
        changed
    }

    // == Reset ==
    /// Moves to `Disconnected` after an explicit close, without an error.
    pub fn reset(&self) {
        if self.connected.swap(false, Ordering::AcqRel) {
            self.touch(None);
        }
    }

    // == Status ==
    /// Returns a snapshot of the current state and its metadata.
    pub fn status(&self) -> ConnectionStatus {
        let state = self.state();
        match self.transition.read() {
            Ok(transition) => ConnectionStatus {
                state,
                since: transition.since.to_rfc3339(),
                last_error: transition.last_error.clone(),
            },
            Err(_) => ConnectionStatus {
                state,
                since: Utc::now().to_rfc3339(),
                last_error: None,
            },
        }
    }

    fn touch(&self, last_error: Option<String>) {
        if let Ok(mut transition) = self.transition.write() {
            transition.since = Utc::now();
            transition.last_error = last_error;
        }
    }
}

impl Default for Connectivity {
    fn default() -> Self {
        Self::new()
    }
}
