//! Cache Client - A thin client for a remote Redis cache
//!
//! Provides get/set-with-expiry/delete gated on a last-known connectivity
//! flag, kept current by a background health check.
//!
//! ```ignore
//! let client = CacheClient::from_config(&Config::from_env())?;
//! client.open().await?;
//! client.set("user:1", "alice", 60).await?;
//! assert_eq!(client.get("user:1").await?.as_deref(), Some("alice"));
//! client.close().await;
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod tasks;

pub use cache::{ConnectionState, ConnectionStatus, KeyValueStore, RedisStore};
pub use client::CacheClient;
pub use config::Config;
pub use error::{CacheError, Result};
pub use logging::init_tracing;
