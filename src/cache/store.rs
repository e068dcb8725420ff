//! Key-Value Store Module
//!
//! The seam between the client façade and the cache server adapter.

use async_trait::async_trait;

use crate::error::Result;

// == Key-Value Store ==
/// Operations the client needs from a cache server connection.
///
/// Errors are returned exactly as the underlying client reports them.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Establishes (or re-establishes) the connection.
    async fn connect(&self) -> Result<()>;

    /// Drops the connection, if any.
    async fn disconnect(&self);

    /// Round-trips a PING to the server.
    async fn ping(&self) -> Result<()>;

    /// Returns the value stored under `key`, or None if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, expiring after `ttl_secs` seconds.
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()>;

    /// Removes `key`. Absent keys are not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
