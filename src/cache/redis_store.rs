//! Redis Store Module
//!
//! `KeyValueStore` adapter over the `redis` crate's multiplexed async connection.

use std::io;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisError};
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::KeyValueStore;
use crate::error::{CacheError, Result};

// == Redis Store ==
/// Redis-backed store.
///
/// Holds at most one multiplexed connection; each call works on a clone of
/// the handle so concurrent callers share the same socket.
pub struct RedisStore {
    client: Client,
    conn: RwLock<Option<MultiplexedConnection>>,
}

impl RedisStore {
    // == Constructor ==
    /// Creates a store for the given `redis://` URL without connecting.
    pub fn new(url: &str) -> Result<Self> {
        let client = Client::open(url)
            .map_err(|e| CacheError::InvalidConfig(format!("Invalid Redis URL '{}': {}", url, e)))?;

        Ok(Self {
            client,
            conn: RwLock::new(None),
        })
    }

    /// Returns a handle to the current connection.
    async fn connection(&self) -> Result<MultiplexedConnection> {
        match self.conn.read().await.as_ref() {
            Some(conn) => Ok(conn.clone()),
            None => Err(RedisError::from(io::Error::new(
                io::ErrorKind::NotConnected,
                "no connection to the cache server",
            ))
            .into()),
        }
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn connect(&self) -> Result<()> {
        let conn = self.client.get_multiplexed_async_connection().await?;
        *self.conn.write().await = Some(conn);
        debug!(server = %self.client.get_connection_info().addr, "Opened Redis connection");
        Ok(())
    }

    async fn disconnect(&self) {
        self.conn.write().await.take();
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = conn.set_ex(key, value, ttl_secs).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: i64 = conn.del(key).await?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("server", &self.client.get_connection_info().addr)
            .finish()
    }
}
