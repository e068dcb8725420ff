//! In-Memory Store
//!
//! Test double for `KeyValueStore` that mimics the Redis replies the client
//! relies on, including expiry and the invalid-expire error.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::RedisError;

use crate::cache::KeyValueStore;
use crate::error::Result;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

// == Memory Store ==
#[derive(Debug)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
    reachable: AtomicBool,
    connected: AtomicBool,
    connect_attempts: AtomicUsize,
    connect_delay_ms: AtomicU64,
}

impl MemoryStore {
    /// Creates a reachable store with no entries.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            reachable: AtomicBool::new(true),
            connected: AtomicBool::new(false),
            connect_attempts: AtomicUsize::new(0),
            connect_delay_ms: AtomicU64::new(0),
        }
    }

    /// Creates a store whose server is down.
    pub fn unreachable() -> Self {
        let store = Self::new();
        store.set_reachable(false);
        store
    }

    /// Simulates the server going away or coming back.
    ///
    /// Going away also drops the current connection.
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
        if !reachable {
            self.connected.store(false, Ordering::SeqCst);
        }
    }

    /// Makes every later connect attempt take `delay` before it resolves.
    pub fn set_connect_delay(&self, delay: Duration) {
        self.connect_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn connect_attempts(&self) -> usize {
        self.connect_attempts.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    fn check_connection(&self) -> Result<()> {
        if self.connected.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RedisError::from(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset")).into())
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn connect(&self) -> Result<()> {
        self.connect_attempts.fetch_add(1, Ordering::SeqCst);
        let delay = self.connect_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if !self.reachable.load(Ordering::SeqCst) {
            return Err(RedisError::from(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))
            .into());
        }
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    async fn ping(&self) -> Result<()> {
        self.check_connection()
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_connection()?;
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        self.check_connection()?;
        if ttl_secs == 0 {
            return Err(RedisError::from((
                redis::ErrorKind::ResponseError,
                "An error was signalled by the server",
                "invalid expire time in 'set' command".to_string(),
            ))
            .into());
        }
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + Duration::from_secs(ttl_secs),
        };
        self.entries.lock().unwrap().insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.check_connection()?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
