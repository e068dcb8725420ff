//! Cache Module
//!
//! Connectivity tracking and the store adapter behind the cache client.

mod redis_store;
mod state;
mod store;

#[cfg(test)]
pub(crate) mod memory;


// Re-export public types
pub use redis_store::RedisStore;
pub use state::{ConnectionState, ConnectionStatus, Connectivity};
pub use store::KeyValueStore;
