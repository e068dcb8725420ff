//! Error types for the cache client
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache client.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Operation attempted while the connectivity flag is down
    #[error("Cache client is not connected")]
    NotConnected,

    /// Error reported by the cache server or its connection, passed through as-is
    #[error(transparent)]
    Store(#[from] redis::RedisError),

    /// Connection settings rejected at construction time
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CacheError {
    // == Connectivity Classification ==
    /// Returns true if this error means the connection itself failed.
    ///
    /// Server replies such as a wrong-type or invalid-expire error are not
    /// connection failures and leave the connectivity flag alone.
    pub fn is_connection_error(&self) -> bool {
        match self {
            CacheError::Store(err) => {
                err.is_io_error()
                    || err.is_connection_dropped()
                    || err.is_connection_refusal()
                    || err.is_timeout()
            }
            CacheError::NotConnected | CacheError::InvalidConfig(_) => false,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache client.
pub type Result<T> = std::result::Result<T, CacheError>;
