//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to read or write the backing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backing store rejected the operation (e.g. quota exceeded).
    #[error("Store operation failed: {0}")]
    Store(String),

    /// The key cannot be used with this store.
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),
}
