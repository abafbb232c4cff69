//! Durable key-value persistence for ShopCart.
//!
//! The cart never talks to a storage engine directly. It is handed something
//! that implements [`KeyValueStore`] and reads/writes JSON through a typed
//! [`Cache`]. Two backends ship with the crate:
//!
//! - [`MemoryStore`] - process-local map, shared between clones (tests, embedding)
//! - [`FileStore`] - one file per key in a directory (the CLI)
//!
//! # Example
//!
//! ```rust
//! use shopcart_cache::{Cache, MemoryStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Visit {
//!     count: u32,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//!
//! // Store a value
//! cache.set("visits", &Visit { count: 1 }).unwrap();
//!
//! // Retrieve a value
//! let visit: Option<Visit> = cache.get("visits").unwrap();
//! assert_eq!(visit, Some(Visit { count: 1 }));
//!
//! // Delete a value
//! cache.delete("visits").unwrap();
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
