//! Key-value storage for the handful of values the front-end persists
//! between runs. This is the terminal counterpart of browser local storage:
//! string keys, string values, nothing else.

pub mod error;
pub mod favorites;
pub mod file;
pub mod memory;
pub mod redis_store;

use std::future::Future;

pub use error::{Result, StoreError};
pub use favorites::{FAVORITES_KEY, Favorites, parse_favorites};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when the key has never been written or was removed.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}
