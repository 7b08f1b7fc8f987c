//! Durable store - the on-device string-keyed map the idea store mirrors into.
//!
//! The store only relies on per-key last-write-wins. There is no ordering or
//! transactional guarantee across keys.

pub mod memory;
pub mod sqlite;

use crate::errors::Result;
use async_trait::async_trait;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Key holding the JSON array of ideas, newest first.
pub const IDEAS_KEY: &str = "startup_ideas";
/// Key holding the JSON array of idea ids the local user voted for.
pub const VOTES_KEY: &str = "user_votes";
/// Key holding the JSON boolean theme flag.
pub const THEME_KEY: &str = "dark_mode";

/// Durable string-keyed, string-valued storage.
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Read a value. Returns `None` if the key was never written or was removed.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value. Creates or overwrites.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value. No-op if the key doesn't exist.
    async fn remove(&self, key: &str) -> Result<()>;
}
