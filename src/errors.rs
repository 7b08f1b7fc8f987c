use thiserror::Error;

/// Every failure the idea board can report to a caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// The SQLite backend rejected a query or connection
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A snapshot could not be encoded or decoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem access failed, e.g. creating the database directory
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A durable store backend failed outside of SQL (lock poisoning, injected faults)
    #[error("Storage error: {0}")]
    Storage(String),

    /// A submission field was empty after trimming
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// No idea has the given id
    #[error("Idea not found: {0}")]
    IdeaNotFound(String),

    /// `hydrate` runs once per store
    #[error("Store has already been hydrated")]
    AlreadyHydrated,

    /// Neither the share sheet nor the clipboard accepted the summary
    #[error("Share failed: {0}")]
    Share(String),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
