//! Shared test utilities for the idea board.
//!
//! Helpers for setting up test databases and stores, fixture ideas with
//! sensible defaults, and stand-ins for the platform share hooks.

use crate::{
    core::{
        evaluation::{Evaluator, FEEDBACK_POOL},
        share::{Clipboard, ShareSheet},
        store::{IdeaStore, StoreOptions},
    },
    errors::{Error, Result},
    models::{Idea, IdeaId},
    storage::DurableStore,
};
use chrono::{TimeZone, Utc};
use sea_orm::DatabaseConnection;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A store over `durable` with a fixed-seed evaluator and default options.
pub fn test_store<D: DurableStore + 'static>(durable: Arc<D>) -> IdeaStore {
    IdeaStore::new(durable, Evaluator::seeded(42), StoreOptions::default())
}

/// Builds an idea directly, bypassing the store.
///
/// # Defaults
/// * name/tagline/description: derived from `id`
/// * feedback: first entry of the pool
/// * `created_at`: `created_millis` after the Unix epoch
pub fn idea_fixture(id: &str, rating: u8, votes: u32, created_millis: i64) -> Idea {
    Idea {
        id: IdeaId::from(id),
        name: format!("Idea {id}"),
        tagline: format!("Tagline {id}"),
        description: format!("Description {id}"),
        rating,
        feedback: FEEDBACK_POOL[0].to_string(),
        votes,
        created_at: Utc
            .timestamp_millis_opt(created_millis)
            .single()
            .unwrap_or_default(),
    }
}

/// Share sheet stand-in that records what it was asked to share.
#[derive(Debug, Default)]
pub struct StubShareSheet {
    available: bool,
    fail: bool,
    shared: Mutex<Vec<String>>,
}

impl StubShareSheet {
    pub fn available() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Available, but every share attempt errors.
    pub fn failing() -> Self {
        Self {
            available: true,
            fail: true,
            ..Self::default()
        }
    }

    pub fn shared(&self) -> Vec<String> {
        self.shared.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ShareSheet for StubShareSheet {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn share(&self, text: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Share("share sheet dismissed with error".to_string()));
        }
        if let Ok(mut shared) = self.shared.lock() {
            shared.push(text.to_string());
        }
        Ok(())
    }
}

/// Clipboard stand-in holding the last text set.
#[derive(Debug, Default)]
pub struct RecordingClipboard {
    fail: bool,
    contents: Mutex<Option<String>>,
}

impl RecordingClipboard {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

#[async_trait::async_trait]
impl Clipboard for RecordingClipboard {
    async fn set_text(&self, text: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Storage("clipboard unavailable".to_string()));
        }
        if let Ok(mut contents) = self.contents.lock() {
            *contents = Some(text.to_string());
        }
        Ok(())
    }
}
