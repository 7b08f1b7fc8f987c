//! SQLite-backed durable store built on SeaORM.

use super::DurableStore;
use crate::{
    entities::{KvEntry, kv_entry},
    errors::Result,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{Set, prelude::*, sea_query::OnConflict};
use tracing::{debug, instrument};

/// Durable store persisting every key as one row of the `kv_entries` table.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: DatabaseConnection,
}

impl SqliteStore {
    /// Wraps a connection whose tables were created with
    /// [`crate::config::database::create_tables`].
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl DurableStore for SqliteStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entry = KvEntry::find()
            .filter(kv_entry::Column::Key.eq(key))
            .one(&self.db)
            .await?;
        debug!("Read key '{}': {} bytes", key, entry.as_ref().map_or(0, |e| e.value.len()));
        Ok(entry.map(|e| e.value))
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let entry = kv_entry::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        // Upsert so two writers of the same key never trip the unique index
        KvEntry::insert(entry)
            .on_conflict(
                OnConflict::column(kv_entry::Column::Key)
                    .update_columns([kv_entry::Column::Value, kv_entry::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        debug!("Wrote key '{}': {} bytes", key, value.len());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> Result<()> {
        let result = KvEntry::delete_many()
            .filter(kv_entry::Column::Key.eq(key))
            .exec(&self.db)
            .await?;
        debug!("Removed key '{}' ({} rows)", key, result.rows_affected);
        Ok(())
    }
}
