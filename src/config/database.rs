//! Database configuration module for the idea board.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs.

use crate::entities::KvEntry;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Default on-device database location. `mode=rwc` creates the file on first run.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/idea_board.sqlite?mode=rwc";

/// Picks the database URL: `DATABASE_URL` from the environment wins, then the
/// configured value, then [`DEFAULT_DATABASE_URL`].
#[must_use]
pub fn resolve_database_url(configured: Option<&str>) -> String {
    pick_database_url(std::env::var("DATABASE_URL").ok(), configured)
}

fn pick_database_url(from_env: Option<String>, configured: Option<&str>) -> String {
    from_env
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Creates the parent directory of a file-backed `SQLite` URL so the driver can
/// create the database file. In-memory URLs are left alone.
pub fn ensure_database_dir(database_url: &str) -> Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = rest.split('?').next().unwrap_or(rest);
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        debug!("Ensuring database directory {:?} exists", parent);
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Establishes a connection to the database at `database_url` and makes sure
/// all tables exist.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    ensure_database_dir(database_url)?;
    let db = Database::connect(database_url).await?;
    create_tables(&db).await?;
    info!("Database ready at {}", database_url);
    Ok(db)
}

/// Creates all necessary database tables from the entity definitions.
/// Existing tables are kept.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut kv_table = schema.create_table_from_entity(KvEntry);
    kv_table.if_not_exists();

    db.execute(builder.build(&kv_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::KvEntryModel;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let _: Vec<KvEntryModel> = KvEntry::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[test]
    fn test_database_url_precedence() {
        assert_eq!(
            pick_database_url(
                Some("sqlite://env.sqlite".to_string()),
                Some("sqlite://file.sqlite")
            ),
            "sqlite://env.sqlite"
        );
        assert_eq!(
            pick_database_url(None, Some("sqlite://file.sqlite")),
            "sqlite://file.sqlite"
        );
        assert_eq!(pick_database_url(None, None), DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_ensure_database_dir_ignores_memory_urls() -> Result<()> {
        ensure_database_dir("sqlite::memory:")?;
        Ok(())
    }
}
