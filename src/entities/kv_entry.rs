//! Key-value entity - Backs the durable store with a single table.
//!
//! Each row maps one stable key (`startup_ideas`, `user_votes`, `dark_mode`)
//! to its JSON-encoded snapshot. Writes replace the whole value.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Key-value database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kv_entries")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Storage key (e.g., `"startup_ideas"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Serialized value
    pub value: String,
    /// When this key was last written
    pub updated_at: DateTime,
}

/// `KvEntry` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
