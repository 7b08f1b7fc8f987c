//! Entity module - SeaORM entity definitions for the on-device database.
//! The store only needs one table: a durable string-keyed map.

pub mod kv_entry;

pub use kv_entry::{Entity as KvEntry, Model as KvEntryModel};
