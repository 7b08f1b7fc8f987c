//! Core business logic - framework-agnostic idea evaluation, storage-backed
//! state and the views derived from it.

/// Synthetic rating and feedback for new ideas
pub mod evaluation;
/// Unique, increasing idea ids
pub mod ids;
/// Sorted listings, leaderboards and aggregate stats
pub mod ranking;
/// Share-sheet and clipboard hand-off
pub mod share;
/// The single owner of application state
pub mod store;
/// Light and dark palettes
pub mod theme;

pub use store::{HydrationReport, IdeaStore, KeyLoad, StoreEvent, StoreOptions, VoteOutcome};
