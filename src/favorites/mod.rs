//! Favorites: the user's locally saved poses
//!
//! [`FavoritesStore`] owns the in-memory favorites list and mirrors it to a
//! [`KeyValueStore`](crate::storage::KeyValueStore) as one JSON snapshot.
//! Toggles are applied optimistically, persisted, and rolled back to the
//! durable state when the write fails.
//!
//! ```text
//!  toggle_favorite(pose)
//!        │
//!        ▼
//!  plan (add/remove) ──► publish new list ──► storage.set(snapshot)
//!                          (Updating)              │
//!                                       ┌──────────┴──────────┐
//!                                       ▼                     ▼
//!                                   Committed          reload durable list
//!                                                         (RolledBack)
//! ```

mod snapshot;
mod store;
mod toggle;

pub use snapshot::{decode, encode};
pub use store::{FavoritesError, FavoritesState, FavoritesStore, LoadPhase};
pub use toggle::{ToggleAction, TogglePhase, TogglePlan};

/// Storage key the favorites snapshot lives under by default
pub const DEFAULT_STORAGE_KEY: &str = "@posestudio:favorites";
