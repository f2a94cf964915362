//! # PoseStudio 📸
//!
//! Browse categorized photo poses and keep your favorites, from the terminal.
//!
//! ## Overview
//!
//! PoseStudio reads a remote `poses` table (Supabase) organised into a fixed
//! set of categories, shows pose details, downloads pose images, and keeps
//! a local list of favorite poses that survives restarts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CLI (main.rs)                          │
//! │   Parses commands, owns the favorites store and the source  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │    Favorites    │ │     Catalog     │ │     Images      │
//! │                 │ │                 │ │                 │
//! │ • Toggle        │ │ • Categories    │ │ • Download      │
//! │ • Rollback      │ │ • Pose lists    │ │                 │
//! │ • Observable    │ │ • Pose details  │ │                 │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!          │                   │
//!          ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Storage     │ │       API       │ │     Models      │
//! │                 │ │                 │ │                 │
//! │ • SQLite        │ │ • Supabase      │ │ • Pose          │
//! │ • In-memory     │ │ • Demo data     │ │ • Category      │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] — Remote pose sources (Supabase, demo)
//! - [`catalog`] — Category grid, pose listings, detail lookup
//! - [`config`] — Configuration management
//! - [`favorites`] — Favorites store with optimistic updates
//! - [`images`] — Image downloads
//! - [`models`] — Data models (Pose, Category)
//! - [`storage`] — Durable key-value storage
//!
//! ## Example
//!
//! ```no_run
//! use posestudio::favorites::{DEFAULT_STORAGE_KEY, FavoritesStore};
//! use posestudio::storage::SqliteStore;
//! use posestudio::Pose;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let favorites = FavoritesStore::open(SqliteStore::open()?, DEFAULT_STORAGE_KEY).await;
//! let pose = Pose::new("p1", "Lean Back", "Lean on a wall", "https://example.com/p1.jpg", "men-solo");
//! favorites.toggle_favorite(&pose).await?;
//! assert!(favorites.is_favorite("p1"));
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/posestudio/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::use_self)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::future_not_send)]

pub mod api;
pub mod catalog;
pub mod config;
pub mod demo;
pub mod favorites;
pub mod images;
pub mod models;
pub mod paths;
pub mod storage;

// Re-export main types for convenience
pub use api::{FetchError, PoseSource, Source};
pub use config::Config;
pub use favorites::{FavoritesError, FavoritesState, FavoritesStore};
pub use models::{Category, CategorySummary, Pose};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
