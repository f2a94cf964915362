//! The favorites store

use thiserror::Error;
use tokio::sync::{Mutex, watch};

use super::snapshot::{decode, encode};
use super::toggle::{ToggleAction, TogglePhase, TogglePlan};
use crate::models::Pose;
use crate::storage::{KeyValueStore, StorageError};

/// Errors returned by [`FavoritesStore`] operations
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// Reading or writing the durable snapshot failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The pose cannot be favorited as given
    #[error("invalid pose: {0}")]
    Validation(String),
}

/// Whether the store has read its durable snapshot yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// Constructed, nothing read yet
    #[default]
    Uninitialized,
    /// At least one load has finished (successfully or not)
    Ready,
}

/// Observable state of the favorites store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesState {
    /// Favorited poses, most recently favorited first
    pub items: Vec<Pose>,
    /// A load from storage is in progress
    pub loading: bool,
    /// Human-readable message for the last failure, cleared by the next operation
    pub error: Option<String>,
    /// Load lifecycle
    pub phase: LoadPhase,
    /// Progress of the most recent toggle
    pub toggle: TogglePhase,
}

impl FavoritesState {
    /// Whether a pose with this id is in the list
    pub fn is_favorite(&self, pose_id: &str) -> bool {
        self.items.iter().any(|fav| fav.id == pose_id)
    }
}

/// Owns the favorites list and keeps it in step with durable storage.
///
/// Construct once with [`FavoritesStore::open`] and hand an `Arc` of it to
/// every consumer. Toggles and reloads run one at a time, so durable writes
/// land in the same order as the in-memory updates they persist.
pub struct FavoritesStore<S> {
    storage: S,
    key: String,
    state: watch::Sender<FavoritesState>,
    gate: Mutex<()>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Create an uninitialized store. Call [`Self::initialize_or_reload`] before use.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            state: watch::Sender::new(FavoritesState::default()),
            gate: Mutex::new(()),
        }
    }

    /// Create a store and load the durable snapshot.
    ///
    /// A failed load does not fail construction; it shows up in
    /// [`FavoritesState::error`] with an empty list.
    pub async fn open(storage: S, key: impl Into<String>) -> Self {
        let store = Self::new(storage, key);
        store.refresh().await;
        store
    }

    /// Replace the in-memory list with the durable snapshot.
    ///
    /// On failure the previous list is kept and the error slot is set.
    pub async fn initialize_or_reload(&self) -> Result<(), StorageError> {
        let _gate = self.gate.lock().await;
        self.reload(true).await
    }

    /// Resynchronize with storage, reporting failures through the error slot only
    pub async fn refresh(&self) {
        if let Err(e) = self.initialize_or_reload().await {
            tracing::debug!("Favorites refresh failed: {e}");
        }
    }

    /// Add the pose if absent, remove it if present.
    ///
    /// The new list is published before it is persisted. If persisting
    /// fails, the list is reloaded from storage (or, if that also fails,
    /// restored to what it was before this call), the error slot is set and
    /// the error is returned.
    pub async fn toggle_favorite(&self, pose: &Pose) -> Result<ToggleAction, FavoritesError> {
        if pose.id.trim().is_empty() {
            return Err(FavoritesError::Validation("pose id is empty".to_string()));
        }

        let _gate = self.gate.lock().await;

        let plan = TogglePlan::new(&self.state.borrow().items, pose);
        let action = plan.action;

        self.state.send_modify(|s| {
            s.error = None;
            s.items = plan.next.clone();
            s.toggle = TogglePhase::begin(action);
        });

        let written = match encode(&plan.next) {
            Ok(raw) => self.storage.set(&self.key, &raw).await,
            Err(e) => Err(e),
        };

        match written {
            Ok(()) => {
                tracing::debug!("Favorite {} {:?}, {} saved", plan.pose_id, action, plan.next.len());
                self.state.send_modify(|s| s.toggle = s.toggle.commit());
                Ok(action)
            }
            Err(err) => {
                tracing::warn!("Failed to save favorite {}, rolling back: {err}", plan.pose_id);
                let message = format!("Failed to update favorite: {err}");
                self.state.send_modify(|s| s.error = Some(message.clone()));

                if let Err(reload_err) = self.reload(false).await {
                    tracing::warn!("Reload after failed save also failed: {reload_err}");
                    let previous = plan.previous;
                    self.state.send_modify(|s| s.items = previous);
                }

                self.state.send_modify(|s| {
                    s.error = Some(message);
                    s.toggle = s.toggle.roll_back();
                });
                Err(err.into())
            }
        }
    }

    /// Whether a pose with this id is currently favorited
    pub fn is_favorite(&self, pose_id: &str) -> bool {
        self.state.borrow().is_favorite(pose_id)
    }

    /// The stored copy of a favorited pose
    pub fn get(&self, pose_id: &str) -> Option<Pose> {
        self.state
            .borrow()
            .items
            .iter()
            .find(|fav| fav.id == pose_id)
            .cloned()
    }

    /// Copy of the current favorites list
    pub fn items(&self) -> Vec<Pose> {
        self.state.borrow().items.clone()
    }

    /// Number of favorites
    pub fn len(&self) -> usize {
        self.state.borrow().items.len()
    }

    /// Whether there are no favorites
    pub fn is_empty(&self) -> bool {
        self.state.borrow().items.is_empty()
    }

    /// Copy of the full observable state
    pub fn snapshot(&self) -> FavoritesState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<FavoritesState> {
        self.state.subscribe()
    }

    /// Key the snapshot is stored under
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// The underlying durable store
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the snapshot into state. Caller must hold the gate.
    async fn reload(&self, clear_error: bool) -> Result<(), StorageError> {
        self.state.send_modify(|s| {
            s.loading = true;
            if clear_error {
                s.error = None;
            }
        });

        match self.read_snapshot().await {
            Ok(items) => {
                tracing::debug!("Loaded {} favorites", items.len());
                self.state.send_modify(|s| {
                    s.items = items;
                    s.loading = false;
                    s.phase = LoadPhase::Ready;
                });
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load favorites: {e}");
                let message = format!("Failed to load favorites: {e}");
                self.state.send_modify(|s| {
                    s.error = Some(message);
                    s.loading = false;
                    s.phase = LoadPhase::Ready;
                });
                Err(e)
            }
        }
    }

    async fn read_snapshot(&self) -> Result<Vec<Pose>, StorageError> {
        match self.storage.get(&self.key).await? {
            Some(raw) => decode(&raw),
            None => Ok(Vec::new()),
        }
    }
}
