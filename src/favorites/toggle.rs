//! Toggle planning and the toggle state machine

use crate::models::Pose;

/// What a toggle does to the favorites list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// The pose was prepended to the list
    Added,
    /// The pose was removed from the list
    Removed,
}

/// Progress of the most recent toggle.
///
/// `Idle → Updating → Committed | RolledBack`; a finished phase goes back to
/// `Updating` when the next toggle starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TogglePhase {
    /// No toggle has run yet
    #[default]
    Idle,
    /// The new list is published but not yet durable
    Updating(ToggleAction),
    /// The new list was persisted
    Committed(ToggleAction),
    /// Persisting failed and the durable list was restored
    RolledBack(ToggleAction),
}

impl TogglePhase {
    /// Start a toggle
    pub const fn begin(action: ToggleAction) -> Self {
        Self::Updating(action)
    }

    /// The write succeeded. Only meaningful while `Updating`.
    pub const fn commit(self) -> Self {
        match self {
            Self::Updating(action) => Self::Committed(action),
            other => other,
        }
    }

    /// The write failed and memory was reconciled. Only meaningful while `Updating`.
    pub const fn roll_back(self) -> Self {
        match self {
            Self::Updating(action) => Self::RolledBack(action),
            other => other,
        }
    }
}

/// The list before and after toggling one pose
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TogglePlan {
    /// Whether the pose is being added or removed
    pub action: ToggleAction,
    /// Id of the toggled pose
    pub pose_id: String,
    /// The list the plan was computed from
    pub previous: Vec<Pose>,
    /// The list to publish and persist
    pub next: Vec<Pose>,
}

impl TogglePlan {
    /// Compute the toggle of `pose` against `current`.
    ///
    /// Present ids are removed; absent poses are prepended, so the list stays
    /// most-recent-first with no duplicate ids.
    pub fn new(current: &[Pose], pose: &Pose) -> Self {
        let present = current.iter().any(|fav| fav.id == pose.id);

        let (action, next) = if present {
            let next = current
                .iter()
                .filter(|fav| fav.id != pose.id)
                .cloned()
                .collect();
            (ToggleAction::Removed, next)
        } else {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.push(pose.clone());
            next.extend_from_slice(current);
            (ToggleAction::Added, next)
        };

        Self {
            action,
            pose_id: pose.id.clone(),
            previous: current.to_vec(),
            next,
        }
    }
}
