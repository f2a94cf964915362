//! JSON encoding of the favorites snapshot
//!
//! Records carry `isFavorite: true` so snapshots stay readable by older
//! clients; the flag is ignored when reading.

use serde::{Deserialize, Serialize};

use crate::models::Pose;
use crate::storage::StorageError;

#[derive(Serialize)]
struct StoredPoseRef<'a> {
    #[serde(flatten)]
    pose: &'a Pose,
    #[serde(rename = "isFavorite")]
    is_favorite: bool,
}

#[derive(Deserialize)]
struct StoredPose {
    #[serde(flatten)]
    pose: Pose,
}

/// Serialize a favorites list for storage
pub fn encode(items: &[Pose]) -> Result<String, StorageError> {
    let records: Vec<StoredPoseRef<'_>> = items
        .iter()
        .map(|pose| StoredPoseRef {
            pose,
            is_favorite: true,
        })
        .collect();
    serde_json::to_string(&records).map_err(StorageError::Encode)
}

/// Deserialize a stored favorites list
pub fn decode(raw: &str) -> Result<Vec<Pose>, StorageError> {
    let records: Vec<StoredPose> = serde_json::from_str(raw).map_err(StorageError::Corrupt)?;
    Ok(records.into_iter().map(|r| r.pose).collect())
}
