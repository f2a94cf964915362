//! Offline demo data
//!
//! A small built-in pose catalog so the CLI works without a Supabase
//! project (`posestudio --demo ...`).

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::api::{FetchError, PoseSource, require};
use crate::models::Pose;

/// In-process [`PoseSource`] over a fixed set of poses
#[derive(Debug, Clone, Default)]
pub struct DemoSource {
    poses: Vec<(DateTime<Utc>, Pose)>,
}

impl DemoSource {
    /// Build a source from poses, treating later entries as newer
    pub fn from_poses(poses: impl IntoIterator<Item = Pose>) -> Self {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default();
        let poses = poses
            .into_iter()
            .enumerate()
            .map(|(i, pose)| (base + Duration::minutes(i as i64), pose))
            .collect();
        Self { poses }
    }

    /// The bundled sample catalog
    pub fn sample() -> Self {
        const SAMPLES: &[(&str, &str, &str, &str, &str)] = &[
            (
                "demo-ws-1",
                "Over the Shoulder",
                "Turn your back to the camera and look over your shoulder with a soft smile.",
                "https://images.pexels.com/photos/3785079/pexels-photo-3785079.jpeg",
                "women-solo",
            ),
            (
                "demo-ws-2",
                "Walking Candid",
                "Walk slowly towards the camera and glance away mid-step for a natural look.",
                "https://images.pexels.com/photos/1036623/pexels-photo-1036623.jpeg",
                "women-solo",
            ),
            (
                "demo-ms-1",
                "Lean Back",
                "Lean against a wall with one foot crossed and hands in pockets.",
                "https://images.pexels.com/photos/3785104/pexels-photo-3785104.jpeg",
                "men-solo",
            ),
            (
                "demo-c-1",
                "Forehead Touch",
                "Stand close, touch foreheads and close your eyes.",
                "https://images.pexels.com/photos/1024993/pexels-photo-1024993.jpeg",
                "couples",
            ),
            (
                "demo-c-2",
                "Piggyback",
                "One partner carries the other on their back, both laughing.",
                "https://images.pexels.com/photos/1024960/pexels-photo-1024960.jpeg",
                "couples",
            ),
            (
                "demo-kf-1",
                "Swing Between",
                "Parents hold the child's hands and swing them between them.",
                "https://images.pexels.com/photos/1416736/pexels-photo-1416736.jpeg",
                "kids-family",
            ),
            (
                "demo-pd-1",
                "Eye Level",
                "Get down to the dog's eye level and hold a treat just above the lens.",
                "https://images.pexels.com/photos/1108099/pexels-photo-1108099.jpeg",
                "pets-dogs",
            ),
            (
                "demo-pc-1",
                "Window Light",
                "Let the cat rest on a windowsill and shoot with the light behind you.",
                "https://images.pexels.com/photos/2558605/pexels-photo-2558605.jpeg",
                "pets-cats",
            ),
            (
                "demo-pp-1",
                "Crossed Arms",
                "Stand at a slight angle with arms loosely crossed and chin forward.",
                "https://images.pexels.com/photos/2379004/pexels-photo-2379004.jpeg",
                "professional-portrait",
            ),
        ];

        Self::from_poses(SAMPLES.iter().map(|(id, title, description, image_url, category)| {
            Pose::new(*id, *title, *description, *image_url, *category)
        }))
    }
}

impl PoseSource for DemoSource {
    async fn fetch_by_category(&self, category: &str) -> Result<Vec<Pose>, FetchError> {
        require(category, "Category is required")?;

        let mut matching: Vec<_> = self
            .poses
            .iter()
            .filter(|(_, pose)| pose.category == category)
            .collect();
        matching.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(matching.into_iter().map(|(_, pose)| pose.clone()).collect())
    }

    async fn fetch_by_id(&self, id: &str, category: &str) -> Result<Option<Pose>, FetchError> {
        require(id, "Pose ID and category are required")?;
        require(category, "Pose ID and category are required")?;

        Ok(self
            .poses
            .iter()
            .map(|(_, pose)| pose)
            .find(|pose| pose.id == id && pose.category == category)
            .cloned())
    }

    async fn count_by_category(&self, category: &str) -> Result<usize, FetchError> {
        require(category, "Category is required")?;
        Ok(self
            .poses
            .iter()
            .filter(|(_, pose)| pose.category == category)
            .count())
    }
}
