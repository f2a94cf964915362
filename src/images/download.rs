//! Downloading pose images to disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::models::Pose;

/// Downloads pose images over HTTP
pub struct ImageDownloader {
    client: reqwest::Client,
}

impl ImageDownloader {
    /// Create a downloader whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Download the pose's image into `dir` and return the written path.
    pub async fn download(&self, pose: &Pose, dir: &Path) -> Result<PathBuf> {
        if pose.image_url.is_empty() {
            anyhow::bail!("Pose {} has no image", pose.id);
        }

        tracing::debug!("Downloading image: {}", pose.image_url);

        let response = self
            .client
            .get(&pose.image_url)
            .send()
            .await
            .context("Failed to download image")?;

        if !response.status().is_success() {
            anyhow::bail!("Image download failed: HTTP {}", response.status());
        }

        let bytes = response.bytes().await.context("Failed to read image data")?;

        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let path = dir.join(image_file_name(pose, &bytes));
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }
}

/// File name for a pose's image: `pose-<id>.<ext>`.
///
/// The extension comes from the image bytes; unrecognized data falls back
/// to `jpg`. Characters outside `[A-Za-z0-9_-]` in the id become `_`.
pub fn image_file_name(pose: &Pose, bytes: &[u8]) -> String {
    let ext = image::guess_format(bytes)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("jpg");

    let id: String = pose
        .id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();

    format!("pose-{id}.{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    #[test]
    fn test_extension_from_bytes() {
        let pose = Pose::new("p1", "t", "d", "u", "couples");
        assert_eq!(image_file_name(&pose, PNG_MAGIC), "pose-p1.png");
        assert_eq!(image_file_name(&pose, b"not an image"), "pose-p1.jpg");
    }

    #[test]
    fn test_id_is_sanitized() {
        let pose = Pose::new("../etc/passwd", "t", "d", "u", "couples");
        assert_eq!(image_file_name(&pose, b""), "pose-___etc_passwd.jpg");
    }

    #[tokio::test]
    async fn test_pose_without_image() {
        let dir = tempfile::tempdir().unwrap();
        let pose = Pose::new("p1", "t", "d", "", "couples");
        let downloader = ImageDownloader::new(Duration::from_secs(1));
        assert!(downloader.download(&pose, dir.path()).await.is_err());
    }
}
