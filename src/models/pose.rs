//! Pose model (a single content record in the gallery)

use serde::{Deserialize, Serialize};

use super::Category;

/// A photo pose: one image plus its metadata, filed under one category.
///
/// Favorite membership is not stored on the pose itself; ask
/// [`FavoritesStore::is_favorite`](crate::favorites::FavoritesStore::is_favorite).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    /// Identifier, unique within the remote content set
    pub id: String,
    /// Short title
    pub title: String,
    /// Longer description shown on the detail view
    pub description: String,
    /// Image URI
    pub image_url: String,
    /// Category id (see [`Category::id`])
    pub category: String,
}

impl Pose {
    /// Create a pose from its parts
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            image_url: image_url.into(),
            category: category.into(),
        }
    }

    /// The known category this pose is filed under, if any
    pub fn category(&self) -> Option<Category> {
        Category::from_id(&self.category)
    }

    /// Whether every displayable field is filled in.
    ///
    /// Detail views can render a complete pose without going back to the
    /// remote table.
    pub fn is_complete(&self) -> bool {
        !self.id.is_empty()
            && !self.category.is_empty()
            && !self.title.is_empty()
            && !self.description.is_empty()
            && !self.image_url.is_empty()
    }

    /// Get a short preview of the description (for list display)
    pub fn preview(&self, max_chars: usize) -> String {
        let text = self.description.replace('\n', " ");
        if text.chars().count() <= max_chars {
            text
        } else {
            let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
            format!("{cut}...")
        }
    }
}
