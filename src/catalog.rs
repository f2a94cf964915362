//! Browsing: category grid, per-category pose lists and pose details
//!
//! These wrap a [`PoseSource`] with the `{data, loading, error}` shape the
//! views render from. Nothing is cached; every `load` goes back to the
//! source.

use crate::api::{FetchError, PoseSource};
use crate::models::{Category, CategorySummary, Pose};

/// Poses of one category, reloadable on demand
#[derive(Debug, Clone, Default)]
pub struct PoseListing {
    category: String,
    /// Poses from the last successful load, newest first
    pub poses: Vec<Pose>,
    /// A load is in progress
    pub loading: bool,
    /// Message for the last failed load
    pub error: Option<String>,
}

impl PoseListing {
    /// Create an empty listing for a category id
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Self::default()
        }
    }

    /// The category id this listing shows
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Fetch the category's poses.
    ///
    /// A missing `poses` table is treated as an empty category. Other
    /// failures set `error` and keep the previously loaded poses.
    pub async fn load<S: PoseSource>(&mut self, source: &S) {
        if self.category.trim().is_empty() {
            self.loading = false;
            self.error = Some("Category not specified".to_string());
            return;
        }

        self.loading = true;
        self.error = None;

        match source.fetch_by_category(&self.category).await {
            Ok(poses) => self.poses = poses,
            Err(FetchError::SchemaMissing { code }) => {
                tracing::warn!("Poses table not found ({code}), showing empty category");
                self.poses.clear();
            }
            Err(e) => {
                tracing::error!("Error loading poses for {}: {e}", self.category);
                self.error = Some(e.to_string());
            }
        }

        self.loading = false;
    }

    /// Reload from the source
    pub async fn refresh<S: PoseSource>(&mut self, source: &S) {
        self.load(source).await;
    }
}

/// Every category with its current pose count.
///
/// Counts that cannot be fetched are reported as 0.
pub async fn fetch_categories_with_counts<S: PoseSource>(source: &S) -> Vec<CategorySummary> {
    let mut summaries = Vec::with_capacity(Category::all().len());

    for &category in Category::all() {
        let count = match source.count_by_category(category.id()).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("Error fetching count for category {}: {e}", category.id());
                0
            }
        };
        summaries.push(CategorySummary { category, count });
    }

    summaries
}

/// The category grid, reloadable on demand
#[derive(Debug, Clone, Default)]
pub struct CategoryListing {
    /// Categories with counts, in display order
    pub categories: Vec<CategorySummary>,
    /// A load is in progress
    pub loading: bool,
}

impl CategoryListing {
    /// Fetch counts for every category
    pub async fn load<S: PoseSource>(&mut self, source: &S) {
        self.loading = true;
        self.categories = fetch_categories_with_counts(source).await;
        self.loading = false;
    }

    /// Total poses across all categories
    pub fn total(&self) -> usize {
        self.categories.iter().map(|c| c.count).sum()
    }
}

/// Resolve the pose to show on a detail view.
///
/// `inline` is data the caller already holds (e.g. from the list it came
/// from); it is used as-is when complete and matching `id`. Otherwise the
/// pose is fetched by id and category.
pub async fn resolve_pose<S: PoseSource>(
    source: &S,
    id: &str,
    category: &str,
    inline: Option<Pose>,
) -> Result<Pose, FetchError> {
    if id.trim().is_empty() || category.trim().is_empty() {
        return Err(FetchError::InvalidArgument("Pose ID and category are required"));
    }

    if let Some(pose) = inline.filter(|p| p.id == id && p.is_complete()) {
        return Ok(pose);
    }

    match source.fetch_by_id(id, category).await {
        Ok(Some(pose)) => Ok(pose),
        Ok(None) | Err(FetchError::SchemaMissing { .. }) => {
            Err(FetchError::NotFound("Pose not found".to_string()))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DemoSource;
    use crate::favorites::{DEFAULT_STORAGE_KEY, FavoritesStore, ToggleAction, decode, encode};
    use crate::storage::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source whose every call fails with the configured error
    struct FailingSource {
        schema_missing: bool,
        calls: AtomicUsize,
    }

    impl FailingSource {
        fn new(schema_missing: bool) -> Self {
            Self {
                schema_missing,
                calls: AtomicUsize::new(0),
            }
        }

        fn error(&self) -> FetchError {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.schema_missing {
                FetchError::SchemaMissing {
                    code: "42P01".to_string(),
                }
            } else {
                FetchError::Api {
                    status: 500,
                    message: "boom".to_string(),
                }
            }
        }
    }

    impl PoseSource for FailingSource {
        async fn fetch_by_category(&self, _category: &str) -> Result<Vec<Pose>, FetchError> {
            Err(self.error())
        }

        async fn fetch_by_id(&self, _id: &str, _category: &str) -> Result<Option<Pose>, FetchError> {
            Err(self.error())
        }

        async fn count_by_category(&self, _category: &str) -> Result<usize, FetchError> {
            Err(self.error())
        }
    }

    #[tokio::test]
    async fn test_listing_loads_category() {
        let mut listing = PoseListing::new("couples");
        listing.load(&DemoSource::sample()).await;
        assert!(!listing.loading);
        assert_eq!(listing.error, None);
        assert_eq!(listing.poses.len(), 2);
        assert!(listing.poses.iter().all(|p| p.category == "couples"));
    }

    #[tokio::test]
    async fn test_listing_without_category() {
        let mut listing = PoseListing::new("");
        listing.load(&DemoSource::sample()).await;
        assert_eq!(listing.error.as_deref(), Some("Category not specified"));
        assert!(!listing.loading);
    }

    #[tokio::test]
    async fn test_listing_schema_missing_is_empty() {
        let mut listing = PoseListing::new("couples");
        listing.load(&FailingSource::new(true)).await;
        assert!(listing.poses.is_empty());
        assert_eq!(listing.error, None);
    }

    #[tokio::test]
    async fn test_listing_failure_keeps_previous_poses() {
        let mut listing = PoseListing::new("couples");
        listing.load(&DemoSource::sample()).await;
        listing.refresh(&FailingSource::new(false)).await;
        assert_eq!(listing.poses.len(), 2);
        assert_eq!(listing.error.as_deref(), Some("server error 500: boom"));
        assert!(!listing.loading);
    }

    #[tokio::test]
    async fn test_category_counts() {
        let mut listing = CategoryListing::default();
        listing.load(&DemoSource::sample()).await;
        assert_eq!(listing.categories.len(), Category::all().len());
        assert_eq!(listing.total(), 9);

        let couples = listing
            .categories
            .iter()
            .find(|c| c.category == Category::Couples)
            .unwrap();
        assert_eq!(couples.count, 2);
    }

    #[tokio::test]
    async fn test_category_counts_degrade_to_zero() {
        let source = FailingSource::new(false);
        let summaries = fetch_categories_with_counts(&source).await;
        assert_eq!(summaries.len(), Category::all().len());
        assert!(summaries.iter().all(|s| s.count == 0));
        assert_eq!(source.calls.load(Ordering::SeqCst), Category::all().len());
    }

    #[tokio::test]
    async fn test_resolve_prefers_inline_data() {
        let source = FailingSource::new(false);
        let inline = Pose::new("p1", "Pose1", "desc", "https://img/1.jpg", "couples");

        let pose = resolve_pose(&source, "p1", "couples", Some(inline.clone()))
            .await
            .unwrap();

        assert_eq!(pose, inline);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_stored_favorite_can_be_removed_while_source_is_down() {
        let stored = Pose::new("a", "Pose a", "desc", "https://img/a.jpg", "couples");
        let raw = encode(&[stored.clone()]).unwrap();
        let backend = MemoryStore::with_entry(DEFAULT_STORAGE_KEY, &raw);
        let favorites = FavoritesStore::open(backend.clone(), DEFAULT_STORAGE_KEY).await;
        let source = FailingSource::new(false);

        let pose = resolve_pose(&source, "a", "couples", favorites.get("a"))
            .await
            .unwrap();
        let action = favorites.toggle_favorite(&pose).await.unwrap();

        assert_eq!(action, ToggleAction::Removed);
        assert!(favorites.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        let saved = backend.value(DEFAULT_STORAGE_KEY).unwrap();
        assert!(decode(&saved).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_fetches_incomplete_inline_data() {
        let inline = Pose::new("demo-c-1", "", "", "", "couples");
        let pose = resolve_pose(&DemoSource::sample(), "demo-c-1", "couples", Some(inline))
            .await
            .unwrap();
        assert_eq!(pose.title, "Forehead Touch");
    }

    #[tokio::test]
    async fn test_resolve_missing_pose() {
        let err = resolve_pose(&DemoSource::sample(), "nope", "couples", None)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::NotFound(_)));

        let err = resolve_pose(&FailingSource::new(true), "p1", "couples", None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Pose not found");
    }
}
