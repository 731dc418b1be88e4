//! Persistence port for category records.

use async_trait::async_trait;
use uuid::Uuid;

use crate::features::categories::error::CategoryError;
use crate::features::categories::models::{Category, CategoryPatch, NewCategory};

/// Storage operations the category service relies on.
///
/// Implementations must order listings by `path` ascending using bytewise
/// comparison, and treat `path` as unique.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Persist a new record and return it with store-maintained timestamps.
    ///
    /// Fails with [`CategoryError::DuplicatePath`] if the path is taken.
    async fn insert(&self, category: NewCategory) -> Result<Category, CategoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, CategoryError>;

    async fn find_by_path(&self, path: &str) -> Result<Option<Category>, CategoryError>;

    /// All records, optionally restricted to one `is_active` value, sorted by path.
    async fn list_sorted_by_path(
        &self,
        is_active: Option<bool>,
    ) -> Result<Vec<Category>, CategoryError>;

    /// Apply `patch` and refresh `updated_at`; `None` if the id is unknown.
    async fn update(
        &self,
        id: Uuid,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, CategoryError>;

    /// Remove the record at `path` and every record beneath it.
    async fn delete_subtree(&self, path: &str) -> Result<u64, CategoryError>;

    async fn delete_all(&self) -> Result<u64, CategoryError>;
}
