use std::sync::Arc;

use uuid::Uuid;

use crate::features::categories::error::CategoryError;
use crate::features::categories::models::{Category, CategoryPatch, NewCategory};
use crate::features::categories::path_label::{child_path, generate_label};
use crate::features::categories::repositories::CategoryRepository;
use crate::features::categories::tree::{build_tree, CategoryForest};
use crate::shared::constants::{DEFAULT_CATEGORY_COLOR, DEFAULT_CATEGORY_ICON};
use crate::shared::validation::PATH_LABEL_REGEX;

pub type Result<T> = std::result::Result<T, CategoryError>;

/// Input for creating a category; text fields are expected to be trimmed
#[derive(Debug, Clone, Default)]
pub struct CreateCategory {
    pub name: String,
    pub parent_path: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// Outcome of a cascading delete
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOutcome {
    pub deleted_count: u64,
    pub message: String,
}

/// Service for category operations
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// Create a root category, or a child when `parent_path` is given.
    ///
    /// The path label is derived from the name once; renaming later does not
    /// move the category.
    pub async fn create(&self, input: CreateCategory) -> Result<Category> {
        let label = generate_label(&input.name);
        if !PATH_LABEL_REGEX.is_match(&label) {
            return Err(CategoryError::EmptyLabel);
        }

        let (path, level) = match input.parent_path.as_deref() {
            Some(parent_path) => {
                let parent = self
                    .repository
                    .find_by_path(parent_path)
                    .await?
                    .ok_or(CategoryError::ParentNotFound)?;
                (child_path(Some(&parent.path), &label), parent.level + 1)
            }
            None => (child_path(None, &label), 1),
        };

        let category = self
            .repository
            .insert(NewCategory {
                id: Uuid::now_v7(),
                name: input.name,
                path,
                level,
                description: input.description.unwrap_or_default(),
                icon: input
                    .icon
                    .unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_string()),
                color: input
                    .color
                    .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
            })
            .await?;

        tracing::info!(
            category_id = %category.id,
            path = %category.path,
            "Category created"
        );
        Ok(category)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        self.repository.find_by_id(id).await
    }

    /// Build the hierarchy from current records.
    ///
    /// Only active categories are included unless `is_active` is given.
    pub async fn get_all_tree(&self, is_active: Option<bool>) -> Result<CategoryForest> {
        let filter = Some(is_active.unwrap_or(true));
        let records = self.repository.list_sorted_by_path(filter).await?;
        let forest = build_tree(records);
        tracing::debug!(
            node_count = forest.node_count(),
            root_count = forest.roots.len(),
            "Category tree built"
        );

        if !forest.orphans.is_empty() {
            tracing::warn!(
                orphan_count = forest.orphans.len(),
                "Categories without a matching parent in the result set"
            );
        }
        Ok(forest)
    }

    /// Overwrite the supplied fields; `path` and `level` never change.
    pub async fn update(&self, id: Uuid, patch: CategoryPatch) -> Result<Category> {
        self.repository
            .update(id, &patch)
            .await?
            .ok_or(CategoryError::NotFound)
    }

    /// Delete a category together with its whole subtree
    pub async fn delete(&self, id: Uuid) -> Result<DeleteOutcome> {
        let category = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound)?;

        let deleted_count = self.repository.delete_subtree(&category.path).await?;
        tracing::info!(
            category_id = %id,
            path = %category.path,
            deleted_count,
            "Category subtree deleted"
        );

        Ok(DeleteOutcome {
            deleted_count,
            message: format!(
                "Category and {} subcategories deleted successfully",
                deleted_count.saturating_sub(1)
            ),
        })
    }

    /// Remove every category (used before seeding)
    pub async fn clear(&self) -> Result<u64> {
        self.repository.delete_all().await
    }
}
