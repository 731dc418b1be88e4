use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::features::categories::error::CategoryError;
use crate::features::categories::models::{Category, CategoryPatch, NewCategory};
use crate::features::categories::path_label::is_within_subtree;
use crate::features::categories::repositories::CategoryRepository;

/// In-process repository with the same ordering and uniqueness rules as Postgres
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    records: RwLock<HashMap<Uuid, Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record as-is, bypassing path checks (for orphan scenarios)
    pub async fn put_raw(&self, category: Category) {
        self.records.write().await.insert(category.id, category);
    }
}

fn apply_patch(category: &mut Category, patch: &CategoryPatch) {
    if let Some(name) = &patch.name {
        category.name = name.clone();
    }
    if let Some(description) = &patch.description {
        category.description = description.clone();
    }
    if let Some(icon) = &patch.icon {
        category.icon = icon.clone();
    }
    if let Some(color) = &patch.color {
        category.color = color.clone();
    }
    if let Some(is_active) = patch.is_active {
        category.is_active = is_active;
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn insert(&self, category: NewCategory) -> Result<Category, CategoryError> {
        let mut records = self.records.write().await;
        if records.values().any(|c| c.path == category.path) {
            return Err(CategoryError::DuplicatePath(category.path));
        }

        let now = Utc::now();
        let stored = Category {
            id: category.id,
            name: category.name,
            path: category.path,
            level: category.level,
            description: category.description,
            icon: category.icon,
            color: category.color,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        records.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, CategoryError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn find_by_path(&self, path: &str) -> Result<Option<Category>, CategoryError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|c| c.path == path)
            .cloned())
    }

    async fn list_sorted_by_path(
        &self,
        is_active: Option<bool>,
    ) -> Result<Vec<Category>, CategoryError> {
        let mut categories: Vec<Category> = self
            .records
            .read()
            .await
            .values()
            .filter(|c| is_active.map_or(true, |active| c.is_active == active))
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(categories)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, CategoryError> {
        let mut records = self.records.write().await;
        Ok(records.get_mut(&id).map(|category| {
            apply_patch(category, patch);
            category.updated_at = Utc::now();
            category.clone()
        }))
    }

    async fn delete_subtree(&self, path: &str) -> Result<u64, CategoryError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, c| !is_within_subtree(&c.path, path));
        Ok((before - records.len()) as u64)
    }

    async fn delete_all(&self) -> Result<u64, CategoryError> {
        let mut records = self.records.write().await;
        let removed = records.len() as u64;
        records.clear();
        Ok(removed)
    }
}
