use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::features::categories::error::CategoryError;
use crate::features::categories::models::{Category, CategoryPatch, NewCategory};
use crate::features::categories::repositories::CategoryRepository;

const CATEGORY_COLUMNS: &str =
    "id, name, path, level, description, icon, color, is_active, created_at, updated_at";

/// Postgres-backed category repository
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map unique violations on `path` (PostgreSQL error code 23505) to a domain error
fn handle_insert_error(e: sqlx::Error, path: &str) -> CategoryError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            return CategoryError::DuplicatePath(path.to_string());
        }
    }
    tracing::error!("Failed to insert category: {:?}", e);
    CategoryError::Persistence(e)
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn insert(&self, category: NewCategory) -> Result<Category, CategoryError> {
        let query = format!(
            r#"
            INSERT INTO categories (id, name, path, level, description, icon, color)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(category.id)
            .bind(&category.name)
            .bind(&category.path)
            .bind(category.level)
            .bind(&category.description)
            .bind(&category.icon)
            .bind(&category.color)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| handle_insert_error(e, &category.path))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, CategoryError> {
        let query = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category by id: {:?}", e);
                CategoryError::Persistence(e)
            })?;

        Ok(category)
    }

    async fn find_by_path(&self, path: &str) -> Result<Option<Category>, CategoryError> {
        let query = format!("SELECT {} FROM categories WHERE path = $1", CATEGORY_COLUMNS);

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(path)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category by path: {:?}", e);
                CategoryError::Persistence(e)
            })?;

        Ok(category)
    }

    async fn list_sorted_by_path(
        &self,
        is_active: Option<bool>,
    ) -> Result<Vec<Category>, CategoryError> {
        // `path` is declared COLLATE "C", so this ordering is bytewise
        let query = format!(
            r#"
            SELECT {}
            FROM categories
            WHERE ($1::BOOLEAN IS NULL OR is_active = $1)
            ORDER BY path ASC
            "#,
            CATEGORY_COLUMNS
        );

        let categories = sqlx::query_as::<_, Category>(&query)
            .bind(is_active)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                CategoryError::Persistence(e)
            })?;

        Ok(categories)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, CategoryError> {
        let query = format!(
            r#"
            UPDATE categories
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                icon = COALESCE($3, icon),
                color = COALESCE($4, color),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $6
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(&patch.name)
            .bind(&patch.description)
            .bind(&patch.icon)
            .bind(&patch.color)
            .bind(patch.is_active)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update category: {:?}", e);
                CategoryError::Persistence(e)
            })?;

        Ok(category)
    }

    async fn delete_subtree(&self, path: &str) -> Result<u64, CategoryError> {
        // starts_with instead of LIKE: '_' is a LIKE wildcard and legal in labels
        let result = sqlx::query(
            r#"
            DELETE FROM categories
            WHERE path = $1 OR starts_with(path, $1 || '.')
            "#,
        )
        .bind(path)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete category subtree: {:?}", e);
            CategoryError::Persistence(e)
        })?;

        Ok(result.rows_affected())
    }

    async fn delete_all(&self) -> Result<u64, CategoryError> {
        let result = sqlx::query("DELETE FROM categories")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to clear categories: {:?}", e);
                CategoryError::Persistence(e)
            })?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIGRATION: &str =
        include_str!("../../../../migrations/20250301000000_create_categories.sql");

    fn new_category(path: &str) -> NewCategory {
        NewCategory {
            id: Uuid::now_v7(),
            name: path.rsplit('.').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            level: path.split('.').count() as i32,
            description: String::new(),
            icon: "folder".to_string(),
            color: "#3f51b5".to_string(),
        }
    }

    async fn seeded(pool: PgPool, paths: &[&str]) -> PgCategoryRepository {
        let repo = PgCategoryRepository::new(pool);
        for path in paths {
            repo.insert(new_category(path)).await.unwrap();
        }
        repo
    }

    #[test]
    fn test_path_column_is_bytewise_and_indexed_plainly() {
        assert!(MIGRATION.contains(r#"path TEXT COLLATE "C" NOT NULL"#));
        assert!(MIGRATION.contains("ON categories (path);"));
    }

    #[sqlx::test]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_list_orders_paths_bytewise(pool: PgPool) {
        let repo = seeded(pool, &["women", "men_shoes", "men", "men.footwear"]).await;

        let paths: Vec<String> = repo
            .list_sorted_by_path(None)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.path)
            .collect();
        assert_eq!(paths, vec!["men", "men.footwear", "men_shoes", "women"]);
    }

    #[sqlx::test]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_list_filters_on_active_flag(pool: PgPool) {
        let repo = seeded(pool, &["men", "women"]).await;
        let men = repo.find_by_path("men").await.unwrap().unwrap();
        let patch = CategoryPatch {
            is_active: Some(false),
            ..Default::default()
        };
        repo.update(men.id, &patch).await.unwrap();

        let active = repo.list_sorted_by_path(Some(true)).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].path, "women");
        assert_eq!(repo.list_sorted_by_path(None).await.unwrap().len(), 2);
    }

    #[sqlx::test]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_delete_subtree_spares_prefix_siblings(pool: PgPool) {
        let repo = seeded(
            pool,
            &["men", "men.footwear", "men.footwear.branded", "men_shoes", "menswear"],
        )
        .await;

        assert_eq!(repo.delete_subtree("men").await.unwrap(), 3);

        let remaining: Vec<String> = repo
            .list_sorted_by_path(None)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.path)
            .collect();
        assert_eq!(remaining, vec!["men_shoes", "menswear"]);
    }

    #[sqlx::test]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_duplicate_path_is_reported(pool: PgPool) {
        let repo = seeded(pool, &["men"]).await;

        let err = repo.insert(new_category("men")).await.unwrap_err();
        assert!(matches!(err, CategoryError::DuplicatePath(ref p) if p == "men"));
    }

    #[sqlx::test]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_update_keeps_unset_fields_and_bumps_timestamp(pool: PgPool) {
        let repo = seeded(pool, &["men"]).await;
        let before = repo.find_by_path("men").await.unwrap().unwrap();

        let patch = CategoryPatch {
            description: Some("Menswear".to_string()),
            ..Default::default()
        };
        let after = repo.update(before.id, &patch).await.unwrap().unwrap();

        assert_eq!(after.description, "Menswear");
        assert_eq!(after.name, before.name);
        assert_eq!(after.path, before.path);
        assert!(after.updated_at >= before.updated_at);
        assert!(repo.update(Uuid::now_v7(), &patch).await.unwrap().is_none());
    }
}
