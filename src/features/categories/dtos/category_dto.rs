use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::{Category, CategoryPatch};
use crate::features::categories::tree::CategoryNode;

/// Query params for listing categories
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListCategoriesQuery {
    /// Filter by active status. Defaults to active categories only.
    pub is_active: Option<bool>,
}

/// Create request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    /// Display name; required
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    /// Materialized path of the parent; omit for a root category
    #[schema(example = "women.clothing")]
    pub parent_path: Option<String>,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    #[validate(length(max = 50))]
    pub icon: Option<String>,

    #[validate(length(max = 32))]
    pub color: Option<String>,
}

impl CreateCategoryDto {
    /// Trim text fields; a blank parent path means "root"
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(|s| s.trim().to_string()),
            parent_path: self
                .parent_path
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            description: self.description.map(|s| s.trim().to_string()),
            icon: self.icon,
            color: self.color,
        }
    }
}

/// Update request; every field is optional but at least one is required
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    #[validate(length(max = 50))]
    pub icon: Option<String>,

    #[validate(length(max = 32))]
    pub color: Option<String>,

    pub is_active: Option<bool>,
}

impl UpdateCategoryDto {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(|s| s.trim().to_string()),
            description: self.description.map(|s| s.trim().to_string()),
            ..self
        }
    }
}

impl From<UpdateCategoryDto> for CategoryPatch {
    fn from(dto: UpdateCategoryDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            icon: dto.icon,
            color: dto.color,
            is_active: dto.is_active,
        }
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub path: String,
    pub level: i32,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            path: c.path,
            level: c.level,
            description: c.description,
            icon: c.icon,
            color: c.color,
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub name: String,
    pub path: String,
    pub level: i32,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub is_active: bool,
    pub children: Vec<CategoryTreeDto>,
}

impl From<CategoryNode> for CategoryTreeDto {
    fn from(node: CategoryNode) -> Self {
        let c = node.category;
        Self {
            id: c.id,
            name: c.name,
            path: c.path,
            level: c.level,
            description: c.description,
            icon: c.icon,
            color: c.color,
            is_active: c.is_active,
            children: node.children.into_iter().map(Self::from).collect(),
        }
    }
}

/// Body of `GET /api/categories`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListResponseDto {
    pub success: bool,
    /// Number of root categories in `data`
    pub count: usize,
    pub data: Vec<CategoryTreeDto>,
    /// Subtrees whose parent is absent from the result set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orphans: Vec<CategoryTreeDto>,
}

/// Body of `DELETE /api/categories/{id}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCategoryResponseDto {
    pub success: bool,
    pub deleted_count: u64,
    pub message: String,
}
