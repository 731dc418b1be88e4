use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for category
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    /// Materialized path, e.g. "women.clothing.dresses"
    pub path: String,
    /// Number of segments in `path`; roots are level 1
    pub level: i32,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fully resolved record ready for insertion
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub id: Uuid,
    pub name: String,
    pub path: String,
    pub level: i32,
    pub description: String,
    pub icon: String,
    pub color: String,
}

/// Partial update over the mutable attributes of a category.
///
/// `path` and `level` are fixed at creation and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.icon.is_none()
            && self.color.is_none()
            && self.is_active.is_none()
    }
}
