use thiserror::Error;

use crate::core::error::AppError;

/// Domain failures raised by the category service and its repositories
#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Category not found")]
    NotFound,

    #[error("Parent category not found")]
    ParentNotFound,

    #[error("Category name must contain at least one letter or digit")]
    EmptyLabel,

    #[error("A category with path '{0}' already exists")]
    DuplicatePath(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound | CategoryError::ParentNotFound => {
                AppError::NotFound(err.to_string())
            }
            CategoryError::EmptyLabel => AppError::Validation(err.to_string()),
            CategoryError::DuplicatePath(_) => AppError::Conflict(err.to_string()),
            CategoryError::Persistence(e) => AppError::Database(e),
        }
    }
}
