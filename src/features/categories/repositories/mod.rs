pub mod category_repository;
#[cfg(test)]
pub mod memory_category_repository;
pub mod postgres_category_repository;

pub use category_repository::CategoryRepository;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use memory_category_repository::InMemoryCategoryRepository;
pub use postgres_category_repository::PgCategoryRepository;
