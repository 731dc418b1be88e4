pub mod category_dto;

pub use category_dto::{
    CategoryListResponseDto, CategoryResponseDto, CategoryTreeDto, CreateCategoryDto,
    DeleteCategoryResponseDto, ListCategoriesQuery, UpdateCategoryDto,
};
