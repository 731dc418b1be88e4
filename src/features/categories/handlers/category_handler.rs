use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::categories::dtos::{
    CategoryListResponseDto, CategoryResponseDto, CategoryTreeDto, CreateCategoryDto,
    DeleteCategoryResponseDto, ListCategoriesQuery, UpdateCategoryDto,
};
use crate::features::categories::error::CategoryError;
use crate::features::categories::models::CategoryPatch;
use crate::features::categories::services::{CategoryService, CreateCategory};
use crate::shared::types::{ApiResponse, ErrorResponse};
use crate::shared::validation::MATERIALIZED_PATH_REGEX;

/// A path id that is not a UUID cannot match any category
fn parse_category_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| CategoryError::NotFound.into())
}

/// List categories as a tree
///
/// Defaults to active categories; pass `isActive=false` for inactive ones.
#[utoipa::path(
    get,
    path = "/api/categories",
    params(ListCategoriesQuery),
    responses(
        (status = 200, description = "Category forest", body = CategoryListResponseDto),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    AppQuery(query): AppQuery<ListCategoriesQuery>,
) -> Result<Json<CategoryListResponseDto>> {
    let forest = service.get_all_tree(query.is_active).await?;

    let data: Vec<CategoryTreeDto> = forest.roots.into_iter().map(Into::into).collect();
    Ok(Json(CategoryListResponseDto {
        success: true,
        count: data.len(),
        data,
        orphans: forest.orphans.into_iter().map(Into::into).collect(),
    }))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let id = parse_category_id(&id)?;
    let category = service
        .get_by_id(id)
        .await?
        .ok_or(CategoryError::NotFound)?;
    Ok(Json(ApiResponse::success(category.into())))
}

/// Create a category
///
/// Without `parentPath` the category becomes a root; otherwise it is placed
/// under the category at that path.
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Parent category not found", body = ErrorResponse),
        (status = 409, description = "Path already taken", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    let dto = dto.normalized();

    let name = match dto.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(AppError::Validation("Category name is required".to_string())),
    };
    dto.validate()?;

    // A malformed parent path can never resolve to an existing category
    if let Some(parent_path) = dto.parent_path.as_deref() {
        if !MATERIALIZED_PATH_REGEX.is_match(parent_path) {
            return Err(CategoryError::ParentNotFound.into());
        }
    }

    let category = service
        .create(CreateCategory {
            name,
            parent_path: dto.parent_path,
            description: dto.description,
            icon: dto.icon,
            color: dto.color,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(category.into())),
    ))
}

/// Update a category
///
/// Only the supplied fields change. The path is fixed at creation, so a new
/// name does not move the category.
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "No update data or validation error", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let dto = dto.normalized();
    let patch = CategoryPatch::from(dto.clone());
    if patch.is_empty() {
        return Err(AppError::Validation("No update data provided".to_string()));
    }
    dto.validate()?;

    let id = parse_category_id(&id)?;
    let category = service.update(id, patch).await?;
    Ok(Json(ApiResponse::success(category.into())))
}

/// Delete a category and all its subcategories
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category subtree deleted", body = DeleteCategoryResponseDto),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteCategoryResponseDto>> {
    let id = parse_category_id(&id)?;
    let outcome = service.delete(id).await?;
    Ok(Json(DeleteCategoryResponseDto {
        success: true,
        deleted_count: outcome.deleted_count,
        message: outcome.message,
    }))
}
