//! # Categories API Handlers
//!
//! Handlers for the shared product categories. Categories live in the
//! public schema and are visible to every tenant.

use crate::auth::OperatorAuth;
use crate::error::ApiError;
use crate::handlers::types::ApiResponse;
use crate::models::category::Model as CategoryModel;
use crate::repositories::CategoryRepository;
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request payload for creating or renaming a category
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryNameDto {
    /// Category name (required, max 100 characters)
    #[schema(example = "Tools")]
    pub name: String,
}

/// Response payload describing a category
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    /// Auto-incrementing category identifier
    #[schema(example = 1)]
    pub id: i64,
    /// Category name
    #[schema(example = "Tools")]
    pub name: String,
}

impl From<CategoryModel> for CategoryDto {
    fn from(category: CategoryModel) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

/// Create a new shared category
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    security(("bearer_auth" = [])),
    request_body = CategoryNameDto,
    responses(
        (status = 201, description = "Category created successfully", body = ApiResponse<CategoryDto>, headers(
            ("Location", description = "URL of the created category")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Json(request): Json<CategoryNameDto>,
) -> Result<
    (
        StatusCode,
        [(&'static str, String); 1],
        Json<ApiResponse<CategoryDto>>,
    ),
    ApiError,
> {
    let repo = CategoryRepository::new(&state.db);
    let category = repo.create_category(request.name).await?;

    let location_header = format!("/api/v1/categories/{}", category.id);
    let response = ApiResponse::new(CategoryDto::from(category));

    Ok((
        StatusCode::CREATED,
        [("Location", location_header)],
        Json(response),
    ))
}

/// List all shared categories
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Categories retrieved successfully", body = ApiResponse<Vec<CategoryDto>>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
) -> Result<Json<ApiResponse<Vec<CategoryDto>>>, ApiError> {
    let repo = CategoryRepository::new(&state.db);
    let categories = repo.list_categories().await?;

    let dtos = categories.into_iter().map(CategoryDto::from).collect();
    Ok(Json(ApiResponse::new(dtos)))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Category identifier")
    ),
    responses(
        (status = 200, description = "Category retrieved successfully", body = ApiResponse<CategoryDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Category not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Path(category_id): Path<i64>,
) -> Result<Json<ApiResponse<CategoryDto>>, ApiError> {
    let repo = CategoryRepository::new(&state.db);

    let category = repo
        .get_category_by_id(category_id)
        .await?
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::NOT_FOUND,
                "CATEGORY_NOT_FOUND",
                "Category not found",
            )
            .with_details(serde_json::json!({ "category_id": category_id }))
        })?;

    Ok(Json(ApiResponse::new(CategoryDto::from(category))))
}

/// Rename a category
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Category identifier")
    ),
    request_body = CategoryNameDto,
    responses(
        (status = 200, description = "Category updated successfully", body = ApiResponse<CategoryDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Category not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Path(category_id): Path<i64>,
    Json(request): Json<CategoryNameDto>,
) -> Result<Json<ApiResponse<CategoryDto>>, ApiError> {
    let repo = CategoryRepository::new(&state.db);
    let category = repo.update_category_name(category_id, request.name).await?;

    Ok(Json(ApiResponse::new(CategoryDto::from(category))))
}

/// Delete a category; referencing products are removed by the cascade
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Category identifier")
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Category not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Path(category_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = CategoryRepository::new(&state.db);
    repo.delete_category(category_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
