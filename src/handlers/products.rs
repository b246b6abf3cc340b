//! # Products API Handlers
//!
//! Handlers for tenant-scoped products. These routes sit behind the tenant
//! resolver middleware, so every request carries a resolved [`TenantScope`]
//! identifying the schema to operate in.

use crate::error::ApiError;
use crate::handlers::types::ApiResponse;
use crate::models::product::Model as ProductModel;
use crate::repositories::{CreateProductRequest, ProductRepository, UpdateProductRequest};
use crate::server::AppState;
use crate::tenancy::TenantScope;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Request payload for creating a product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequestDto {
    /// Product name (required, max 100 characters)
    #[schema(example = "Widget")]
    pub name: String,
    /// Optional shared category reference
    #[schema(example = 1)]
    pub category_id: Option<i64>,
    /// Price with two decimal places
    #[schema(value_type = String, example = "9.99")]
    pub price: Decimal,
}

/// Request payload for updating a product; omitted fields are unchanged,
/// an explicit `"category_id": null` clears the category.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequestDto {
    /// New product name
    pub name: Option<String>,
    /// New category reference; `null` detaches the product
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>, nullable)]
    pub category_id: Option<Option<i64>>,
    /// New price with two decimal places
    #[schema(value_type = Option<String>, example = "19.99")]
    pub price: Option<Decimal>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

/// Response payload describing a product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    /// Auto-incrementing product identifier (per tenant schema)
    #[schema(example = 1)]
    pub id: i64,
    /// Product name
    #[schema(example = "Widget")]
    pub name: String,
    /// Shared category reference, if any
    pub category_id: Option<i64>,
    /// Price with two decimal places
    #[schema(value_type = String, example = "9.99")]
    pub price: Decimal,
}

impl From<ProductModel> for ProductDto {
    fn from(product: ProductModel) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category_id: product.category_id,
            price: product.price,
        }
    }
}

/// Create a product in the resolved tenant's schema
#[utoipa::path(
    post,
    path = "/api/v1/products",
    params(
        ("X-Tenant-Id" = Option<String>, Header, description = "Tenant UUID; alternatively use a registered hostname")
    ),
    request_body = CreateProductRequestDto,
    responses(
        (status = 201, description = "Product created successfully", body = ApiResponse<ProductDto>, headers(
            ("Location", description = "URL of the created product")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Tenant not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    TenantScope(ctx): TenantScope,
    Json(request): Json<CreateProductRequestDto>,
) -> Result<
    (
        StatusCode,
        [(&'static str, String); 1],
        Json<ApiResponse<ProductDto>>,
    ),
    ApiError,
> {
    let repo = ProductRepository::new(&state.db);
    let product = repo
        .create_product(
            &ctx,
            CreateProductRequest {
                name: request.name,
                category_id: request.category_id,
                price: request.price,
            },
        )
        .await?;

    let location_header = format!("/api/v1/products/{}", product.id);
    let response = ApiResponse::new(ProductDto::from(product));

    Ok((
        StatusCode::CREATED,
        [("Location", location_header)],
        Json(response),
    ))
}

/// List the tenant's products, newest first
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(
        ("X-Tenant-Id" = Option<String>, Header, description = "Tenant UUID; alternatively use a registered hostname")
    ),
    responses(
        (status = 200, description = "Products retrieved successfully", body = ApiResponse<Vec<ProductDto>>),
        (status = 404, description = "Tenant not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    TenantScope(ctx): TenantScope,
) -> Result<Json<ApiResponse<Vec<ProductDto>>>, ApiError> {
    let repo = ProductRepository::new(&state.db);
    let products = repo.list_products(&ctx).await?;

    let dtos = products.into_iter().map(ProductDto::from).collect();
    Ok(Json(ApiResponse::new(dtos)))
}

/// Get one of the tenant's products by ID
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(
        ("id" = i64, Path, description = "Product identifier"),
        ("X-Tenant-Id" = Option<String>, Header, description = "Tenant UUID; alternatively use a registered hostname")
    ),
    responses(
        (status = 200, description = "Product retrieved successfully", body = ApiResponse<ProductDto>),
        (status = 404, description = "Product or tenant not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    TenantScope(ctx): TenantScope,
    Path(product_id): Path<i64>,
) -> Result<Json<ApiResponse<ProductDto>>, ApiError> {
    let repo = ProductRepository::new(&state.db);

    let product = repo
        .get_product_by_id(&ctx, product_id)
        .await?
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::NOT_FOUND,
                "PRODUCT_NOT_FOUND",
                "Product not found",
            )
            .with_details(serde_json::json!({ "product_id": product_id }))
        })?;

    Ok(Json(ApiResponse::new(ProductDto::from(product))))
}

/// Update one of the tenant's products
#[utoipa::path(
    patch,
    path = "/api/v1/products/{id}",
    params(
        ("id" = i64, Path, description = "Product identifier"),
        ("X-Tenant-Id" = Option<String>, Header, description = "Tenant UUID; alternatively use a registered hostname")
    ),
    request_body = UpdateProductRequestDto,
    responses(
        (status = 200, description = "Product updated successfully", body = ApiResponse<ProductDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Product or tenant not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    TenantScope(ctx): TenantScope,
    Path(product_id): Path<i64>,
    Json(request): Json<UpdateProductRequestDto>,
) -> Result<Json<ApiResponse<ProductDto>>, ApiError> {
    let repo = ProductRepository::new(&state.db);
    let product = repo
        .update_product(
            &ctx,
            product_id,
            UpdateProductRequest {
                name: request.name,
                category_id: request.category_id,
                price: request.price,
            },
        )
        .await?;

    Ok(Json(ApiResponse::new(ProductDto::from(product))))
}

/// Delete one of the tenant's products
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(
        ("id" = i64, Path, description = "Product identifier"),
        ("X-Tenant-Id" = Option<String>, Header, description = "Tenant UUID; alternatively use a registered hostname")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product or tenant not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    TenantScope(ctx): TenantScope,
    Path(product_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = ProductRepository::new(&state.db);
    repo.delete_product(&ctx, product_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
