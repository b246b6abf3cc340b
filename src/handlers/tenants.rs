//! # Tenants API Handlers
//!
//! This module contains handlers for tenant creation and management endpoints.

use crate::auth::OperatorAuth;
use crate::error::ApiError;
use crate::handlers::types::ApiResponse;
use crate::models::tenant::Model as TenantModel;
use crate::repositories::{CreateTenantRequest, TenantRepository};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Request payload for creating a new tenant
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTenantRequestDto {
    /// Display name for the tenant (required, max 100 characters)
    #[schema(example = "Acme Corp")]
    pub name: String,
    /// Schema to provision; derived from the name when omitted
    #[schema(example = "acme_corp")]
    pub schema_name: Option<String>,
    /// Whether to provision the schema immediately (default true)
    #[serde(default = "default_auto_create_schema")]
    pub auto_create_schema: bool,
}

fn default_auto_create_schema() -> bool {
    true
}

/// Response payload describing a tenant
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TenantDto {
    /// Unique identifier for the tenant (UUID)
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: String,
    /// Display name of the tenant
    #[schema(example = "Acme Corp")]
    pub name: String,
    /// Schema owned by the tenant
    #[schema(example = "acme_corp")]
    pub schema_name: String,
    /// Whether the schema was provisioned automatically
    pub auto_create_schema: bool,
    /// Timestamp when the tenant was created (ISO 8601)
    #[schema(example = "2025-06-01T10:30:00Z")]
    pub created_at: String,
}

impl From<TenantModel> for TenantDto {
    fn from(tenant: TenantModel) -> Self {
        Self {
            id: tenant.id.to_string(),
            name: tenant.name,
            schema_name: tenant.schema_name,
            auto_create_schema: tenant.auto_create_schema,
            created_at: tenant.created_at.to_rfc3339(),
        }
    }
}

/// Create a new tenant
#[utoipa::path(
    post,
    path = "/api/v1/tenants",
    security(("bearer_auth" = [])),
    request_body = CreateTenantRequestDto,
    responses(
        (status = 201, description = "Tenant created successfully", body = ApiResponse<TenantDto>, headers(
            ("Location", description = "URL of the created tenant")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 409, description = "Conflict - schema name already taken", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "tenants"
)]
pub async fn create_tenant(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Json(request): Json<CreateTenantRequestDto>,
) -> Result<
    (
        StatusCode,
        [(&'static str, String); 1],
        Json<ApiResponse<TenantDto>>,
    ),
    ApiError,
> {
    if request.name.trim().is_empty() {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            "Tenant name is required and cannot be empty",
        )
        .with_details(serde_json::json!({
            "field": "name",
            "message": "Tenant name must be provided and cannot be empty"
        })));
    }

    let repo = TenantRepository::new(&state.db);
    let tenant = repo
        .create_tenant(CreateTenantRequest {
            name: request.name.trim().to_string(),
            schema_name: request.schema_name,
            auto_create_schema: request.auto_create_schema,
        })
        .await?;

    let location_header = format!("/api/v1/tenants/{}", tenant.id);
    let response = ApiResponse::new(TenantDto::from(tenant));

    Ok((
        StatusCode::CREATED,
        [("Location", location_header)],
        Json(response),
    ))
}

/// List all tenants
#[utoipa::path(
    get,
    path = "/api/v1/tenants",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tenants retrieved successfully", body = ApiResponse<Vec<TenantDto>>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "tenants"
)]
pub async fn list_tenants(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
) -> Result<Json<ApiResponse<Vec<TenantDto>>>, ApiError> {
    let repo = TenantRepository::new(&state.db);
    let tenants = repo.list_tenants().await?;

    let dtos = tenants.into_iter().map(TenantDto::from).collect();
    Ok(Json(ApiResponse::new(dtos)))
}

/// Get a tenant by ID
#[utoipa::path(
    get,
    path = "/api/v1/tenants/{id}",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Tenant UUID")
    ),
    responses(
        (status = 200, description = "Tenant retrieved successfully", body = ApiResponse<TenantDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Tenant not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "tenants"
)]
pub async fn get_tenant(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<ApiResponse<TenantDto>>, ApiError> {
    let repo = TenantRepository::new(&state.db);

    let tenant = repo.get_tenant_by_id(tenant_id).await?.ok_or_else(|| {
        ApiError::new(StatusCode::NOT_FOUND, "TENANT_NOT_FOUND", "Tenant not found").with_details(
            serde_json::json!({
                "tenant_id": tenant_id.to_string()
            }),
        )
    })?;

    Ok(Json(ApiResponse::new(TenantDto::from(tenant))))
}

/// Delete a tenant and drop its schema
#[utoipa::path(
    delete,
    path = "/api/v1/tenants/{id}",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Tenant UUID")
    ),
    responses(
        (status = 204, description = "Tenant deleted"),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Tenant not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "tenants"
)]
pub async fn delete_tenant(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Path(tenant_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = TenantRepository::new(&state.db);
    repo.delete_tenant(tenant_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
