//! # Admin API Handlers
//!
//! Read-only listing endpoints for back-office tooling. Each listing
//! declares the columns it displays and returns rows projected onto those
//! columns, so the UI renders the table without knowing the entity shape.

use crate::auth::OperatorAuth;
use crate::error::ApiError;
use crate::handlers::types::ApiResponse;
use crate::repositories::{CategoryRepository, TenantRepository};
use crate::server::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Columns shown in the tenant (client) listing
pub const CLIENT_LIST_DISPLAY: &[&str] = &["name"];

/// Columns shown in the category listing
pub const CATEGORY_LIST_DISPLAY: &[&str] = &["name"];

/// A columnar listing page for back-office tables
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminListPage {
    /// Column headers, in display order
    #[schema(example = json!(["name"]))]
    pub columns: Vec<String>,
    /// One entry per record, values aligned with `columns`
    pub rows: Vec<AdminListRow>,
}

/// A single record in an admin listing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminListRow {
    /// Record identifier, rendered as a string
    pub id: String,
    /// Displayed values, aligned with the page's `columns`
    pub values: Vec<String>,
}

/// List tenants for the back office
#[utoipa::path(
    get,
    path = "/api/v1/admin/clients",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Client listing", body = ApiResponse<AdminListPage>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "admin"
)]
pub async fn list_clients(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
) -> Result<Json<ApiResponse<AdminListPage>>, ApiError> {
    let repo = TenantRepository::new(&state.db);
    let tenants = repo.list_tenants().await?;

    let rows = tenants
        .into_iter()
        .map(|tenant| AdminListRow {
            id: tenant.id.to_string(),
            values: vec![tenant.name],
        })
        .collect();

    Ok(Json(ApiResponse::new(page(CLIENT_LIST_DISPLAY, rows))))
}

/// List shared categories for the back office
#[utoipa::path(
    get,
    path = "/api/v1/admin/categories",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category listing", body = ApiResponse<AdminListPage>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "admin"
)]
pub async fn list_admin_categories(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
) -> Result<Json<ApiResponse<AdminListPage>>, ApiError> {
    let repo = CategoryRepository::new(&state.db);
    let categories = repo.list_categories().await?;

    let rows = categories
        .into_iter()
        .map(|category| AdminListRow {
            id: category.id.to_string(),
            values: vec![category.name],
        })
        .collect();

    Ok(Json(ApiResponse::new(page(CATEGORY_LIST_DISPLAY, rows))))
}

fn page(columns: &[&str], rows: Vec<AdminListRow>) -> AdminListPage {
    AdminListPage {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        rows,
    }
}
