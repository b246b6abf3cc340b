//! # Domains API Handlers
//!
//! Handlers for registering and managing hostname-to-tenant mappings.

use crate::auth::OperatorAuth;
use crate::error::ApiError;
use crate::handlers::types::ApiResponse;
use crate::models::domain::Model as DomainModel;
use crate::repositories::{CreateDomainRequest, DomainRepository, TenantRepository};
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Request payload for registering a domain
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateDomainRequestDto {
    /// Hostname to register (stored lowercased)
    #[schema(example = "shop.example.com")]
    pub hostname: String,
    /// Tenant that serves this hostname
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub tenant_id: Uuid,
    /// Whether this is the tenant's primary hostname (default false)
    #[serde(default)]
    pub is_primary: bool,
}

/// Response payload describing a domain
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DomainDto {
    /// Unique identifier for the domain (UUID)
    pub id: String,
    /// Registered hostname
    #[schema(example = "shop.example.com")]
    pub hostname: String,
    /// Owning tenant identifier
    pub tenant_id: String,
    /// Whether this is the tenant's primary hostname
    pub is_primary: bool,
    /// Timestamp when the domain was registered (ISO 8601)
    pub created_at: String,
}

impl From<DomainModel> for DomainDto {
    fn from(domain: DomainModel) -> Self {
        Self {
            id: domain.id.to_string(),
            hostname: domain.hostname,
            tenant_id: domain.tenant_id.to_string(),
            is_primary: domain.is_primary,
            created_at: domain.created_at.to_rfc3339(),
        }
    }
}

/// Query parameters for listing domains
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListDomainsQuery {
    /// Restrict the listing to one tenant
    pub tenant_id: Option<Uuid>,
}

/// Register a hostname for a tenant
#[utoipa::path(
    post,
    path = "/api/v1/domains",
    security(("bearer_auth" = [])),
    request_body = CreateDomainRequestDto,
    responses(
        (status = 201, description = "Domain registered successfully", body = ApiResponse<DomainDto>, headers(
            ("Location", description = "URL of the created domain")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Tenant not found", body = ApiError),
        (status = 409, description = "Conflict - hostname already registered", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "domains"
)]
pub async fn create_domain(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Json(request): Json<CreateDomainRequestDto>,
) -> Result<
    (
        StatusCode,
        [(&'static str, String); 1],
        Json<ApiResponse<DomainDto>>,
    ),
    ApiError,
> {
    let tenants = TenantRepository::new(&state.db);
    if !tenants.tenant_exists(request.tenant_id).await? {
        return Err(
            ApiError::new(StatusCode::NOT_FOUND, "TENANT_NOT_FOUND", "Tenant not found")
                .with_details(serde_json::json!({
                    "tenant_id": request.tenant_id.to_string()
                })),
        );
    }

    let repo = DomainRepository::new(&state.db);
    let domain = repo
        .create_domain(CreateDomainRequest {
            hostname: request.hostname,
            tenant_id: request.tenant_id,
            is_primary: request.is_primary,
        })
        .await?;

    let location_header = format!("/api/v1/domains/{}", domain.id);
    let response = ApiResponse::new(DomainDto::from(domain));

    Ok((
        StatusCode::CREATED,
        [("Location", location_header)],
        Json(response),
    ))
}

/// List registered domains, optionally filtered by tenant
#[utoipa::path(
    get,
    path = "/api/v1/domains",
    security(("bearer_auth" = [])),
    params(ListDomainsQuery),
    responses(
        (status = 200, description = "Domains retrieved successfully", body = ApiResponse<Vec<DomainDto>>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "domains"
)]
pub async fn list_domains(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Query(query): Query<ListDomainsQuery>,
) -> Result<Json<ApiResponse<Vec<DomainDto>>>, ApiError> {
    let repo = DomainRepository::new(&state.db);
    let domains = match query.tenant_id {
        Some(tenant_id) => repo.list_for_tenant(tenant_id).await?,
        None => repo.list_domains().await?,
    };

    let dtos = domains.into_iter().map(DomainDto::from).collect();
    Ok(Json(ApiResponse::new(dtos)))
}

/// Delete a domain registration
#[utoipa::path(
    delete,
    path = "/api/v1/domains/{id}",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Domain UUID")
    ),
    responses(
        (status = 204, description = "Domain deleted"),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Domain not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "domains"
)]
pub async fn delete_domain(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Path(domain_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = DomainRepository::new(&state.db);
    repo.delete_domain(domain_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;

    use crate::repositories::CreateTenantRequest;
    use crate::server::test_support::{auth_headers, setup_test_app};

    async fn create_tenant(state: &AppState, name: &str) -> Uuid {
        TenantRepository::new(&state.db)
            .create_tenant(CreateTenantRequest {
                name: name.to_string(),
                schema_name: None,
                auto_create_schema: false,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_domain_success() {
        let (state, app) = setup_test_app().await;
        let tenant_id = create_tenant(&state, "Acme Corp").await;

        let request_body = json!({
            "hostname": "Shop.Example.COM",
            "tenant_id": tenant_id,
            "is_primary": true
        });

        let mut builder = Request::builder().method("POST").uri("/api/v1/domains");
        for (name, value) in auth_headers() {
            builder = builder.header(name, value);
        }
        let request = builder.body(Body::from(request_body.to_string())).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let response_json: ApiResponse<DomainDto> = serde_json::from_slice(&body).unwrap();

        assert_eq!(response_json.data.hostname, "shop.example.com");
        assert_eq!(response_json.data.tenant_id, tenant_id.to_string());
        assert!(response_json.data.is_primary);
    }

    #[tokio::test]
    async fn test_create_domain_unknown_tenant() {
        let (_state, app) = setup_test_app().await;

        let request_body = json!({
            "hostname": "shop.example.com",
            "tenant_id": Uuid::new_v4()
        });

        let mut builder = Request::builder().method("POST").uri("/api/v1/domains");
        for (name, value) in auth_headers() {
            builder = builder.header(name, value);
        }
        let request = builder.body(Body::from(request_body.to_string())).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_domains_filtered_by_tenant() {
        let (state, app) = setup_test_app().await;
        let first_tenant = create_tenant(&state, "First").await;
        let second_tenant = create_tenant(&state, "Second").await;

        let repo = DomainRepository::new(&state.db);
        repo.create_domain(CreateDomainRequest {
            hostname: "first.example.com".to_string(),
            tenant_id: first_tenant,
            is_primary: true,
        })
        .await
        .unwrap();
        repo.create_domain(CreateDomainRequest {
            hostname: "second.example.com".to_string(),
            tenant_id: second_tenant,
            is_primary: true,
        })
        .await
        .unwrap();

        let mut builder = Request::builder()
            .method("GET")
            .uri(format!("/api/v1/domains?tenant_id={}", first_tenant));
        for (name, value) in auth_headers() {
            builder = builder.header(name, value);
        }
        let request = builder.body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let response_json: ApiResponse<Vec<DomainDto>> = serde_json::from_slice(&body).unwrap();

        assert_eq!(response_json.data.len(), 1);
        assert_eq!(response_json.data[0].hostname, "first.example.com");
    }

    #[tokio::test]
    async fn test_delete_domain() {
        let (state, app) = setup_test_app().await;
        let tenant_id = create_tenant(&state, "Acme Corp").await;

        let repo = DomainRepository::new(&state.db);
        let domain = repo
            .create_domain(CreateDomainRequest {
                hostname: "shop.example.com".to_string(),
                tenant_id,
                is_primary: true,
            })
            .await
            .unwrap();

        let mut builder = Request::builder()
            .method("DELETE")
            .uri(format!("/api/v1/domains/{}", domain.id));
        for (name, value) in auth_headers() {
            builder = builder.header(name, value);
        }
        let request = builder.body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        assert!(repo
            .get_by_hostname("shop.example.com")
            .await
            .unwrap()
            .is_none());
    }
}
