//! Request-time tenant resolution.
//!
//! A request reaches tenant-scoped routes either with an explicit
//! `X-Tenant-Id` header or through a hostname registered in the domains
//! table. The middleware resolves the tenant and stashes a
//! [`TenantContext`] in the request extensions for handlers to extract.

use axum::{
    extract::{Request, State},
    http::{StatusCode, header::HOST, request::Parts},
    middleware::Next,
    response::Response,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::error::{ApiError, validation_error};
use crate::models::{domain, tenant};
use crate::server::AppState;
use crate::tenancy::TenantContext;

/// Extractor for the tenant context placed by [`tenant_resolver`]
#[derive(Debug, Clone)]
pub struct TenantScope(pub TenantContext);

impl<S> axum::extract::FromRequestParts<S> for TenantScope
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .map(TenantScope)
            .ok_or_else(|| {
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "Tenant context missing; route not behind tenant resolver",
                )
            })
    }
}

/// Middleware that resolves the active tenant for tenant-scoped routes.
pub async fn tenant_resolver(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let headers = request.headers().clone();

    let context = if let Some(raw) = headers.get("X-Tenant-Id") {
        let raw = raw.to_str().map_err(|_| {
            validation_error(
                "Invalid tenant header",
                serde_json::json!({ "X-Tenant-Id": "Header must be valid UTF-8" }),
            )
        })?;
        let tenant_id = Uuid::parse_str(raw).map_err(|_| {
            validation_error(
                "Invalid tenant header",
                serde_json::json!({ "X-Tenant-Id": "Header must be a UUID" }),
            )
        })?;
        resolve_by_id(&state.db, tenant_id).await?
    } else if let Some(host) = headers.get(HOST) {
        let host = host.to_str().map_err(|_| {
            validation_error(
                "Invalid Host header",
                serde_json::json!({ "Host": "Header must be valid UTF-8" }),
            )
        })?;
        resolve_by_hostname(&state.db, strip_port(host)).await?
    } else {
        return Err(validation_error(
            "Unable to resolve tenant",
            serde_json::json!({
                "X-Tenant-Id": "Provide a tenant ID header or use a registered hostname"
            }),
        ));
    };

    tracing::debug!(
        tenant_id = %context.tenant_id,
        schema = %context.schema_name,
        "Resolved tenant for request"
    );

    let mut request = request;
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

async fn resolve_by_id(
    db: &DatabaseConnection,
    tenant_id: Uuid,
) -> Result<TenantContext, ApiError> {
    let tenant = tenant::Entity::find_by_id(tenant_id)
        .one(db)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| {
            ApiError::new(StatusCode::NOT_FOUND, "TENANT_NOT_FOUND", "Tenant not found")
                .with_details(serde_json::json!({ "tenant_id": tenant_id.to_string() }))
        })?;

    Ok(TenantContext {
        tenant_id: tenant.id,
        schema_name: tenant.schema_name,
    })
}

async fn resolve_by_hostname(
    db: &DatabaseConnection,
    hostname: &str,
) -> Result<TenantContext, ApiError> {
    // Hostnames are case-insensitive and stored lowercased
    let found = domain::Entity::find()
        .filter(domain::Column::Hostname.eq(hostname.to_ascii_lowercase()))
        .find_also_related(tenant::Entity)
        .one(db)
        .await
        .map_err(ApiError::from)?;

    let tenant = match found {
        Some((_, Some(tenant))) => tenant,
        _ => {
            return Err(ApiError::new(
                StatusCode::NOT_FOUND,
                "TENANT_NOT_FOUND",
                "No tenant registered for hostname",
            )
            .with_details(serde_json::json!({ "hostname": hostname })));
        }
    };

    Ok(TenantContext {
        tenant_id: tenant.id,
        schema_name: tenant.schema_name,
    })
}

/// Drop the port suffix of a Host header value, leaving bracketed IPv6
/// literals intact.
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return host.split(']').next().map(|h| &host[..h.len() + 1]).unwrap_or(host);
    }
    host.split(':').next().unwrap_or(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_port_from_host_header() {
        assert_eq!(strip_port("shop.example.com:8080"), "shop.example.com");
        assert_eq!(strip_port("shop.example.com"), "shop.example.com");
        assert_eq!(strip_port("[::1]:8080"), "[::1]");
    }
}
