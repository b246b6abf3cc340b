//! # Server Configuration
//!
//! This module contains the server setup and configuration for the
//! Storefront API: the router, shared state, and OpenAPI documentation.

use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use crate::auth::auth_middleware;
use crate::config::AppConfig;
use crate::handlers;
use crate::telemetry::{TraceContext, with_trace_context};
use crate::tenancy::tenant_resolver;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
}

/// Middleware that assigns each request a trace ID and keeps it available
/// through task-local storage for the duration of the request.
async fn trace_context_middleware(request: Request, next: Next) -> Response {
    let context = TraceContext {
        trace_id: Uuid::new_v4().to_string(),
    };

    let mut request = request;
    request.extensions_mut().insert(context.clone());

    with_trace_context(context, next.run(request)).await
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    // Management routes require an operator bearer token
    let management = Router::new()
        .route(
            "/tenants",
            post(handlers::tenants::create_tenant).get(handlers::tenants::list_tenants),
        )
        .route(
            "/tenants/{id}",
            get(handlers::tenants::get_tenant).delete(handlers::tenants::delete_tenant),
        )
        .route(
            "/domains",
            post(handlers::domains::create_domain).get(handlers::domains::list_domains),
        )
        .route("/domains/{id}", delete(handlers::domains::delete_domain))
        .route(
            "/categories",
            post(handlers::categories::create_category).get(handlers::categories::list_categories),
        )
        .route(
            "/categories/{id}",
            get(handlers::categories::get_category)
                .put(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        )
        .route("/admin/clients", get(handlers::admin::list_clients))
        .route(
            "/admin/categories",
            get(handlers::admin::list_admin_categories),
        )
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state.config),
            auth_middleware,
        ));

    // Product routes are tenant-scoped; the resolver pins the schema
    let tenant_scoped = Router::new()
        .route(
            "/products",
            post(handlers::products::create_product).get(handlers::products::list_products),
        )
        .route(
            "/products/{id}",
            get(handlers::products::get_product)
                .patch(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            tenant_resolver,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .nest("/api/v1", management.merge(tenant_scoped))
        .layer(middleware::from_fn(trace_context_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

/// Starts the server with the given configuration
pub async fn run_server(
    config: AppConfig,
    db: DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    // Resolve the configured bind address
    let addr = config
        .bind_addr()
        .map_err(|e| format!("Invalid server address: {}", e))?;

    let state = AppState {
        db,
        config: Arc::new(config),
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz,
        crate::handlers::tenants::create_tenant,
        crate::handlers::tenants::list_tenants,
        crate::handlers::tenants::get_tenant,
        crate::handlers::tenants::delete_tenant,
        crate::handlers::domains::create_domain,
        crate::handlers::domains::list_domains,
        crate::handlers::domains::delete_domain,
        crate::handlers::categories::create_category,
        crate::handlers::categories::list_categories,
        crate::handlers::categories::get_category,
        crate::handlers::categories::update_category,
        crate::handlers::categories::delete_category,
        crate::handlers::products::create_product,
        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        crate::handlers::admin::list_clients,
        crate::handlers::admin::list_admin_categories,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::handlers::types::ResponseMeta,
            crate::handlers::tenants::CreateTenantRequestDto,
            crate::handlers::tenants::TenantDto,
            crate::handlers::domains::CreateDomainRequestDto,
            crate::handlers::domains::DomainDto,
            crate::handlers::categories::CategoryNameDto,
            crate::handlers::categories::CategoryDto,
            crate::handlers::products::CreateProductRequestDto,
            crate::handlers::products::UpdateProductRequestDto,
            crate::handlers::products::ProductDto,
            crate::handlers::admin::AdminListPage,
            crate::handlers::admin::AdminListRow,
        )
    ),
    info(
        title = "Storefront API",
        description = "Schema-per-tenant storefront backend",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
