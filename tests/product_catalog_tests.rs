//! Integration coverage for the shared category catalog and the
//! tenant-scoped product endpoints.

mod test_utils;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use test_utils::{authed, json_body, setup_app, tenant_scoped};

async fn onboard_tenant(app: &axum::Router, name: &str) -> String {
    let response = app
        .clone()
        .oneshot(authed("POST", "/api/v1/tenants", Some(json!({"name": name}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_category(app: &axum::Router, name: &str) -> i64 {
    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            "/api/v1/categories",
            Some(json!({"name": name})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn category_crud_round_trip() {
    let (_state, app) = setup_app().await;

    let category_id = create_category(&app, "Tols").await;

    let response = app
        .clone()
        .oneshot(authed(
            "PUT",
            &format!("/api/v1/categories/{}", category_id),
            Some(json!({"name": "Tools"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(authed("GET", "/api/v1/categories", None))
        .await
        .unwrap();
    let listed = json_body(response).await;
    assert_eq!(listed["data"][0]["name"], "Tools");

    let response = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/api/v1/categories/{}", category_id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(authed(
            "GET",
            &format!("/api/v1/categories/{}", category_id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_lifecycle_through_tenant_header() {
    let (_state, app) = setup_app().await;
    let tenant_id = onboard_tenant(&app, "Acme Corp").await;
    let category_id = create_category(&app, "Tools").await;

    // Create a product referencing the shared category
    let response = app
        .clone()
        .oneshot(tenant_scoped(
            "POST",
            "/api/v1/products",
            &tenant_id,
            Some(json!({
                "name": "Widget",
                "category_id": category_id,
                "price": "9.99"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    let product_id = created["data"]["id"].as_i64().unwrap();
    let price: rust_decimal::Decimal = created["data"]["price"].as_str().unwrap().parse().unwrap();
    assert_eq!(price.round_dp(2), rust_decimal::Decimal::new(999, 2));

    // Update the price
    let response = app
        .clone()
        .oneshot(tenant_scoped(
            "PATCH",
            &format!("/api/v1/products/{}", product_id),
            &tenant_id,
            Some(json!({"price": "19.99"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Delete it
    let response = app
        .clone()
        .oneshot(tenant_scoped(
            "DELETE",
            &format!("/api/v1/products/{}", product_id),
            &tenant_id,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(tenant_scoped("GET", "/api/v1/products", &tenant_id, None))
        .await
        .unwrap();
    let listed = json_body(response).await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn products_list_newest_first() {
    let (_state, app) = setup_app().await;
    let tenant_id = onboard_tenant(&app, "Acme Corp").await;

    for name in ["First", "Second", "Third"] {
        let response = app
            .clone()
            .oneshot(tenant_scoped(
                "POST",
                "/api/v1/products",
                &tenant_id,
                Some(json!({"name": name, "price": "1.00"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(tenant_scoped("GET", "/api/v1/products", &tenant_id, None))
        .await
        .unwrap();
    let listed = json_body(response).await;

    let names: Vec<&str> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn deleting_shared_category_cascades_into_products() {
    let (_state, app) = setup_app().await;
    let tenant_id = onboard_tenant(&app, "Acme Corp").await;
    let category_id = create_category(&app, "Tools").await;

    let response = app
        .clone()
        .oneshot(tenant_scoped(
            "POST",
            "/api/v1/products",
            &tenant_id,
            Some(json!({
                "name": "Widget",
                "category_id": category_id,
                "price": "9.99"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/api/v1/categories/{}", category_id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The referencing product was removed by the cascade
    let response = app
        .oneshot(tenant_scoped("GET", "/api/v1/products", &tenant_id, None))
        .await
        .unwrap();
    let listed = json_body(response).await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn products_resolve_tenant_by_registered_hostname() {
    let (_state, app) = setup_app().await;
    let tenant_id = onboard_tenant(&app, "Acme Corp").await;

    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            "/api/v1/domains",
            Some(json!({
                "hostname": "acme.example.com",
                "tenant_id": tenant_id,
                "is_primary": true
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/products")
        .header("Host", "acme.example.com")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Hostnames are case-insensitive; mixed-case Host values still resolve
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/products")
        .header("Host", "ACME.Example.COM")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Unregistered hostnames cannot reach product routes
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/products")
        .header("Host", "unknown.example.com")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_tenant_header_is_a_validation_error() {
    let (_state, app) = setup_app().await;

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/products")
        .header("X-Tenant-Id", "not-a-uuid")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "VALIDATION_FAILED");
}
