use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit, middleware::from_fn_with_state, routing::get, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::categories::{routes as categories_routes, CategoryService};

/// Liveness body for `GET /health`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
        timestamp: Utc::now(),
    })
}

fn swagger_routes(config: &Config) -> Router {
    let mut openapi = ApiDoc::openapi();
    SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    }
    .modify(&mut openapi);

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi);
    match config.swagger.credentials() {
        Some(credentials) => {
            tracing::info!("Swagger UI basic auth enabled");
            Router::new().merge(swagger_ui).layer(from_fn_with_state(
                Arc::new(credentials),
                middleware::swagger_basic_auth,
            ))
        }
        None => {
            tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
            Router::new().merge(swagger_ui)
        }
    }
}

/// Assemble the full application: routes, fallback and the HTTP layer stack
pub fn build_router(category_service: Arc<CategoryService>, config: &Config) -> Router {
    Router::new()
        .merge(swagger_routes(config))
        .merge(categories_routes::routes(category_service))
        .route("/health", get(health_check))
        .fallback(middleware::not_found_fallback)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(&config.app.cors_allowed_origins))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use axum_test::TestServer;
    use base64::prelude::*;
    use serde_json::{json, Value};

    use crate::features::categories::repositories::InMemoryCategoryRepository;
    use crate::shared::test_helpers::test_config;

    fn server(config: &Config) -> TestServer {
        let service = Arc::new(CategoryService::new(Arc::new(
            InMemoryCategoryRepository::new(),
        )));
        TestServer::new(build_router(service, config)).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_running() {
        let server = server(&test_config());

        let response = server.get("/health").await;
        response.assert_status_ok();
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "ok");
        assert_eq!(body.message, "Server is running");
        assert!(body.timestamp <= Utc::now());
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        let server = server(&test_config());

        for path in ["/health", "/api/categories", "/api/unknown"] {
            let response = server.get(path).await;
            let request_id = response
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| uuid::Uuid::parse_str(v).ok());
            assert!(request_id.is_some(), "missing x-request-id on {}", path);
        }
    }

    #[tokio::test]
    async fn test_categories_and_fallback_are_mounted() {
        let server = server(&test_config());

        let created = server
            .post("/api/categories")
            .json(&json!({ "name": "Women" }))
            .await;
        created.assert_status(StatusCode::CREATED);

        let listed: Value = server.get("/api/categories").await.json();
        assert_eq!(listed["count"], 1);

        let missing = server.get("/api/unknown").await;
        missing.assert_status(StatusCode::NOT_FOUND);
        let body: Value = missing.json();
        assert_eq!(body["error"], "Endpoint not found");
    }

    #[tokio::test]
    async fn test_body_limit_applies() {
        let mut config = test_config();
        config.app.max_request_body_size = 64;
        let server = server(&config);

        let response = server
            .post("/api/categories")
            .json(&json!({ "name": "Women", "description": "d".repeat(200) }))
            .await;
        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        let body: Value = response.json();
        assert_eq!(body["error"], "Request body too large");
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let server = server(&test_config());

        let response = server.get("/api-docs/openapi.json").await;
        response.assert_status_ok();
        let doc: Value = response.json();
        assert!(doc["paths"]["/api/categories"].is_object());
    }

    #[tokio::test]
    async fn test_swagger_requires_credentials_when_configured() {
        let mut config = test_config();
        config.swagger.username = Some("admin".to_string());
        config.swagger.password = Some("secret".to_string());
        let server = server(&config);

        server
            .get("/api-docs/openapi.json")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let encoded = BASE64_STANDARD.encode("admin:secret");
        server
            .get("/api-docs/openapi.json")
            .add_header(header::AUTHORIZATION, format!("Basic {}", encoded))
            .await
            .assert_status_ok();
    }
}
