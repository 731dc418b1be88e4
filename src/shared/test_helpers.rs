#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use axum::Router;
#[cfg(test)]
use axum_test::TestServer;

#[cfg(test)]
use crate::core::app::build_router;
#[cfg(test)]
use crate::core::config::{AppConfig, Config, DatabaseConfig, SwaggerConfig};
#[cfg(test)]
use crate::features::categories::repositories::{CategoryRepository, InMemoryCategoryRepository};
#[cfg(test)]
use crate::features::categories::CategoryService;

/// Configuration with production defaults and no Swagger credentials
#[cfg(test)]
pub fn test_config() -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 3001,
            cors_allowed_origins: vec!["*".to_string()],
            max_request_body_size: 1024 * 1024,
            environment: "production".to_string(),
        },
        database: DatabaseConfig {
            url: "postgres://localhost/catalog_tree_test".to_string(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout_secs: 1,
            idle_timeout_secs: 1,
            max_lifetime_secs: 1,
        },
        swagger: SwaggerConfig {
            username: None,
            password: None,
            title: "Catalog Tree API".to_string(),
            version: "0.1.0".to_string(),
            description: "Test".to_string(),
        },
    }
}

/// The full application wired to the given repository
#[cfg(test)]
pub fn category_router(repository: Arc<dyn CategoryRepository>) -> Router {
    build_router(Arc::new(CategoryService::new(repository)), &test_config())
}

/// Test server over a fresh in-memory store, plus a handle to that store
#[cfg(test)]
pub fn category_test_server() -> (TestServer, Arc<InMemoryCategoryRepository>) {
    let repository = Arc::new(InMemoryCategoryRepository::new());
    let server = TestServer::new(category_router(repository.clone())).unwrap();
    (server, repository)
}
