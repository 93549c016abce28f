//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domains::auth::JwtService;
use crate::kernel::ServerDeps;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    approve_object, approve_site, create_archaeologist, create_figure, create_kingdom,
    create_research_link, delete_object, delete_research_link, delete_site, health_handler,
    list_archaeologists, list_archaeologists_for_site, list_figures, list_kingdoms,
    list_pending_objects, list_pending_sites, list_verified_objects_for_site, list_verified_sites,
    reject_object, reject_site, submit_object, submit_site, update_archaeologist,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: ServerDeps,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, jwt_service: Arc<JwtService>, allowed_origins: &[String]) -> Router {
    let deps = ServerDeps::new(pool.clone(), jwt_service.clone());

    let app_state = AppState {
        db_pool: pool,
        deps,
    };

    Router::new()
        .route("/health", get(health_handler))
        // Sites
        .route("/api/sites", post(submit_site))
        .route("/api/sites/verified", get(list_verified_sites))
        .route("/api/sites/pending", get(list_pending_sites))
        .route("/api/sites/approve/:id", put(approve_site))
        .route("/api/sites/reject/:id", put(reject_site))
        .route("/api/sites/:id", delete(delete_site))
        // Found objects
        .route("/api/objects", post(submit_object))
        .route(
            "/api/objects/verified/by-site/:id",
            get(list_verified_objects_for_site),
        )
        .route("/api/objects/pending", get(list_pending_objects))
        .route("/api/objects/approve/:id", put(approve_object))
        .route("/api/objects/reject/:id", put(reject_object))
        .route("/api/objects/:id", delete(delete_object))
        // Research links
        .route("/api/research/by-site/:id", get(list_archaeologists_for_site))
        .route(
            "/api/research",
            post(create_research_link).delete(delete_research_link),
        )
        // Reference data
        .route("/api/kingdoms", get(list_kingdoms).post(create_kingdom))
        .route(
            "/api/archaeologists",
            get(list_archaeologists).post(create_archaeologist),
        )
        .route("/api/archaeologists/:id", put(update_archaeologist))
        .route("/api/figures", get(list_figures).post(create_figure))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
