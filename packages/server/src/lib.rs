pub mod catalog;
pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod lock;
pub mod models;
pub mod policy;
pub mod routes;
pub mod seed;
pub mod state;
pub mod validation;

use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Document Registry API",
        version = "1.0.0",
        description = "Registry for documents, their relations to external objects, and \
            usage-rights declarations"
    ),
    paths(
        handlers::document::create_document,
        handlers::document::list_documents,
        handlers::document::get_document,
        handlers::document::download_document,
        handlers::document::update_document,
        handlers::document::replace_document,
        handlers::document::delete_document,
        handlers::document::lock_document,
        handlers::document::unlock_document,
        handlers::relation::create_relation,
        handlers::relation::list_relations,
        handlers::relation::get_relation,
        handlers::relation::update_relation,
        handlers::relation::delete_relation,
        handlers::usage_rights::create_usage_rights,
        handlers::usage_rights::list_usage_rights,
        handlers::usage_rights::get_usage_rights,
        handlers::usage_rights::update_usage_rights,
        handlers::usage_rights::delete_usage_rights,
    ),
    tags(
        (name = "Documents", description = "Document registration, content and locking"),
        (name = "Object Relations", description = "Links between documents and external objects"),
        (name = "Usage Rights", description = "Usage-rights declarations on documents"),
    )
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);

    axum::Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age))
}
