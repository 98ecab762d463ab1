use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/documents", document_routes())
        .nest("/object-relations", relation_routes())
        .nest("/usage-rights", usage_rights_routes())
}

fn document_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::document::list_documents).post(handlers::document::create_document),
        )
        .route(
            "/{id}",
            get(handlers::document::get_document)
                .patch(handlers::document::update_document)
                .put(handlers::document::replace_document)
                .delete(handlers::document::delete_document),
        )
        .route("/{id}/download", get(handlers::document::download_document))
        .route("/{id}/lock", post(handlers::document::lock_document))
        .route("/{id}/unlock", post(handlers::document::unlock_document))
        .layer(handlers::document::document_body_limit())
}

fn relation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::relation::list_relations).post(handlers::relation::create_relation),
        )
        .route(
            "/{id}",
            get(handlers::relation::get_relation)
                .patch(handlers::relation::update_relation)
                .delete(handlers::relation::delete_relation),
        )
}

fn usage_rights_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::usage_rights::list_usage_rights)
                .post(handlers::usage_rights::create_usage_rights),
        )
        .route(
            "/{id}",
            get(handlers::usage_rights::get_usage_rights)
                .patch(handlers::usage_rights::update_usage_rights)
                .delete(handlers::usage_rights::delete_usage_rights),
        )
}
