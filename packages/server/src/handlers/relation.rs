use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::object_relation;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::document::find_document;
use crate::models::relation::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/object-relations",
    tag = "Object Relations",
    operation_id = "createRelation",
    summary = "Relate a document to an external object",
    description = "Creates the link between a document and an external object. A document can be \
        related to a given object at most once; the relation kind must be allowed for the \
        object type.",
    request_body = CreateRelationRequest,
    responses(
        (status = 201, description = "Relation created", body = RelationResponse),
        (status = 400, description = "Invalid relation kind (INVALID_RELATION_KIND, VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Relation already exists (DUPLICATE_RELATION)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(document = %payload.document, object = %payload.object))]
pub async fn create_relation(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRelationRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.object.is_empty() {
        return Err(AppError::Validation("Object URL must not be empty".into()));
    }
    if !state
        .relation_policy
        .is_valid(payload.object_type, payload.relation_kind)
    {
        return Err(AppError::InvalidRelationKind);
    }

    find_document(&state.db, payload.document).await?;

    let txn = state.db.begin().await?;

    // Pre-check for a friendly error; the unique index is the real guard.
    let duplicate = object_relation::Entity::find()
        .filter(object_relation::Column::DocumentId.eq(payload.document))
        .filter(object_relation::Column::Object.eq(&payload.object))
        .count(&txn)
        .await?
        > 0;
    if duplicate {
        return Err(AppError::DuplicateRelation);
    }

    let new_relation = object_relation::ActiveModel {
        id: Set(Uuid::new_v4()),
        document_id: Set(payload.document),
        object: Set(payload.object),
        object_type: Set(payload.object_type),
        relation_kind: Set(payload.relation_kind),
        created_at: Set(Utc::now()),
    };

    let model = new_relation.insert(&txn).await.map_err(|e| {
        // A concurrent insert can still hit the unique index.
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateRelation,
            _ => e.into(),
        }
    })?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(RelationResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/api/v1/object-relations",
    tag = "Object Relations",
    operation_id = "listRelations",
    summary = "List object relations",
    responses(
        (status = 200, description = "Relation list", body = RelationListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_relations(
    State(state): State<AppState>,
) -> Result<Json<RelationListResponse>, AppError> {
    let relations = object_relation::Entity::find()
        .order_by_asc(object_relation::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let total = relations.len() as u64;
    let data = relations.into_iter().map(RelationResponse::from).collect();

    Ok(Json(RelationListResponse { data, total }))
}

#[utoipa::path(
    get,
    path = "/api/v1/object-relations/{id}",
    tag = "Object Relations",
    operation_id = "getRelation",
    summary = "Get an object relation by ID",
    params(("id" = Uuid, Path, description = "Relation ID")),
    responses(
        (status = 200, description = "Relation details", body = RelationResponse),
        (status = 404, description = "Relation not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_relation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RelationResponse>, AppError> {
    let model = find_relation(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/object-relations/{id}",
    tag = "Object Relations",
    operation_id = "updateRelation",
    summary = "Update an object relation",
    description = "All relation fields are immutable after creation; supplying a changed value \
        for any of them is rejected with IMMUTABLE_FIELD. Relations carry no lock of their own.",
    params(("id" = Uuid, Path, description = "Relation ID")),
    request_body = UpdateRelationRequest,
    responses(
        (status = 200, description = "Relation unchanged", body = RelationResponse),
        (status = 400, description = "Immutable field modified (IMMUTABLE_FIELD)", body = ErrorBody),
        (status = 404, description = "Relation not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id))]
pub async fn update_relation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateRelationRequest>,
) -> Result<Json<RelationResponse>, AppError> {
    let existing = find_relation(&state.db, id).await?;

    if payload.document.is_some_and(|d| d != existing.document_id) {
        return Err(AppError::ImmutableField("document"));
    }
    if payload
        .object
        .as_ref()
        .is_some_and(|o| *o != existing.object)
    {
        return Err(AppError::ImmutableField("object"));
    }
    if payload
        .object_type
        .is_some_and(|t| t != existing.object_type)
    {
        return Err(AppError::ImmutableField("object_type"));
    }
    if payload
        .relation_kind
        .is_some_and(|k| k != existing.relation_kind)
    {
        return Err(AppError::ImmutableField("relation_kind"));
    }

    Ok(Json(existing.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/object-relations/{id}",
    tag = "Object Relations",
    operation_id = "deleteRelation",
    summary = "Delete an object relation",
    params(("id" = Uuid, Path, description = "Relation ID")),
    responses(
        (status = 204, description = "Relation deleted"),
        (status = 404, description = "Relation not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn delete_relation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    find_relation(&state.db, id).await?;

    object_relation::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_relation<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<object_relation::Model, AppError> {
    object_relation::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Object relation not found".into()))
}
