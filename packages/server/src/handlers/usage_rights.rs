use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use common::UsageIndicator;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{document, usage_rights};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::document::find_document_for_update;
use crate::models::usage_rights::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/usage-rights",
    tag = "Usage Rights",
    operation_id = "createUsageRights",
    summary = "Declare usage rights for a document",
    description = "Creates a usage-rights record and, in the same transaction, sets the \
        document's usage-rights indicator to `yes`. This is the only way the indicator can \
        become `yes`.",
    request_body = CreateUsageRightsRequest,
    responses(
        (status = 201, description = "Usage rights declared", body = UsageRightsResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(document = %payload.document))]
pub async fn create_usage_rights(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUsageRightsRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_period(payload.start_date, payload.end_date)?;

    let txn = state.db.begin().await?;

    // Row-lock the document so the indicator write cannot race a
    // concurrent document update.
    let doc = find_document_for_update(&txn, payload.document).await?;

    let new_rights = usage_rights::ActiveModel {
        id: Set(Uuid::new_v4()),
        document_id: Set(doc.id),
        start_date: Set(payload.start_date),
        end_date: Set(payload.end_date),
        conditions: Set(payload.conditions),
        created_at: Set(Utc::now()),
    };
    let model = new_rights.insert(&txn).await?;

    let mut active: document::ActiveModel = doc.into();
    active.usage_rights_indicator = Set(UsageIndicator::Yes);
    active.updated_at = Set(Utc::now());
    active.update(&txn).await?;

    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(UsageRightsResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/api/v1/usage-rights",
    tag = "Usage Rights",
    operation_id = "listUsageRights",
    summary = "List usage-rights records",
    responses(
        (status = 200, description = "Usage-rights list", body = UsageRightsListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_usage_rights(
    State(state): State<AppState>,
) -> Result<Json<UsageRightsListResponse>, AppError> {
    let records = usage_rights::Entity::find()
        .order_by_asc(usage_rights::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let total = records.len() as u64;
    let data = records.into_iter().map(UsageRightsResponse::from).collect();

    Ok(Json(UsageRightsListResponse { data, total }))
}

#[utoipa::path(
    get,
    path = "/api/v1/usage-rights/{id}",
    tag = "Usage Rights",
    operation_id = "getUsageRights",
    summary = "Get a usage-rights record by ID",
    params(("id" = Uuid, Path, description = "Usage-rights ID")),
    responses(
        (status = 200, description = "Usage-rights details", body = UsageRightsResponse),
        (status = 404, description = "Record not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_usage_rights(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UsageRightsResponse>, AppError> {
    let model = find_usage_rights(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/usage-rights/{id}",
    tag = "Usage Rights",
    operation_id = "updateUsageRights",
    summary = "Update a usage-rights record",
    description = "Updates the validity period or conditions. The document reference is \
        immutable.",
    params(("id" = Uuid, Path, description = "Usage-rights ID")),
    request_body = UpdateUsageRightsRequest,
    responses(
        (status = 200, description = "Usage rights updated", body = UsageRightsResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR, IMMUTABLE_FIELD)", body = ErrorBody),
        (status = 404, description = "Record not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id))]
pub async fn update_usage_rights(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateUsageRightsRequest>,
) -> Result<Json<UsageRightsResponse>, AppError> {
    let txn = state.db.begin().await?;

    let existing = find_usage_rights(&txn, id).await?;

    if payload.document.is_some_and(|d| d != existing.document_id) {
        return Err(AppError::ImmutableField("document"));
    }

    let start_date = payload.start_date.unwrap_or(existing.start_date);
    let end_date = match payload.end_date {
        Some(end_date) => end_date,
        None => existing.end_date,
    };
    validate_period(start_date, end_date)?;

    let mut active: usage_rights::ActiveModel = existing.into();
    active.start_date = Set(start_date);
    active.end_date = Set(end_date);
    if let Some(conditions) = payload.conditions {
        active.conditions = Set(conditions);
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/usage-rights/{id}",
    tag = "Usage Rights",
    operation_id = "deleteUsageRights",
    summary = "Delete a usage-rights record",
    description = "Removes the record. When it was the document's last one, the document's \
        usage-rights indicator is reset to `unknown` in the same transaction.",
    params(("id" = Uuid, Path, description = "Usage-rights ID")),
    responses(
        (status = 204, description = "Usage rights deleted"),
        (status = 404, description = "Record not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn delete_usage_rights(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    let existing = find_usage_rights(&txn, id).await?;
    let doc = find_document_for_update(&txn, existing.document_id).await?;

    usage_rights::Entity::delete_by_id(existing.id)
        .exec(&txn)
        .await?;

    let remaining = usage_rights::Entity::find()
        .filter(usage_rights::Column::DocumentId.eq(doc.id))
        .count(&txn)
        .await?;
    if remaining == 0 {
        let mut active: document::ActiveModel = doc.into();
        active.usage_rights_indicator = Set(UsageIndicator::Unknown);
        active.updated_at = Set(Utc::now());
        active.update(&txn).await?;
    }

    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_usage_rights<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<usage_rights::Model, AppError> {
    usage_rights::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Usage-rights record not found".into()))
}

fn validate_period(
    start_date: chrono::NaiveDate,
    end_date: Option<chrono::NaiveDate>,
) -> Result<(), AppError> {
    if let Some(end_date) = end_date
        && end_date < start_date
    {
        return Err(AppError::Validation(
            "End date must not precede the start date".into(),
        ));
    }
    Ok(())
}
