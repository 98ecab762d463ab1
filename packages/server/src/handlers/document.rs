use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, body::Body};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::Utc;
use common::storage::ContentHash;
use sea_orm::*;
use tokio_util::io::ReaderStream;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{document, object_relation, usage_rights};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::lock::{self, LockState};
use crate::models::document::*;
use crate::state::AppState;
use crate::validation;

/// Body limit for document writes: base64 content arrives inline.
pub fn document_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(128 * 1024 * 1024) // 128 MB
}

#[utoipa::path(
    post,
    path = "/api/v1/documents",
    tag = "Documents",
    operation_id = "createDocument",
    summary = "Register a new document",
    description = "Registers a document with its binary content. The document starts unlocked; \
        supplying a lock token is rejected. When `confidentiality` is omitted it is resolved \
        from the document type's registered classification.",
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document registered", body = DocumentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR, LOCKED_AT_CREATE, MISSING_USAGE_RIGHTS)", body = ErrorBody),
        (status = 409, description = "Identification already in use (CONSTRAINT_VIOLATION)", body = ErrorBody),
        (status = 502, description = "Type catalog unavailable (CLASSIFICATION_RESOLUTION_FAILED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(identification = %payload.identification))]
pub async fn create_document(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateDocumentRequest>,
) -> Result<impl IntoResponse, AppError> {
    lock::validate_for_create(payload.lock.as_deref())?;
    validate_document_fields(
        &payload.identification,
        &payload.source_organization,
        &payload.language,
        &payload.title,
    )?;

    let indicator = payload.usage_rights_indicator.unwrap_or_default();
    // A brand-new document cannot have usage-rights records yet.
    validation::check_usage_indicator(indicator, false)?;
    validation::check_signature_status(payload.status, payload.signature.is_some())?;

    let content = decode_content(&payload.content)?;
    let size = content.len() as i64;
    let hash = state.blob_store.put(&content).await?;

    // Resolved before anything is persisted: a catalog failure must leave
    // no partial document behind.
    let confidentiality = match payload.confidentiality {
        Some(level) => level,
        None => state.catalog.confidentiality(&payload.document_type).await?,
    };

    let txn = state.db.begin().await?;

    let taken = document::Entity::find()
        .filter(document::Column::SourceOrganization.eq(&payload.source_organization))
        .filter(document::Column::Identification.eq(&payload.identification))
        .count(&txn)
        .await?
        > 0;
    if taken {
        return Err(AppError::ConstraintViolation(format!(
            "Identification '{}' is already in use by organization '{}'",
            payload.identification, payload.source_organization
        )));
    }

    let now = Utc::now();
    let new_document = document::ActiveModel {
        id: Set(Uuid::new_v4()),
        identification: Set(payload.identification),
        source_organization: Set(payload.source_organization),
        creation_date: Set(payload.creation_date),
        title: Set(payload.title.trim().to_string()),
        author: Set(payload.author),
        description: Set(payload.description),
        status: Set(payload.status),
        confidentiality: Set(confidentiality),
        format: Set(payload.format),
        language: Set(payload.language),
        filename: Set(payload.filename),
        content_hash: Set(hash.to_hex()),
        content_size: Set(size),
        received_date: Set(payload.received_date),
        sent_date: Set(payload.sent_date),
        lock: Set(None),
        usage_rights_indicator: Set(indicator),
        integrity_algorithm: Set(payload.integrity.as_ref().map(|i| i.algorithm)),
        integrity_value: Set(payload.integrity.as_ref().map(|i| i.value.clone())),
        integrity_date: Set(payload.integrity.as_ref().map(|i| i.date)),
        signature_kind: Set(payload.signature.as_ref().map(|s| s.kind)),
        signature_date: Set(payload.signature.as_ref().map(|s| s.date)),
        document_type: Set(payload.document_type),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = new_document.insert(&txn).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(DocumentResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/api/v1/documents",
    tag = "Documents",
    operation_id = "listDocuments",
    summary = "List registered documents",
    responses(
        (status = 200, description = "Document list", body = DocumentListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<DocumentListResponse>, AppError> {
    let documents = document::Entity::find()
        .order_by_desc(document::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let total = documents.len() as u64;
    let data = documents.into_iter().map(DocumentResponse::from).collect();

    Ok(Json(DocumentListResponse { data, total }))
}

#[utoipa::path(
    get,
    path = "/api/v1/documents/{id}",
    tag = "Documents",
    operation_id = "getDocument",
    summary = "Get a document by ID",
    params(("id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document details", body = DocumentResponse),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentResponse>, AppError> {
    let model = find_document(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/documents/{id}/download",
    tag = "Documents",
    operation_id = "downloadDocument",
    summary = "Download the binary content of a document",
    params(("id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document content"),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Content storage unavailable (STORAGE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let model = find_document(&state.db, id).await?;

    let hash = ContentHash::from_hex(&model.content_hash)?;
    let reader = state.blob_store.get_stream(&hash).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    let content_type = model
        .format
        .clone()
        .or_else(|| {
            model
                .filename
                .as_deref()
                .and_then(|name| mime_guess::from_path(name).first())
                .map(|m| m.to_string())
        })
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let filename = model.filename.as_deref().unwrap_or("content.bin");

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, model.content_size.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(filename),
        )
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))?;

    Ok(response)
}

#[utoipa::path(
    patch,
    path = "/api/v1/documents/{id}",
    tag = "Documents",
    operation_id = "updateDocument",
    summary = "Partially update a document",
    description = "Updates the provided fields. The document must be locked and the request must \
        carry the current lock token. The usage-rights indicator is validated against the \
        document's usage-rights records; the document type is immutable.",
    params(("id" = Uuid, Path, description = "Document ID")),
    request_body = UpdateDocumentRequest,
    responses(
        (status = 200, description = "Document updated", body = DocumentResponse),
        (status = 400, description = "Validation or lock error (VALIDATION_ERROR, UNLOCKED, LOCK_MISMATCH, MISSING_USAGE_RIGHTS, USAGE_RIGHTS_CONFLICT, IMMUTABLE_FIELD)", body = ErrorBody),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id))]
pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateDocumentRequest>,
) -> Result<Json<DocumentResponse>, AppError> {
    let txn = state.db.begin().await?;

    // Lock validation and the write happen in one transaction so a release
    // between the check and the update cannot slip in.
    let existing = find_document_for_update(&txn, id).await?;
    lock::validate_for_update(&LockState::of(&existing), payload.lock.as_deref())?;

    let indicator = payload
        .usage_rights_indicator
        .unwrap_or(existing.usage_rights_indicator);
    let rights_exist = validation::usage_rights_exist(&txn, existing.id).await?;
    validation::check_usage_indicator(indicator, rights_exist)?;

    let status = payload.status.unwrap_or(existing.status);
    let has_signature = match &payload.signature {
        Some(group) => group.is_some(),
        None => existing.signature_kind.is_some(),
    };
    validation::check_signature_status(status, has_signature)?;

    if let Some(ref document_type) = payload.document_type
        && *document_type != existing.document_type
    {
        return Err(AppError::ImmutableField("document_type"));
    }

    validate_document_fields(
        payload
            .identification
            .as_deref()
            .unwrap_or(&existing.identification),
        payload
            .source_organization
            .as_deref()
            .unwrap_or(&existing.source_organization),
        payload.language.as_deref().unwrap_or(&existing.language),
        payload.title.as_deref().unwrap_or(&existing.title),
    )?;

    let mut active: document::ActiveModel = existing.into();

    if let Some(identification) = payload.identification {
        active.identification = Set(identification);
    }
    if let Some(source_organization) = payload.source_organization {
        active.source_organization = Set(source_organization);
    }
    if let Some(creation_date) = payload.creation_date {
        active.creation_date = Set(creation_date);
    }
    if let Some(title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(author) = payload.author {
        active.author = Set(author);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    active.status = Set(status);
    if let Some(confidentiality) = payload.confidentiality {
        active.confidentiality = Set(confidentiality);
    }
    if let Some(format) = payload.format {
        active.format = Set(format);
    }
    if let Some(language) = payload.language {
        active.language = Set(language);
    }
    if let Some(filename) = payload.filename {
        active.filename = Set(filename);
    }
    if let Some(received_date) = payload.received_date {
        active.received_date = Set(received_date);
    }
    if let Some(sent_date) = payload.sent_date {
        active.sent_date = Set(sent_date);
    }
    active.usage_rights_indicator = Set(indicator);
    if let Some(integrity) = payload.integrity {
        active.integrity_algorithm = Set(integrity.as_ref().map(|i| i.algorithm));
        active.integrity_value = Set(integrity.as_ref().map(|i| i.value.clone()));
        active.integrity_date = Set(integrity.as_ref().map(|i| i.date));
    }
    if let Some(signature) = payload.signature {
        active.signature_kind = Set(signature.as_ref().map(|s| s.kind));
        active.signature_date = Set(signature.as_ref().map(|s| s.date));
    }
    if let Some(content_b64) = payload.content {
        let content = decode_content(&content_b64)?;
        let hash = state.blob_store.put(&content).await?;
        active.content_hash = Set(hash.to_hex());
        active.content_size = Set(content.len() as i64);
    }
    active.updated_at = Set(Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/documents/{id}",
    tag = "Documents",
    operation_id = "replaceDocument",
    summary = "Fully update a document",
    description = "Replaces all document fields; the payload shape matches creation, with `lock` \
        carrying the current lock token. Omitted optional groups (integrity, signature) are cleared.",
    params(("id" = Uuid, Path, description = "Document ID")),
    request_body = CreateDocumentRequest,
    responses(
        (status = 200, description = "Document replaced", body = DocumentResponse),
        (status = 400, description = "Validation or lock error", body = ErrorBody),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id))]
pub async fn replace_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<CreateDocumentRequest>,
) -> Result<Json<DocumentResponse>, AppError> {
    validate_document_fields(
        &payload.identification,
        &payload.source_organization,
        &payload.language,
        &payload.title,
    )?;

    let txn = state.db.begin().await?;

    let existing = find_document_for_update(&txn, id).await?;
    lock::validate_for_update(&LockState::of(&existing), payload.lock.as_deref())?;

    let indicator = payload.usage_rights_indicator.unwrap_or_default();
    let rights_exist = validation::usage_rights_exist(&txn, existing.id).await?;
    validation::check_usage_indicator(indicator, rights_exist)?;
    validation::check_signature_status(payload.status, payload.signature.is_some())?;

    if payload.document_type != existing.document_type {
        return Err(AppError::ImmutableField("document_type"));
    }

    // Full update: the classification must be supplied explicitly; it is
    // never re-resolved from the type catalog after creation.
    let confidentiality = payload
        .confidentiality
        .unwrap_or(existing.confidentiality);

    let content = decode_content(&payload.content)?;
    let size = content.len() as i64;
    let hash = state.blob_store.put(&content).await?;

    let mut active: document::ActiveModel = existing.into();
    active.identification = Set(payload.identification);
    active.source_organization = Set(payload.source_organization);
    active.creation_date = Set(payload.creation_date);
    active.title = Set(payload.title.trim().to_string());
    active.author = Set(payload.author);
    active.description = Set(payload.description);
    active.status = Set(payload.status);
    active.confidentiality = Set(confidentiality);
    active.format = Set(payload.format);
    active.language = Set(payload.language);
    active.filename = Set(payload.filename);
    active.content_hash = Set(hash.to_hex());
    active.content_size = Set(size);
    active.received_date = Set(payload.received_date);
    active.sent_date = Set(payload.sent_date);
    active.usage_rights_indicator = Set(indicator);
    active.integrity_algorithm = Set(payload.integrity.as_ref().map(|i| i.algorithm));
    active.integrity_value = Set(payload.integrity.as_ref().map(|i| i.value.clone()));
    active.integrity_date = Set(payload.integrity.as_ref().map(|i| i.date));
    active.signature_kind = Set(payload.signature.as_ref().map(|s| s.kind));
    active.signature_date = Set(payload.signature.as_ref().map(|s| s.date));
    active.updated_at = Set(Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/documents/{id}",
    tag = "Documents",
    operation_id = "deleteDocument",
    summary = "Delete a document",
    description = "Deletes a document, its usage-rights records and its stored content. Only \
        allowed while the document is unlocked and no object relations reference it.",
    params(("id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Locked or still related to objects (ALREADY_LOCKED, CONSTRAINT_VIOLATION)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    let existing = find_document_for_update(&txn, id).await?;
    if LockState::of(&existing).is_locked() {
        return Err(AppError::AlreadyLocked);
    }

    let relation_count = object_relation::Entity::find()
        .filter(object_relation::Column::DocumentId.eq(id))
        .count(&txn)
        .await?;
    if relation_count > 0 {
        return Err(AppError::ConstraintViolation(
            "Cannot delete a document that is still related to objects".into(),
        ));
    }

    usage_rights::Entity::delete_many()
        .filter(usage_rights::Column::DocumentId.eq(id))
        .exec(&txn)
        .await?;
    document::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    // The registry owns the content exclusively; clean it up best-effort
    // after the record is gone.
    match ContentHash::from_hex(&existing.content_hash) {
        Ok(hash) => {
            if let Err(e) = state.blob_store.delete(&hash).await {
                tracing::warn!("Failed to delete content blob {}: {e}", existing.content_hash);
            }
        }
        Err(e) => tracing::warn!("Stored content hash is invalid: {e}"),
    }

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/documents/{id}/lock",
    tag = "Documents",
    operation_id = "lockDocument",
    summary = "Check out a document for editing",
    description = "Acquires the edit lock and returns the token. Concurrent acquisitions on the \
        same document resolve to exactly one winner; all others receive ALREADY_LOCKED.",
    params(("id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Lock acquired", body = LockResponse),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Already locked (ALREADY_LOCKED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn lock_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LockResponse>, AppError> {
    let txn = state.db.begin().await?;

    let existing = find_document_for_update(&txn, id).await?;
    let token = lock::acquire(&txn, existing).await?;

    txn.commit().await?;

    Ok(Json(LockResponse { lock: token }))
}

#[utoipa::path(
    post,
    path = "/api/v1/documents/{id}/unlock",
    tag = "Documents",
    operation_id = "unlockDocument",
    summary = "Release a document's edit lock",
    description = "Releases the lock when the supplied token matches. `force` clears the lock \
        unconditionally and invalidates the outstanding token.",
    params(("id" = Uuid, Path, description = "Document ID")),
    request_body = UnlockRequest,
    responses(
        (status = 204, description = "Lock released"),
        (status = 400, description = "Token mismatch (LOCK_MISMATCH)", body = ErrorBody),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id, force = payload.force))]
pub async fn unlock_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UnlockRequest>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    let existing = find_document_for_update(&txn, id).await?;
    lock::release(&txn, existing, payload.lock.as_deref(), payload.force).await?;

    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn find_document<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<document::Model, AppError> {
    document::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".into()))
}

/// Select a document `FOR UPDATE`, serializing concurrent lock and write
/// attempts on the same row.
pub(crate) async fn find_document_for_update(
    txn: &DatabaseTransaction,
    id: Uuid,
) -> Result<document::Model, AppError> {
    use sea_orm::sea_query::LockType;
    document::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".into()))
}

fn decode_content(encoded: &str) -> Result<Vec<u8>, AppError> {
    BASE64
        .decode(encoded)
        .map_err(|e| AppError::Validation(format!("Content is not valid base64: {e}")))
}

fn validate_document_fields(
    identification: &str,
    source_organization: &str,
    language: &str,
    title: &str,
) -> Result<(), AppError> {
    if identification.is_empty() || identification.chars().count() > 40 {
        return Err(AppError::Validation(
            "Identification must be 1-40 characters".into(),
        ));
    }
    if !identification
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::Validation(
            "Identification may only contain ASCII letters, digits, '-' and '_'".into(),
        ));
    }
    if source_organization.len() != 9 || !source_organization.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Source organization must be a 9-digit RSIN".into(),
        ));
    }
    if language.len() != 3 || !language.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(AppError::Validation(
            "Language must be a lowercase ISO 639-2/B code".into(),
        ));
    }
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 200 {
        return Err(AppError::Validation("Title must be 1-200 characters".into()));
    }
    Ok(())
}

/// Build a safe `Content-Disposition` header value.
fn content_disposition_value(filename: &str) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let ascii_name = if ascii_safe.is_empty() {
        "content.bin".to_string()
    } else {
        ascii_safe
    };

    format!("attachment; filename=\"{ascii_name}\"")
}
