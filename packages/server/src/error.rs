use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;

use crate::catalog::CatalogError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`,
    /// `NOT_FOUND`, `ALREADY_LOCKED`, `UNLOCKED`, `LOCK_MISMATCH`,
    /// `LOCKED_AT_CREATE`, `MISSING_USAGE_RIGHTS`, `USAGE_RIGHTS_CONFLICT`,
    /// `DUPLICATE_RELATION`, `IMMUTABLE_FIELD`, `INVALID_RELATION_KIND`,
    /// `CLASSIFICATION_RESOLUTION_FAILED`, `CONSTRAINT_VIOLATION`,
    /// `STORAGE_UNAVAILABLE`, `INTERNAL_ERROR`.
    #[schema(example = "LOCK_MISMATCH")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Lock token does not match the current lock")]
    pub message: String,
}

/// Application-level error type.
///
/// Every variant maps to a rejection of the whole operation; nothing is
/// committed before an error is returned and nothing is retried internally.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    /// Lock acquisition on a document that already holds a token.
    AlreadyLocked,
    /// Mutation attempted while no lock is held.
    Unlocked,
    /// Supplied lock token does not match the stored one.
    LockMismatch,
    /// A lock token was supplied on create; documents start unlocked.
    LockedAtCreate,
    /// Indicator set to `yes` while no usage-rights records exist.
    MissingUsageRights,
    /// Indicator cleared while usage-rights records still exist.
    UsageRightsConflict,
    /// An identical (document, object) relation already exists.
    DuplicateRelation,
    /// Attempt to change a field that is immutable after creation.
    ImmutableField(&'static str),
    /// The relation kind is not allowed for the object type.
    InvalidRelationKind,
    /// The type catalog could not supply a confidentiality level.
    ClassificationResolution(String),
    /// A storage-layer uniqueness or integrity constraint was violated.
    ConstraintViolation(String),
    StorageUnavailable(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::AlreadyLocked => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "ALREADY_LOCKED",
                    message: "The document is already locked".into(),
                },
            ),
            AppError::Unlocked => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "UNLOCKED",
                    message: "An unlocked document cannot be modified".into(),
                },
            ),
            AppError::LockMismatch => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "LOCK_MISMATCH",
                    message: "Lock token does not match the current lock".into(),
                },
            ),
            AppError::LockedAtCreate => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "LOCKED_AT_CREATE",
                    message: "A document cannot be created in locked state".into(),
                },
            ),
            AppError::MissingUsageRights => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "MISSING_USAGE_RIGHTS",
                    message: "The indicator can only be set to 'yes' by creating a usage-rights record".into(),
                },
            ),
            AppError::UsageRightsConflict => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "USAGE_RIGHTS_CONFLICT",
                    message: "The indicator cannot be cleared while usage-rights records exist".into(),
                },
            ),
            AppError::DuplicateRelation => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "DUPLICATE_RELATION",
                    message: "This document is already related to the object".into(),
                },
            ),
            AppError::ImmutableField(field) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "IMMUTABLE_FIELD",
                    message: format!("Field '{field}' is immutable after creation"),
                },
            ),
            AppError::InvalidRelationKind => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "INVALID_RELATION_KIND",
                    message: "This relation kind is not allowed for the object type".into(),
                },
            ),
            AppError::ClassificationResolution(detail) => {
                tracing::warn!("Classification resolution failed: {detail}");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody {
                        code: "CLASSIFICATION_RESOLUTION_FAILED",
                        message: "Could not resolve the confidentiality of the document type".into(),
                    },
                )
            }
            AppError::ConstraintViolation(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONSTRAINT_VIOLATION",
                    message: msg,
                },
            ),
            AppError::StorageUnavailable(detail) => {
                tracing::error!("Blob storage unavailable: {detail}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorBody {
                        code: "STORAGE_UNAVAILABLE",
                        message: "Content storage is temporarily unavailable".into(),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                AppError::ConstraintViolation(format!("Unique constraint violated: {detail}"))
            }
            _ => AppError::Internal(err.to_string()),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(hash) => {
                AppError::NotFound(format!("Content blob {hash} not found"))
            }
            StorageError::InvalidHash(msg) => AppError::Internal(format!("Invalid content hash: {msg}")),
            StorageError::SizeLimitExceeded { actual, limit } => AppError::Validation(format!(
                "Content exceeds maximum size ({actual} > {limit} bytes)"
            )),
            StorageError::Unavailable(e) => AppError::StorageUnavailable(e.to_string()),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::ClassificationResolution(err.to_string())
    }
}
