use chrono::{DateTime, NaiveDate, Utc};
use common::{
    ChecksumAlgorithm, Confidentiality, DocumentStatus, SignatureKind, UsageIndicator,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::document;
use crate::models::shared::double_option;

/// Integrity assertion over the document content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct IntegrityBody {
    pub algorithm: ChecksumAlgorithm,
    /// Checksum value in the algorithm's canonical text form.
    #[schema(example = "3f786850e387550fdab836ed7e6dc881de23001b")]
    pub value: String,
    /// Date the checksum was computed.
    pub date: NaiveDate,
}

/// Signature placed on the document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SignatureBody {
    pub kind: SignatureKind,
    pub date: NaiveDate,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateDocumentRequest {
    /// Identifier unique within the source organization.
    #[schema(example = "DOC-2026-0001")]
    pub identification: String,
    /// RSIN of the organization that created the document.
    #[schema(example = "123456782")]
    pub source_organization: String,
    pub creation_date: NaiveDate,
    #[schema(example = "Jaarverslag 2025")]
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub status: DocumentStatus,
    /// Defaults to the level registered on the document type when omitted.
    pub confidentiality: Option<Confidentiality>,
    /// Format designation, usually a MIME type.
    #[schema(example = "application/pdf")]
    pub format: Option<String>,
    /// ISO 639-2/B language code.
    #[schema(example = "dut")]
    pub language: String,
    pub filename: Option<String>,
    /// Base64-encoded binary content.
    pub content: String,
    pub received_date: Option<NaiveDate>,
    pub sent_date: Option<NaiveDate>,
    pub usage_rights_indicator: Option<UsageIndicator>,
    pub integrity: Option<IntegrityBody>,
    pub signature: Option<SignatureBody>,
    /// URL of the document type in the type catalog.
    pub document_type: String,
    /// Must be absent: a document cannot be created in locked state. On a
    /// full update (PUT) this carries the lock token instead.
    pub lock: Option<String>,
}

/// PATCH payload. Absent fields are left untouched; nullable fields accept
/// an explicit `null` to clear.
#[derive(Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct UpdateDocumentRequest {
    /// Lock token obtained from the lock endpoint. Required: an unlocked
    /// document cannot be modified.
    pub lock: Option<String>,
    pub identification: Option<String>,
    pub source_organization: Option<String>,
    pub creation_date: Option<NaiveDate>,
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub status: Option<DocumentStatus>,
    pub confidentiality: Option<Confidentiality>,
    #[serde(deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub format: Option<Option<String>>,
    pub language: Option<String>,
    #[serde(deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub filename: Option<Option<String>>,
    /// Base64-encoded binary content; replaces the stored content.
    pub content: Option<String>,
    #[serde(deserialize_with = "double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub received_date: Option<Option<NaiveDate>>,
    #[serde(deserialize_with = "double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub sent_date: Option<Option<NaiveDate>>,
    pub usage_rights_indicator: Option<UsageIndicator>,
    #[serde(deserialize_with = "double_option")]
    #[schema(value_type = Option<IntegrityBody>)]
    pub integrity: Option<Option<IntegrityBody>>,
    #[serde(deserialize_with = "double_option")]
    #[schema(value_type = Option<SignatureBody>)]
    pub signature: Option<Option<SignatureBody>>,
    pub document_type: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UnlockRequest {
    /// Token obtained from the lock endpoint. Ignored when `force` is set.
    pub lock: Option<String>,
    /// Administrative override: clear the lock regardless of the token.
    #[serde(default)]
    pub force: bool,
}

/// Response DTO for the lock endpoint. The token is returned exactly once.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LockResponse {
    #[schema(example = "f81d4fae7dec11d0a76500a0c91e6bf6")]
    pub lock: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub identification: String,
    pub source_organization: String,
    pub creation_date: NaiveDate,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub status: DocumentStatus,
    pub confidentiality: Confidentiality,
    pub format: Option<String>,
    pub language: String,
    pub filename: Option<String>,
    /// SHA-256 of the stored content.
    pub content_hash: String,
    /// Content size in bytes.
    pub content_size: i64,
    pub received_date: Option<NaiveDate>,
    pub sent_date: Option<NaiveDate>,
    /// Whether the document is currently checked out. The token itself is
    /// only ever revealed to the caller that acquired it.
    pub locked: bool,
    pub usage_rights_indicator: UsageIndicator,
    pub integrity: Option<IntegrityBody>,
    pub signature: Option<SignatureBody>,
    pub document_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DocumentListResponse {
    pub data: Vec<DocumentResponse>,
    pub total: u64,
}

impl From<document::Model> for DocumentResponse {
    fn from(model: document::Model) -> Self {
        let integrity = match (
            model.integrity_algorithm,
            model.integrity_value,
            model.integrity_date,
        ) {
            (Some(algorithm), Some(value), Some(date)) => Some(IntegrityBody {
                algorithm,
                value,
                date,
            }),
            _ => None,
        };
        let signature = match (model.signature_kind, model.signature_date) {
            (Some(kind), Some(date)) => Some(SignatureBody { kind, date }),
            _ => None,
        };

        Self {
            id: model.id,
            identification: model.identification,
            source_organization: model.source_organization,
            creation_date: model.creation_date,
            title: model.title,
            author: model.author,
            description: model.description,
            status: model.status,
            confidentiality: model.confidentiality,
            format: model.format,
            language: model.language,
            filename: model.filename,
            content_hash: model.content_hash,
            content_size: model.content_size,
            received_date: model.received_date,
            sent_date: model.sent_date,
            locked: model.lock.as_deref().is_some_and(|t| !t.is_empty()),
            usage_rights_indicator: model.usage_rights_indicator,
            integrity,
            signature,
            document_type: model.document_type,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
