use common::{ChecksumAlgorithm, Confidentiality, DocumentStatus, SignatureKind, UsageIndicator};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Human-readable identifier, unique within the issuing organization
    /// (composite unique index, see `seed::ensure_indexes`).
    pub identification: String,

    /// Identifier (RSIN) of the organization that created the document.
    pub source_organization: String,

    pub creation_date: Date,
    pub title: String,
    pub author: String,
    pub description: Option<String>,

    pub status: DocumentStatus,
    pub confidentiality: Confidentiality,

    /// File format designation (usually a MIME type).
    pub format: Option<String>,

    /// ISO 639-2/B language code of the content.
    pub language: String,

    pub filename: Option<String>,

    /// SHA-256 of the stored content; key into the blob store.
    pub content_hash: String,

    /// Denormalized content size in bytes, recorded at write time.
    pub content_size: i64,

    pub received_date: Option<Date>,
    pub sent_date: Option<Date>,

    /// Checkout token. NULL means the document is not checked out.
    pub lock: Option<String>,

    pub usage_rights_indicator: UsageIndicator,

    // Integrity group: present as a whole or not at all.
    pub integrity_algorithm: Option<ChecksumAlgorithm>,
    pub integrity_value: Option<String>,
    pub integrity_date: Option<Date>,

    // Signature group: present as a whole or not at all.
    pub signature_kind: Option<SignatureKind>,
    pub signature_date: Option<Date>,

    /// URL of the document type in the external type catalog. Immutable.
    pub document_type: String,

    #[sea_orm(has_many)]
    pub relations: HasMany<super::object_relation::Entity>,

    #[sea_orm(has_many)]
    pub usage_rights: HasMany<super::usage_rights::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
