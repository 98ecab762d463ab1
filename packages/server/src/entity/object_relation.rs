use common::{ObjectType, RelationKind};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "object_relation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub document_id: Uuid,

    #[sea_orm(belongs_to, from = "document_id", to = "id")]
    pub document: BelongsTo<super::document::Entity>,

    /// URL of the related object in its own registry. Immutable, and unique
    /// per document (composite unique index, see `seed::ensure_indexes`).
    pub object: String,

    pub object_type: ObjectType,
    pub relation_kind: RelationKind,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
