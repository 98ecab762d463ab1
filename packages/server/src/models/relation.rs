use chrono::{DateTime, Utc};
use common::{ObjectType, RelationKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::object_relation;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateRelationRequest {
    /// ID of the document being related.
    pub document: Uuid,
    /// URL of the external object.
    #[schema(example = "https://cases.example.org/api/v1/cases/7c6e5d44")]
    pub object: String,
    pub object_type: ObjectType,
    pub relation_kind: RelationKind,
}

/// PATCH payload. All relation fields are immutable; supplying a changed
/// value is rejected, supplying the stored value is a no-op.
#[derive(Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct UpdateRelationRequest {
    pub document: Option<Uuid>,
    pub object: Option<String>,
    pub object_type: Option<ObjectType>,
    pub relation_kind: Option<RelationKind>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RelationResponse {
    pub id: Uuid,
    pub document: Uuid,
    pub object: String,
    pub object_type: ObjectType,
    pub relation_kind: RelationKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RelationListResponse {
    pub data: Vec<RelationResponse>,
    pub total: u64,
}

impl From<object_relation::Model> for RelationResponse {
    fn from(model: object_relation::Model) -> Self {
        Self {
            id: model.id,
            document: model.document_id,
            object: model.object,
            object_type: model.object_type,
            relation_kind: model.relation_kind,
            created_at: model.created_at,
        }
    }
}
