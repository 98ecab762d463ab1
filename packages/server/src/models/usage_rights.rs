use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::usage_rights;
use crate::models::shared::double_option;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateUsageRightsRequest {
    /// ID of the document the rights apply to.
    pub document: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Conditions under which the document may be used.
    pub conditions: String,
}

/// PATCH payload. The document reference is immutable.
#[derive(Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct UpdateUsageRightsRequest {
    pub document: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    #[serde(deserialize_with = "double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub end_date: Option<Option<NaiveDate>>,
    pub conditions: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UsageRightsResponse {
    pub id: Uuid,
    pub document: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub conditions: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UsageRightsListResponse {
    pub data: Vec<UsageRightsResponse>,
    pub total: u64,
}

impl From<usage_rights::Model> for UsageRightsResponse {
    fn from(model: usage_rights::Model) -> Self {
        Self {
            id: model.id,
            document: model.document_id,
            start_date: model.start_date,
            end_date: model.end_date,
            conditions: model.conditions,
            created_at: model.created_at,
        }
    }
}
