#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of the external object a document is related to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    /// A case in a case-management system.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "case"))]
    Case,
    /// A formal decision.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "decision"))]
    Decision,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Case => "case",
            Self::Decision => "decision",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nature of the link between a document and an external object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// The document belongs to the object.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "belongs_to"))]
    BelongsTo,
    /// The document establishes (records) the object.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "establishes"))]
    Establishes,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BelongsTo => "belongs_to",
            Self::Establishes => "establishes",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
