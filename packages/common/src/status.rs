#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Still being drafted by the author.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "in_progress"))]
    InProgress,
    /// Complete, awaiting formal adoption.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "for_adoption"))]
    ForAdoption,
    /// Formally adopted.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "definitive"))]
    Definitive,
    /// Moved to the archive.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "archived"))]
    Archived,
}

impl DocumentStatus {
    /// Statuses in which a signature sub-structure must be absent.
    pub fn forbids_signature(&self) -> bool {
        matches!(self, Self::InProgress | Self::ForAdoption)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::ForAdoption => "for_adoption",
            Self::Definitive => "definitive",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
