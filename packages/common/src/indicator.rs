#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether usage rights apply to a document.
///
/// This is a derived signal: it may only become `Yes` as a side effect of a
/// usage-rights record being created, and it must not contradict the set of
/// usage-rights records that exist for the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum UsageIndicator {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "yes"))]
    Yes,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "no"))]
    No,
    /// Not yet evaluated. The default for new documents.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "unknown"))]
    Unknown,
}

impl Default for UsageIndicator {
    fn default() -> Self {
        Self::Unknown
    }
}

impl UsageIndicator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UsageIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
