#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Confidentiality classification of a document.
///
/// Levels are ordered from least to most restricted; `Ord` follows the
/// variant order, so `Confidentiality::Public < Confidentiality::Secret`.
/// When a document is created without an explicit level, the level
/// registered on its document type is applied.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in
/// SeaORM entities.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum Confidentiality {
    /// Freely accessible.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "public"))]
    Public,
    /// Public with restrictions on redistribution.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "restricted_public"))]
    RestrictedPublic,
    /// Visible within the owning organization only.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "internal"))]
    Internal,
    /// Restricted to participants of the related case.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "case_confidential"))]
    CaseConfidential,
    /// Restricted to named individuals.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "confidential"))]
    Confidential,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "secret"))]
    Secret,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "top_secret"))]
    TopSecret,
}

impl Confidentiality {
    /// All levels, least restricted first.
    pub const ALL: &'static [Confidentiality] = &[
        Self::Public,
        Self::RestrictedPublic,
        Self::Internal,
        Self::CaseConfidential,
        Self::Confidential,
        Self::Secret,
        Self::TopSecret,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::RestrictedPublic => "restricted_public",
            Self::Internal => "internal",
            Self::CaseConfidential => "case_confidential",
            Self::Confidential => "confidential",
            Self::Secret => "secret",
            Self::TopSecret => "top_secret",
        }
    }
}

impl fmt::Display for Confidentiality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an invalid confidentiality string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid confidentiality level '{0}'")]
pub struct ParseConfidentialityError(String);

impl FromStr for Confidentiality {
    type Err = ParseConfidentialityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|level| level.as_str() == s)
            .copied()
            .ok_or_else(|| ParseConfidentialityError(s.to_string()))
    }
}
