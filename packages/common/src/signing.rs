#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};

/// How a document was signed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum SignatureKind {
    /// Wet-ink signature on the physical original.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "analog"))]
    Analog,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "digital"))]
    Digital,
    /// PKI-based qualified signature.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "pki"))]
    Pki,
}

/// Algorithm used for a document's integrity checksum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumAlgorithm {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "crc_32"))]
    Crc32,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "md5"))]
    Md5,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "sha_1"))]
    Sha1,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "sha_256"))]
    Sha256,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "sha_512"))]
    Sha512,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "hmac"))]
    Hmac,
}
