//! Cross-entity validation rules shared by several write paths.

use common::{DocumentStatus, UsageIndicator};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use crate::entity::usage_rights;
use crate::error::AppError;

/// Check a document's usage-rights indicator against the usage-rights
/// records that exist for it.
///
/// The indicator is a derived signal: `yes` is only valid while at least
/// one record exists (and is set as a side effect of creating one), and it
/// cannot be cleared while records remain. Invoked from both the document
/// create/update paths and the usage-rights paths.
pub fn check_usage_indicator(
    indicator: UsageIndicator,
    rights_exist: bool,
) -> Result<(), AppError> {
    match indicator {
        UsageIndicator::Yes if !rights_exist => Err(AppError::MissingUsageRights),
        UsageIndicator::No | UsageIndicator::Unknown if rights_exist => {
            Err(AppError::UsageRightsConflict)
        }
        _ => Ok(()),
    }
}

pub async fn usage_rights_exist<C: ConnectionTrait>(
    db: &C,
    document_id: Uuid,
) -> Result<bool, AppError> {
    let count = usage_rights::Entity::find()
        .filter(usage_rights::Column::DocumentId.eq(document_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// A signature may only be present once the document has left the drafting
/// statuses.
pub fn check_signature_status(
    status: DocumentStatus,
    has_signature: bool,
) -> Result<(), AppError> {
    if has_signature && status.forbids_signature() {
        return Err(AppError::Validation(format!(
            "A signature is not allowed while the status is '{status}'"
        )));
    }
    Ok(())
}
