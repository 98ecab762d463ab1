use sea_orm::*;
use sea_query::{Index, PostgresQueryBuilder};
use tracing::info;

use crate::entity::{document, object_relation};

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite unique indexes, so we
/// create them manually on startup. These are the authoritative guards for
/// the uniqueness rules; the handlers' pre-checks only exist to produce
/// friendlier errors.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // A document identification is unique within its issuing organization.
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_document_org_identification")
        .table(document::Entity)
        .col(document::Column::SourceOrganization)
        .col(document::Column::Identification)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => info!("Ensured index idx_document_org_identification exists"),
        Err(e) => {
            tracing::warn!("Failed to create index idx_document_org_identification: {}", e);
        }
    }

    // A document can be related to an object at most once.
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_relation_document_object")
        .table(object_relation::Entity)
        .col(object_relation::Column::DocumentId)
        .col(object_relation::Column::Object)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => info!("Ensured index idx_relation_document_object exists"),
        Err(e) => {
            tracing::warn!("Failed to create index idx_relation_document_object: {}", e);
        }
    }

    Ok(())
}
