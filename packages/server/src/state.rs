use std::sync::Arc;

use common::storage::BlobStore;
use sea_orm::DatabaseConnection;

use crate::catalog::DocumentTypeCatalog;
use crate::config::AppConfig;
use crate::policy::RelationPolicy;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub blob_store: Arc<dyn BlobStore>,
    pub catalog: Arc<dyn DocumentTypeCatalog>,
    pub relation_policy: Arc<dyn RelationPolicy>,
    pub config: AppConfig,
}
