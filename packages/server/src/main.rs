use std::net::SocketAddr;
use std::sync::Arc;

use common::storage::filesystem::FilesystemBlobStore;
use tracing::{Level, info};

use server::catalog::HttpDocumentTypeCatalog;
use server::config::AppConfig;
use server::policy::PermissiveRelationPolicy;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = server::database::init_db(&config.database.url).await?;
    server::seed::ensure_indexes(&db).await?;

    let blob_store = FilesystemBlobStore::open(
        config.storage.root.clone(),
        config.storage.max_content_size,
    )
    .await?;
    let catalog = HttpDocumentTypeCatalog::new(&config.catalog)?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let state = AppState {
        db,
        blob_store: Arc::new(blob_store),
        catalog: Arc::new(catalog),
        relation_policy: Arc::new(PermissiveRelationPolicy),
        config,
    };

    let app = server::build_router(state);

    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
