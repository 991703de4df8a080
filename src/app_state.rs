use std::sync::Arc;

use crate::{
    catalog::{CatalogApi, TmdbClient},
    config::Config,
    database::CommentDatabase,
    identity::{IdentityProvider, StoreIdentity},
};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<CommentDatabase>,
    pub catalog: Arc<dyn CatalogApi>,
    pub identity: Arc<dyn IdentityProvider>,
    pub config: Config,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Initialize storage
        let database = CommentDatabase::new(&config.database.url).await?;
        database.init().await?;
        let db = Arc::new(database);

        // Upstream catalog client, configured once at construction
        let catalog = Arc::new(TmdbClient::new(config.catalog.clone())?);

        // Identity resolution against the provider-owned session table
        let identity = Arc::new(StoreIdentity::new(db.clone()));

        Ok(Self {
            db,
            catalog,
            identity,
            config,
        })
    }
}
