use std::sync::Arc;

use super::{
    config::Config,
    database::{RedisStore, init_redis},
    error::StoreError,
    store::Store,
};

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub async fn new() -> Result<Arc<Self>, StoreError> {
        let config = Config::load();

        let redis_connection = init_redis(&config.redis_url).await?;
        let store = Arc::new(RedisStore::new(redis_connection));

        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Config, store: Arc<dyn Store>) -> Arc<Self> {
        Arc::new(Self { config, store })
    }
}
