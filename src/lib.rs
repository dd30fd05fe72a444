pub mod config;
pub mod domain;
pub mod store;
pub mod telemetry;
pub mod http;

pub use config::{Backend, Config};
pub use domain::*;
pub use store::{MemoryStore, MessageStore, MongoStore, StoreError};
pub use telemetry::{init_tracing, Telemetry};
pub use http::{metrics_router, router, HttpState};

use std::sync::Arc;

/// Build the configured backend. Nothing here touches the network.
pub async fn build_store(config: &Config) -> Result<Arc<dyn MessageStore>, StoreError> {
    match config.backend {
        Backend::Memory => Ok(Arc::new(MemoryStore::new())),
        Backend::Mongo => {
            let store = MongoStore::connect(&config.mongo_url, &config.database, &config.collection, config.mongo_timeout).await?;
            Ok(Arc::new(store))
        }
    }
}
