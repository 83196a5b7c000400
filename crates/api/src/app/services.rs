use std::sync::Arc;

use catalog_infra::{InMemoryProductStore, PostgresProductStore};
use catalog_products::ProductStore;

use crate::config::StoreConfig;

/// Long-lived handles shared by every request.
///
/// Built once at startup and injected into the router; handlers never reach
/// a store through globals.
#[derive(Clone)]
pub enum AppServices {
    InMemory {
        store: Arc<InMemoryProductStore>,
    },
    Persistent {
        store: Arc<PostgresProductStore>,
    },
}

impl AppServices {
    /// Fresh, empty in-memory table (dev/test).
    pub fn in_memory() -> Self {
        AppServices::InMemory {
            store: Arc::new(InMemoryProductStore::new()),
        }
    }

    /// Shared handle to whichever store backs this process.
    pub fn store(&self) -> Arc<dyn ProductStore> {
        match self {
            AppServices::InMemory { store } => store.clone() as Arc<dyn ProductStore>,
            AppServices::Persistent { store } => store.clone(),
        }
    }

    /// Release the connection pool, if any.
    pub async fn shutdown(&self) {
        if let AppServices::Persistent { store } = self {
            store.close().await;
        }
    }
}

pub async fn build_services(config: &StoreConfig) -> anyhow::Result<AppServices> {
    match config {
        StoreConfig::InMemory => {
            tracing::info!("using in-memory product store");
            Ok(AppServices::in_memory())
        }
        StoreConfig::Postgres { database_url, max_connections } => {
            tracing::info!(max_connections, "connecting to postgres product store");
            let store = PostgresProductStore::connect(database_url, *max_connections).await?;
            store.ensure_schema().await?;
            Ok(AppServices::Persistent {
                store: Arc::new(store),
            })
        }
    }
}
