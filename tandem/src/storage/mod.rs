//! Storage abstractions and implementations
//!
//! This module provides trait definitions for the user and friend-request
//! stores plus the embedded SurrealDB implementation used by both the
//! in-memory (testing) and RocksDB (durable) engines.

pub mod errors;
pub mod filters;
pub mod surreal;
pub mod traits;

pub use errors::{StorageError, StorageResult};
pub use filters::{RequestFilter, UserFilter};
pub use surreal::{DocumentStore, EmbeddedDocumentStore};
pub use traits::{BaseStore, FriendRequestStore, SocialStore, UserStore};

use crate::config::{StorageConfig, StorageEngine};
use surrealdb::Surreal;

/// Create a store instance from configuration
pub async fn create_store(config: &StorageConfig) -> Result<Box<dyn SocialStore>, StorageError> {
    match &config.engine {
        StorageEngine::Memory => {
            tracing::info!("Creating in-memory document store");
            let client = Surreal::new::<surrealdb::engine::local::Mem>(())
                .await
                .map_err(|e| {
                    StorageError::Connection(format!("Failed to create memory client: {}", e))
                })?;

            let store = DocumentStore::new(client, &config.namespace, &config.database).await?;
            Ok(Box::new(store))
        }
        StorageEngine::RocksDb { path } => {
            tracing::info!("Creating RocksDB document store at {}", path.display());
            let path = path.to_string_lossy().into_owned();
            let client = Surreal::new::<surrealdb::engine::local::RocksDb>(path.as_str())
                .await
                .map_err(|e| {
                    StorageError::Connection(format!("Failed to create RocksDB client: {}", e))
                })?;

            let store = DocumentStore::new(client, &config.namespace, &config.database).await?;
            Ok(Box::new(store))
        }
    }
}
