//! Base document store implementation

use async_trait::async_trait;
use surrealdb::{Connection, Surreal};

use crate::storage::errors::StorageError;
use crate::storage::traits::BaseStore;

/// Document store backed by an embedded SurrealDB instance
#[derive(Debug, Clone)]
pub struct DocumentStore<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    pub(crate) client: Surreal<C>,
}

impl<C> DocumentStore<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    /// Create a new document store instance
    pub async fn new(
        client: Surreal<C>,
        namespace: &str,
        database: &str,
    ) -> Result<Self, StorageError> {
        client.use_ns(namespace).use_db(database).await.map_err(|e| {
            StorageError::Connection(format!("Failed to set namespace/database: {}", e))
        })?;

        let store = Self { client };
        store.initialize_schema().await?;

        Ok(store)
    }

    /// Initialize the database schema with tables and indexes
    async fn initialize_schema(&self) -> Result<(), StorageError> {
        super::schema::initialize_schema(&self.client).await
    }

    /// Get the underlying client for advanced operations
    pub fn client(&self) -> &Surreal<C> {
        &self.client
    }
}

#[async_trait]
impl<C> BaseStore for DocumentStore<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn health_check(&self) -> Result<bool, StorageError> {
        self.client
            .query("INFO FOR DB")
            .await
            .map_err(|e| StorageError::Connection(format!("Health check failed: {}", e)))?;

        Ok(true)
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let queries = ["DELETE FROM user", "DELETE FROM friend_request"];

        for query in queries {
            self.client
                .query(query)
                .await
                .map_err(|e| StorageError::Query(format!("Failed to clear table: {}", e)))?;
        }

        Ok(())
    }

    async fn close(&self) -> Result<(), StorageError> {
        // SurrealDB connections are closed when dropped
        Ok(())
    }
}
