//! Configuration for the Tandem core library

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Result, TandemError};

/// Main configuration structure for Tandem
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TandemConfig {
    /// Storage configuration
    pub storage: StorageConfig,
}

/// Configuration for the document store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage engine selection
    pub engine: StorageEngine,

    /// Namespace within the database
    pub namespace: String,

    /// Database name
    pub database: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            engine: StorageEngine::Memory,
            namespace: "tandem".to_string(),
            database: "main".to_string(),
        }
    }
}

/// Supported storage engines
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageEngine {
    /// In-memory storage, data is lost on shutdown (good for testing)
    Memory,

    /// RocksDB on-disk storage (embedded)
    RocksDb { path: PathBuf },
}

/// Builder for creating [`TandemConfig`] instances
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: TandemConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Use in-memory storage (good for testing)
    pub fn with_memory_storage(mut self) -> Self {
        self.config.storage.engine = StorageEngine::Memory;
        self
    }

    /// Store data on disk under the given directory
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.storage.engine = StorageEngine::RocksDb {
            path: path.as_ref().join("social"),
        };
        self
    }

    /// Override the storage namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.storage.namespace = namespace.into();
        self
    }

    /// Override the database name
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.config.storage.database = database.into();
        self
    }

    /// Validate and produce the final configuration
    pub fn build(self) -> Result<TandemConfig> {
        if self.config.storage.namespace.is_empty() {
            return Err(TandemError::Validation(
                "storage namespace cannot be empty".to_string(),
            ));
        }
        if self.config.storage.database.is_empty() {
            return Err(TandemError::Validation(
                "storage database cannot be empty".to_string(),
            ));
        }
        if let StorageEngine::RocksDb { path } = &self.config.storage.engine {
            if path.as_os_str().is_empty() {
                return Err(TandemError::Validation(
                    "storage path cannot be empty".to_string(),
                ));
            }
        }
        Ok(self.config)
    }
}
