//! Embedded SurrealDB document store
//!
//! One implementation serves both the in-memory engine (tests) and the
//! RocksDB engine (durable deployments); the generic parameter is the
//! SurrealDB connection type.

pub mod base;
pub mod requests;
pub mod schema;
pub mod users;

pub use base::DocumentStore;

/// Type alias for the embedded document store
pub type EmbeddedDocumentStore = DocumentStore<surrealdb::engine::local::Db>;

use surrealdb::RecordId;

/// Extract the plain key string from a SurrealDB record id.
///
/// `RecordId::key()` renders string keys wrapped in angle brackets; strip
/// them so callers see the original id.
pub(crate) fn record_key(id: &RecordId) -> String {
    let key_string = id.key().to_string();
    key_string
        .strip_prefix('⟨')
        .and_then(|s| s.strip_suffix('⟩'))
        .unwrap_or(&key_string)
        .to_string()
}
