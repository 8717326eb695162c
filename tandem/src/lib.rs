//! # Tandem
//!
//! Core library for a language-exchange social service. It persists user
//! profiles and friend requests in an embedded document database and owns
//! the friendship workflow: recommendations, friend-request creation,
//! acceptance with symmetric edge creation, and declines.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tandem::config::ConfigBuilder;
//! use tandem::models::NewUser;
//!
//! #[tokio::main]
//! async fn main() -> tandem::Result<()> {
//!     let config = ConfigBuilder::new().with_memory_storage().build()?;
//!     let social = tandem::init(config).await?;
//!
//!     let alice = social
//!         .register_user(NewUser {
//!             full_name: "Alice".to_string(),
//!             email: "alice@example.com".to_string(),
//!             password: "hunter22".to_string(),
//!             profile_picture: String::new(),
//!         })
//!         .await?;
//!
//!     let friends = social.friends_of(&alice.id).await?;
//!     assert!(friends.is_empty());
//!     Ok(())
//! }
//! ```
//!
//! The HTTP surface lives in the separate `tandem-server` crate; this crate
//! is usable directly from Rust applications and tests.

pub mod auth;
pub mod config;
pub mod core;
pub mod models;
pub mod storage;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ConfigBuilder, StorageEngine, TandemConfig};
    pub use crate::core::SocialManager;
    pub use crate::models::{
        FriendRequest, NewUser, OnboardingProfile, ProfileSummary, RequestStatus, User,
    };
    pub use crate::storage::StorageError;
    pub use crate::{init, Result, TandemError};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for Tandem operations
#[derive(Debug, thiserror::Error)]
pub enum TandemError {
    /// Missing or malformed input
    #[error("validation failed: {0}")]
    Validation(String),

    /// Missing or unverifiable credentials
    #[error("authentication failed: {0}")]
    Unauthenticated(String),

    /// Authenticated but not allowed to act on this resource
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Referenced record does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Uniqueness or state-transition violation
    #[error("conflict: {0}")]
    Conflict(String),

    /// Operation is not meaningful for the given arguments
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Underlying store failure
    #[error("storage error: {0}")]
    Storage(String),

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<storage::StorageError> for TandemError {
    fn from(err: storage::StorageError) -> Self {
        match err {
            storage::StorageError::NotFound(msg) => TandemError::NotFound(msg),
            storage::StorageError::AlreadyExists(msg) => TandemError::Conflict(msg),
            other => TandemError::Storage(other.to_string()),
        }
    }
}

/// Result type for Tandem operations
pub type Result<T> = std::result::Result<T, TandemError>;

/// Initialize Tandem with the provided configuration
///
/// Opens the configured storage backend, runs schema initialization, and
/// returns a [`core::SocialManager`] ready to serve operations.
pub async fn init(config: config::TandemConfig) -> Result<core::SocialManager> {
    let store = storage::create_store(&config.storage)
        .await
        .map_err(|e| TandemError::Storage(e.to_string()))?;
    let store = std::sync::Arc::from(store);

    Ok(core::SocialManager::new(store, config))
}
