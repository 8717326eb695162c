//! Trait definitions for storage components

use async_trait::async_trait;
use std::fmt::Debug;

use crate::models::{FriendRequest, RequestStatus, User};
use crate::storage::errors::StorageError;
use crate::storage::filters::{RequestFilter, UserFilter};

/// Base trait for all storage implementations
#[async_trait]
pub trait BaseStore: Send + Sync + 'static + Debug {
    /// Check if the store is healthy and available
    async fn health_check(&self) -> Result<bool, StorageError>;

    /// Clear all data in the store
    async fn clear(&self) -> Result<(), StorageError>;

    /// Close connections and release resources
    async fn close(&self) -> Result<(), StorageError>;
}

/// Trait for user account persistence
#[async_trait]
pub trait UserStore: BaseStore {
    /// Create a new user; fails with `AlreadyExists` when the email is taken
    async fn create_user(&self, user: User) -> Result<User, StorageError>;

    /// Get a user by id
    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError>;

    /// Get a user by email (stored lowercase)
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;

    /// Replace an existing user record
    async fn update_user(&self, user: User) -> Result<User, StorageError>;

    /// List users with optional filtering
    async fn list_users(&self, filter: UserFilter) -> Result<Vec<User>, StorageError>;
}

/// Trait for friend-request persistence
#[async_trait]
pub trait FriendRequestStore: BaseStore {
    /// Create a new request; fails with `AlreadyExists` when a pending
    /// request already covers the same unordered pair
    async fn create_request(&self, request: FriendRequest) -> Result<FriendRequest, StorageError>;

    /// Get a request by id
    async fn get_request(&self, id: &str) -> Result<Option<FriendRequest>, StorageError>;

    /// List requests with optional filtering
    async fn list_requests(&self, filter: RequestFilter)
        -> Result<Vec<FriendRequest>, StorageError>;

    /// Conditionally transition a pending request to a terminal status.
    ///
    /// Returns the updated request, or `None` when the request was no longer
    /// pending at write time.
    async fn resolve_request(
        &self,
        request_id: &str,
        status: RequestStatus,
    ) -> Result<Option<FriendRequest>, StorageError>;

    /// Accept a pending request and create the symmetric friendship edge.
    ///
    /// The status transition and both user updates are applied as one atomic
    /// unit. Returns the updated request, or `None` when the request was no
    /// longer pending at write time (in which case no user was modified).
    async fn accept_request(
        &self,
        request_id: &str,
        sender_id: &str,
        recipient_id: &str,
    ) -> Result<Option<FriendRequest>, StorageError>;
}

/// Combined store handled by the social manager
pub trait SocialStore: UserStore + FriendRequestStore {}

impl<T: UserStore + FriendRequestStore> SocialStore for T {}
