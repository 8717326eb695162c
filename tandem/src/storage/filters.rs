//! Filter types for storage queries

use serde::{Deserialize, Serialize};

use crate::models::RequestStatus;

/// Filter for user queries
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserFilter {
    /// Filter by onboarding completion
    pub is_onboarded: Option<bool>,

    /// Filter by exact email (stored lowercase)
    pub email: Option<String>,
}

/// Filter for friend-request queries
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RequestFilter {
    /// Filter by sending user id
    pub sender: Option<String>,

    /// Filter by receiving user id
    pub recipient: Option<String>,

    /// Filter by lifecycle state
    pub status: Option<RequestStatus>,

    /// Filter by the unordered pair key (matches either direction)
    pub pair_key: Option<String>,
}
