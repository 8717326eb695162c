//! Friend request model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a friend request.
///
/// Transitions are one-way: a pending request becomes accepted or declined
/// exactly once and stays there.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Declined,
}

impl RequestStatus {
    /// Whether the request can still transition
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }

    /// Lowercase wire/storage form
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Declined => "declined",
        }
    }
}

/// A directed friend request between two users
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequest {
    /// Unique request id
    pub id: String,

    /// Id of the user who sent the request
    pub sender: String,

    /// Id of the user the request is addressed to
    pub recipient: String,

    /// Current lifecycle state
    pub status: RequestStatus,

    /// Uniqueness key for the unordered {sender, recipient} pair while the
    /// request is pending; rewritten to `resolved:<id>` on transition so a
    /// later request between the same pair is possible again
    #[serde(skip_serializing, default)]
    pub pair_key: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FriendRequest {
    /// Create a new pending request
    pub fn new(sender: &str, recipient: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            status: RequestStatus::Pending,
            pair_key: pair_key(sender, recipient),
            created_at: now,
            updated_at: now,
        }
    }

    /// The pair-key value a request carries once it has been resolved
    pub fn resolved_pair_key(request_id: &str) -> String {
        format!("resolved:{}", request_id)
    }
}

/// Canonical key for an unordered pair of user ids.
///
/// `pair_key(a, b) == pair_key(b, a)`, so one unique index covers requests
/// in both directions.
pub fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{}:{}", a, b)
    } else {
        format!("{}:{}", b, a)
    }
}
