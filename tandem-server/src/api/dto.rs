//! Data transfer objects for the Tandem API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tandem::models::{FriendRequest, ProfileSummary, RequestStatus, User};

/// User data transfer object; the credential hash never leaves the server
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub bio: String,
    pub profile_picture: String,
    pub native_language: String,
    pub learning_language: String,
    pub location: String,
    pub is_onboarded: bool,
    pub friends: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            bio: user.bio,
            profile_picture: user.profile_picture,
            native_language: user.native_language,
            learning_language: user.learning_language,
            location: user.location,
            is_onboarded: user.is_onboarded,
            friends: user.friends,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Friend request data transfer object
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestDto {
    pub id: String,
    pub sender: String,
    pub recipient: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FriendRequest> for FriendRequestDto {
    fn from(request: FriendRequest) -> Self {
        FriendRequestDto {
            id: request.id,
            sender: request.sender,
            recipient: request.recipient,
            status: request.status,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

/// A request addressed to the caller, with the sender's profile attached
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingRequestDto {
    pub id: String,
    pub sender: ProfileSummary,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl From<(FriendRequest, ProfileSummary)> for IncomingRequestDto {
    fn from((request, sender): (FriendRequest, ProfileSummary)) -> Self {
        IncomingRequestDto {
            id: request.id,
            sender,
            status: request.status,
            created_at: request.created_at,
        }
    }
}

/// A request the caller sent, with the recipient's profile attached
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingRequestDto {
    pub id: String,
    pub recipient: ProfileSummary,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl From<(FriendRequest, ProfileSummary)> for OutgoingRequestDto {
    fn from((request, recipient): (FriendRequest, ProfileSummary)) -> Self {
        OutgoingRequestDto {
            id: request.id,
            recipient,
            status: request.status,
            created_at: request.created_at,
        }
    }
}

/// Generic confirmation response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
