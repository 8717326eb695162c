//! User account model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user account.
///
/// The password hash is carried for credential verification but is never
/// serialized outward; API-facing projections are built from the other
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user id
    pub id: String,

    /// Display name
    pub full_name: String,

    /// Email address, globally unique, stored lowercase
    pub email: String,

    /// Bcrypt hash of the password, never exposed
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Short self description
    pub bio: String,

    /// Avatar URL
    pub profile_picture: String,

    /// Language the user speaks natively
    pub native_language: String,

    /// Language the user wants to practice
    pub learning_language: String,

    /// Free-form location string
    pub location: String,

    /// Whether the profile-completion step has been finished
    pub is_onboarded: bool,

    /// Ids of accepted friends; symmetric across both users
    pub friends: Vec<String>,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a fresh account from registration input and a password hash
    pub fn new(new_user: &NewUser, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            full_name: new_user.full_name.clone(),
            email: new_user.email.trim().to_lowercase(),
            password_hash,
            bio: String::new(),
            profile_picture: new_user.profile_picture.clone(),
            native_language: String::new(),
            learning_language: String::new(),
            location: String::new(),
            is_onboarded: false,
            friends: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Project this account to the fields other users are allowed to see
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            id: self.id.clone(),
            full_name: self.full_name.clone(),
            profile_picture: self.profile_picture.clone(),
            native_language: self.native_language.clone(),
            learning_language: self.learning_language.clone(),
        }
    }
}

/// Registration input for a new account
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    /// Plaintext password, hashed before persistence
    pub password: String,
    pub profile_picture: String,
}

/// Profile fields collected during onboarding
#[derive(Debug, Clone, Deserialize)]
pub struct OnboardingProfile {
    pub full_name: String,
    pub bio: String,
    pub native_language: String,
    pub learning_language: String,
    pub location: String,
}

/// Projection of a user excluding credential and internal fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub id: String,
    pub full_name: String,
    pub profile_picture: String,
    pub native_language: String,
    pub learning_language: String,
}
