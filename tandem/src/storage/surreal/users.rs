//! User storage implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, RecordId};

use super::base::DocumentStore;
use super::record_key;
use crate::models::User;
use crate::storage::errors::StorageError;
use crate::storage::filters::UserFilter;
use crate::storage::traits::UserStore;

/// Internal representation of a user record for SurrealDB
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct UserRecord {
    id: RecordId,
    full_name: String,
    email: String,
    password_hash: String,
    bio: String,
    profile_picture: String,
    native_language: String,
    learning_language: String,
    location: String,
    is_onboarded: bool,
    friends: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Struct for creating and replacing user records (without the id field)
#[derive(Debug, Clone, serde::Serialize)]
struct UserContent {
    full_name: String,
    email: String,
    password_hash: String,
    bio: String,
    profile_picture: String,
    native_language: String,
    learning_language: String,
    location: String,
    is_onboarded: bool,
    friends: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&User> for UserContent {
    fn from(user: &User) -> Self {
        Self {
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            bio: user.bio.clone(),
            profile_picture: user.profile_picture.clone(),
            native_language: user.native_language.clone(),
            learning_language: user.learning_language.clone(),
            location: user.location.clone(),
            is_onboarded: user.is_onboarded,
            friends: user.friends.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record_key(&record.id),
            full_name: record.full_name,
            email: record.email,
            password_hash: record.password_hash,
            bio: record.bio,
            profile_picture: record.profile_picture,
            native_language: record.native_language,
            learning_language: record.learning_language,
            location: record.location,
            is_onboarded: record.is_onboarded,
            friends: record.friends,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[async_trait]
impl<C> UserStore for DocumentStore<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_user(&self, user: User) -> Result<User, StorageError> {
        let content = UserContent::from(&user);

        let created: Option<UserRecord> = self
            .client
            .create(("user", user.id.as_str()))
            .content(content)
            .await
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("already contains") {
                    StorageError::AlreadyExists(format!(
                        "user with email '{}' already exists",
                        user.email
                    ))
                } else {
                    StorageError::Query(format!("Failed to create user: {}", msg))
                }
            })?;

        created
            .map(User::from)
            .ok_or_else(|| StorageError::Internal("No user record created".to_string()))
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        let record: Option<UserRecord> = self
            .client
            .select(("user", id))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get user: {}", e)))?;

        Ok(record.map(User::from))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let mut response = self
            .client
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to query user by email: {}", e)))?;

        let record: Option<UserRecord> = response
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract user: {}", e)))?;

        Ok(record.map(User::from))
    }

    async fn update_user(&self, user: User) -> Result<User, StorageError> {
        let mut content = UserContent::from(&user);
        content.updated_at = Utc::now();

        let updated: Option<UserRecord> = self
            .client
            .update(("user", user.id.as_str()))
            .content(content)
            .await
            .map_err(|e| StorageError::Query(format!("Failed to update user: {}", e)))?;

        updated
            .map(User::from)
            .ok_or_else(|| StorageError::NotFound(format!("user {} not found", user.id)))
    }

    async fn list_users(&self, filter: UserFilter) -> Result<Vec<User>, StorageError> {
        let mut query = String::from("SELECT * FROM user");
        let mut conditions = Vec::new();

        if filter.is_onboarded.is_some() {
            conditions.push("is_onboarded = $is_onboarded");
        }
        if filter.email.is_some() {
            conditions.push("email = $email");
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY created_at DESC");

        let mut request = self.client.query(query);
        if let Some(is_onboarded) = filter.is_onboarded {
            request = request.bind(("is_onboarded", is_onboarded));
        }
        if let Some(email) = filter.email {
            request = request.bind(("email", email));
        }

        let mut response = request
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list users: {}", e)))?;

        let records: Vec<UserRecord> = response
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract users: {}", e)))?;

        Ok(records.into_iter().map(User::from).collect())
    }
}
