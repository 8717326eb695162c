//! Chat provider integration
//!
//! The real-time messaging side of the application is delegated to an
//! external Stream-style chat service. The backend only mirrors user
//! profiles into the provider and issues signed chat tokens; message
//! delivery never touches this process.

use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use std::time::Duration;
use tandem::models::User;

use crate::config::ChatConfig;
use crate::error::{ServerError, ServerResult};

/// Claims for a user-facing chat token
#[derive(Debug, Serialize)]
struct ChatTokenClaims {
    user_id: String,
}

/// Claims for server-to-server provider calls
#[derive(Debug, Serialize)]
struct ServerTokenClaims {
    server: bool,
}

/// Client for the external chat provider
#[derive(Debug, Clone)]
pub struct ChatClient {
    api_key: String,
    api_secret: String,
    base_url: String,
    client: reqwest::Client,
}

impl ChatClient {
    /// Build a client when the provider credentials are configured
    pub fn from_config(config: &ChatConfig) -> ServerResult<Option<Self>> {
        let (Some(api_key), Some(api_secret)) = (&config.api_key, &config.api_secret) else {
            return Ok(None);
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ServerError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Some(Self {
            api_key: api_key.clone(),
            api_secret: api_secret.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        }))
    }

    /// Issue a chat token for a user, signed with the provider secret
    pub fn create_token(&self, user_id: &str) -> ServerResult<String> {
        let claims = ChatTokenClaims {
            user_id: user_id.to_string(),
        };
        let encoding_key = EncodingKey::from_secret(self.api_secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| ServerError::Internal(format!("Failed to sign chat token: {}", e)))
    }

    /// Create or update the user's profile at the chat provider.
    ///
    /// Callers treat failures as non-fatal: a chat outage must not block
    /// signup or onboarding.
    pub async fn upsert_user(&self, user: &User) -> ServerResult<()> {
        let server_token = self.server_token()?;

        let mut users = serde_json::Map::new();
        users.insert(
            user.id.clone(),
            serde_json::json!({
                "id": user.id,
                "name": user.full_name,
                "image": user.profile_picture,
            }),
        );
        let payload = serde_json::json!({ "users": users });

        let url = format!("{}/users?api_key={}", self.base_url, self.api_key);
        let response = self
            .client
            .post(&url)
            .header("Authorization", server_token)
            .header("stream-auth-type", "jwt")
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| ServerError::Internal(format!("Chat provider request failed: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ServerError::Internal(format!(
                "Chat provider error: {} {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )))
        }
    }

    /// Signed token authorizing this backend against the provider
    fn server_token(&self) -> ServerResult<String> {
        let claims = ServerTokenClaims { server: true };
        let encoding_key = EncodingKey::from_secret(self.api_secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| ServerError::Internal(format!("Failed to sign server token: {}", e)))
    }
}
