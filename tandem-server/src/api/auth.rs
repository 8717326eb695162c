//! Authentication and session handling for the Tandem API

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use headers::{authorization::Bearer, Authorization, HeaderMapExt};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tandem::models::User;

use crate::{error::ServerError, state::AppState};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "token";

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Issued at timestamp
    pub iat: usize,
    /// Expiration timestamp
    pub exp: usize,
}

/// The authenticated user resolved for the current request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Authentication middleware.
///
/// Resolves the session token (cookie first, then bearer header) to a full
/// user record and makes it available to handlers via request extensions.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let path = request.uri().path();
    if is_public_endpoint(path) {
        return Ok(next.run(request).await);
    }

    let token = extract_token(&headers)
        .ok_or_else(|| ServerError::Auth("No session token provided".to_string()))?;

    let claims = validate_token(&token, &state.config.jwt_secret)?;

    let user = state
        .social
        .get_user(&claims.sub)
        .await
        .map_err(ServerError::from)?
        .ok_or_else(|| ServerError::Auth("User no longer exists".to_string()))?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// Check if an endpoint is public (doesn't require authentication)
fn is_public_endpoint(path: &str) -> bool {
    matches!(
        path,
        "/health" | "/auth/signup" | "/auth/login" | "/auth/logout"
    )
}

/// Pull the session token out of the cookie or the Authorization header
fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(cookies) = headers.typed_get::<headers::Cookie>() {
        if let Some(token) = cookies.get(SESSION_COOKIE) {
            return Some(token.to_string());
        }
    }

    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}

/// Validate a session token and return its claims
fn validate_token(token: &str, secret: &str) -> Result<Claims, ServerError> {
    let decoding_key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| ServerError::Auth(format!("Invalid token: {}", e)))?;

    Ok(token_data.claims)
}

/// Generate a session token for a user
pub fn issue_token(
    user_id: &str,
    secret: &str,
    expiration_days: u64,
) -> Result<(String, i64), ServerError> {
    let now = chrono::Utc::now().timestamp() as usize;
    let exp = now + (expiration_days * 24 * 3600) as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp,
    };

    let encoding_key = EncodingKey::from_secret(secret.as_ref());
    let token = encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| ServerError::Internal(format!("Failed to generate token: {}", e)))?;

    Ok((token, exp as i64))
}

/// Build the Set-Cookie value carrying a fresh session token
pub fn session_cookie(token: &str, expiration_days: u64, secure: bool) -> String {
    let max_age = expiration_days * 24 * 3600;
    let mut cookie = format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Strict",
        SESSION_COOKIE, token, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the Set-Cookie value that removes the session cookie
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = format!(
        "{}=; Max-Age=0; Path=/; HttpOnly; SameSite=Strict",
        SESSION_COOKIE
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let (token, expires_at) = issue_token("user-1", "test-secret", 7).unwrap();
        assert!(!token.is_empty());
        assert!(expires_at > chrono::Utc::now().timestamp());

        let claims = validate_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, "user-1");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let (token, _) = issue_token("user-1", "test-secret", 7).unwrap();
        assert!(validate_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "user-1".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let encoding_key = EncodingKey::from_secret("test-secret".as_ref());
        let token = encode(&Header::default(), &claims, &encoding_key).unwrap();

        assert!(validate_token(&token, "test-secret").is_err());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc", 7, false);
        assert!(cookie.starts_with("token=abc;"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(!cookie.contains("Secure"));

        let cookie = session_cookie("abc", 7, true);
        assert!(cookie.contains("Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie(false);
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.starts_with("token=;"));
    }

    #[test]
    fn test_public_endpoints() {
        assert!(is_public_endpoint("/auth/signup"));
        assert!(is_public_endpoint("/auth/login"));
        assert!(is_public_endpoint("/auth/logout"));
        assert!(is_public_endpoint("/health"));
        assert!(!is_public_endpoint("/auth/me"));
        assert!(!is_public_endpoint("/users"));
        assert!(!is_public_endpoint("/users/friends"));
    }
}
