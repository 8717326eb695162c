//! Authentication endpoints: signup, login, logout, onboarding, and /me

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tandem::models::{NewUser, OnboardingProfile};

use crate::{
    api::auth::{clear_session_cookie, issue_token, session_cookie, CurrentUser},
    api::dto::{MessageResponse, UserDto},
    error::{bad_request, ServerError},
    state::AppState,
};

/// User signup request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Onboarding request; every field is required to finish the profile
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub native_language: Option<String>,
    pub learning_language: Option<String>,
    pub location: Option<String>,
}

/// Authentication response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    /// Session token, also delivered via the session cookie
    pub token: String,
    pub user: UserDto,
}

/// Response wrapping a single user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub success: bool,
    pub user: UserDto,
}

/// User signup endpoint
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, ServerError> {
    if !state.config.allow_signup {
        return Err(ServerError::Forbidden(
            "User signup is disabled".to_string(),
        ));
    }

    let (Some(email), Some(password), Some(full_name)) =
        (request.email, request.password, request.full_name)
    else {
        return Err(bad_request("All fields are required"));
    };

    let user = state
        .social
        .register_user(NewUser {
            full_name,
            email,
            password,
            profile_picture: random_avatar_url(),
        })
        .await?;

    // Mirror the profile into the chat provider; an outage there must not
    // fail the signup.
    if let Some(chat) = &state.chat {
        if let Err(e) = chat.upsert_user(&user).await {
            tracing::warn!(user_id = %user.id, "failed to upsert chat user: {}", e);
        }
    }

    let (token, _expires_at) = issue_token(
        &user.id,
        &state.config.jwt_secret,
        state.config.jwt_expiration_days,
    )?;
    let cookie = session_cookie(
        &token,
        state.config.jwt_expiration_days,
        state.config.secure_cookies,
    );

    Ok((
        StatusCode::CREATED,
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(AuthResponse {
            success: true,
            token,
            user: user.into(),
        }),
    ))
}

/// User login endpoint
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(bad_request("All fields are required"));
    };

    let user = state.social.authenticate_user(&email, &password).await?;

    let (token, _expires_at) = issue_token(
        &user.id,
        &state.config.jwt_secret,
        state.config.jwt_expiration_days,
    )?;
    let cookie = session_cookie(
        &token,
        state.config.jwt_expiration_days,
        state.config.secure_cookies,
    );

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(AuthResponse {
            success: true,
            token,
            user: user.into(),
        }),
    ))
}

/// User logout endpoint; drops the session cookie
pub async fn logout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cookie = clear_session_cookie(state.config.secure_cookies);

    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(MessageResponse::new("Logged out")),
    )
}

/// Current-user endpoint
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(UserResponse {
        success: true,
        user: user.into(),
    })
}

/// Onboarding endpoint; completes the profile and unlocks discovery
pub async fn onboarding(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<OnboardingRequest>,
) -> Result<Json<UserResponse>, ServerError> {
    let mut missing = Vec::new();
    if request.full_name.is_none() {
        missing.push("fullName");
    }
    if request.bio.is_none() {
        missing.push("bio");
    }
    if request.native_language.is_none() {
        missing.push("nativeLanguage");
    }
    if request.learning_language.is_none() {
        missing.push("learningLanguage");
    }
    if request.location.is_none() {
        missing.push("location");
    }
    if !missing.is_empty() {
        return Err(bad_request(&format!(
            "All fields are required, missing: {}",
            missing.join(", ")
        )));
    }

    let profile = OnboardingProfile {
        full_name: request.full_name.unwrap_or_default(),
        bio: request.bio.unwrap_or_default(),
        native_language: request.native_language.unwrap_or_default(),
        learning_language: request.learning_language.unwrap_or_default(),
        location: request.location.unwrap_or_default(),
    };

    let user = state.social.complete_onboarding(&user.id, profile).await?;

    // Keep the chat profile in sync with the new display name and avatar
    if let Some(chat) = &state.chat {
        if let Err(e) = chat.upsert_user(&user).await {
            tracing::warn!(user_id = %user.id, "failed to update chat user: {}", e);
        }
    }

    Ok(Json(UserResponse {
        success: true,
        user: user.into(),
    }))
}

/// Pick one of the hosted avatar images at random for a fresh account
fn random_avatar_url() -> String {
    use rand::Rng;
    let idx = rand::rng().random_range(1..=100);
    format!("https://avatar.iran.liara.run/public/{}.png", idx)
}
