//! API implementation for the Tandem HTTP server

use std::sync::Arc;

use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};

use tandem::storage::BaseStore;

use crate::state::AppState;

pub mod auth;
pub mod auth_endpoints;
pub mod chat_endpoints;
pub mod dto;
pub mod users;

use auth::auth_middleware;

/// Create the main router with all API endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        // Authentication endpoints (signup/login/logout are public)
        .route("/auth/signup", post(auth_endpoints::signup))
        .route("/auth/login", post(auth_endpoints::login))
        .route("/auth/logout", post(auth_endpoints::logout))
        .route("/auth/onboarding", post(auth_endpoints::onboarding))
        .route("/auth/me", get(auth_endpoints::me))
        // User discovery and friendship endpoints
        .route("/users", get(users::get_recommended_users))
        .route("/users/friends", get(users::get_friends))
        .route(
            "/users/friend-request/{id}",
            post(users::send_friend_request),
        )
        .route(
            "/users/friend-request/{id}/accept",
            put(users::accept_friend_request),
        )
        .route(
            "/users/friend-request/{id}/decline",
            delete(users::decline_friend_request),
        )
        .route("/users/friend-requests", get(users::get_friend_requests))
        .route(
            "/users/outgoing-friend-requests",
            get(users::get_outgoing_friend_requests),
        )
        // Chat provider endpoints
        .route("/chat/token", get(chat_endpoints::get_chat_token))
        // Health check endpoint (with capability reporting)
        .route("/health", get(health_check))
        // Resolve the caller identity before any protected handler runs
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new().nest("/api", api_router)
}

/// Health check endpoint with capability reporting
async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let storage_healthy = state
        .social
        .store()
        .health_check()
        .await
        .unwrap_or(false);

    let capabilities = serde_json::json!({
        "status": if storage_healthy { "OK" } else { "DEGRADED" },
        "capabilities": {
            "signup": state.config.allow_signup,
            "chat": state.chat.is_some(),
            "storage": storage_healthy,
        }
    });

    Json(capabilities)
}
