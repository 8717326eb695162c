//! Chat token endpoint

use std::sync::Arc;

use axum::{extract::State, response::Json, Extension};
use serde::Serialize;

use crate::{api::auth::CurrentUser, error::ServerError, state::AppState};

/// Chat token response
#[derive(Debug, Serialize)]
pub struct ChatTokenResponse {
    pub token: String,
}

/// Issue a chat-provider token for the caller
pub async fn get_chat_token(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<ChatTokenResponse>, ServerError> {
    let chat = state.chat.as_ref().ok_or(ServerError::ChatUnavailable)?;

    let token = chat.create_token(&user.id)?;

    Ok(Json(ChatTokenResponse { token }))
}
