//! User discovery and friend-request endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Serialize;
use tandem::models::ProfileSummary;

use crate::{
    api::auth::CurrentUser,
    api::dto::{FriendRequestDto, IncomingRequestDto, MessageResponse, OutgoingRequestDto, UserDto},
    error::ServerError,
    state::AppState,
};

/// Response for the peer recommendation listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedUsersResponse {
    pub recommended_users: Vec<UserDto>,
}

/// Response combining incoming and accepted friend requests
#[derive(Debug, Serialize)]
pub struct FriendRequestsResponse {
    #[serde(rename = "incomingRequests")]
    pub incoming_requests: Vec<IncomingRequestDto>,
    #[serde(rename = "acceptedReqs")]
    pub accepted_requests: Vec<OutgoingRequestDto>,
}

/// Recommended peers for the caller
pub async fn get_recommended_users(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<RecommendedUsersResponse>, ServerError> {
    let recommended = state.social.recommended_users(&user).await?;

    Ok(Json(RecommendedUsersResponse {
        recommended_users: recommended.into_iter().map(UserDto::from).collect(),
    }))
}

/// The caller's friends as profile summaries
pub async fn get_friends(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<ProfileSummary>>, ServerError> {
    // The caller was resolved moments ago, so a missing record here is an
    // internal inconsistency rather than a client error.
    let friends = state
        .social
        .friends_of(&user.id)
        .await
        .map_err(|e| match e {
            tandem::TandemError::NotFound(msg) => ServerError::Internal(msg),
            other => other.into(),
        })?;

    Ok(Json(friends))
}

/// Send a friend request to the user in the path
pub async fn send_friend_request(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(recipient_id): Path<String>,
) -> Result<(StatusCode, Json<FriendRequestDto>), ServerError> {
    let request = state.social.send_request(&user, &recipient_id).await?;

    Ok((StatusCode::CREATED, Json(request.into())))
}

/// Accept a friend request addressed to the caller
pub async fn accept_friend_request(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(request_id): Path<String>,
) -> Result<Json<MessageResponse>, ServerError> {
    state.social.accept_request(&user.id, &request_id).await?;

    Ok(Json(MessageResponse::new("Friend request accepted")))
}

/// Decline a friend request addressed to the caller
pub async fn decline_friend_request(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(request_id): Path<String>,
) -> Result<Json<MessageResponse>, ServerError> {
    state.social.decline_request(&user.id, &request_id).await?;

    Ok(Json(MessageResponse::new("Friend request declined")))
}

/// Incoming pending requests plus the caller's accepted outgoing requests
pub async fn get_friend_requests(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<FriendRequestsResponse>, ServerError> {
    let incoming = state.social.incoming_requests(&user.id).await?;
    let accepted = state.social.outgoing_accepted(&user.id).await?;

    Ok(Json(FriendRequestsResponse {
        incoming_requests: incoming.into_iter().map(IncomingRequestDto::from).collect(),
        accepted_requests: accepted.into_iter().map(OutgoingRequestDto::from).collect(),
    }))
}

/// Pending requests the caller has sent
pub async fn get_outgoing_friend_requests(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<OutgoingRequestDto>>, ServerError> {
    let outgoing = state.social.outgoing_pending(&user.id).await?;

    Ok(Json(
        outgoing.into_iter().map(OutgoingRequestDto::from).collect(),
    ))
}
