//! Tests for the friend-request workflow over the HTTP surface

use axum::http::StatusCode;
use axum_test::TestServer;
use std::sync::Arc;
use tandem_server::{config::ServerConfig, state::AppState};

async fn create_test_server() -> TestServer {
    let config = tandem::config::ConfigBuilder::new()
        .with_memory_storage()
        .build()
        .expect("Failed to create config");

    let social = tandem::init(config)
        .await
        .expect("Failed to initialize social manager");

    let mut server_config = ServerConfig::default();
    server_config.jwt_secret = "test-secret-key-for-session-token-generation".to_string();

    let state = Arc::new(AppState::new(social, server_config));
    let app = tandem_server::create_router(state);
    TestServer::new(app).unwrap()
}

/// Sign up and onboard a user; returns (bearer token, user id)
async fn onboarded_user(server: &TestServer, name: &str, email: &str) -> (String, String) {
    let response = server
        .post("/api/auth/signup")
        .json(&serde_json::json!({
            "fullName": name,
            "email": email,
            "password": "password123"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let auth_response: serde_json::Value = response.json();
    let token = auth_response["token"].as_str().unwrap().to_string();
    let user_id = auth_response["user"]["id"].as_str().unwrap().to_string();

    server
        .post("/api/auth/onboarding")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "fullName": name,
            "bio": "learning languages",
            "nativeLanguage": "english",
            "learningLanguage": "spanish",
            "location": "nowhere"
        }))
        .await
        .assert_status_ok();

    (token, user_id)
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[tokio::test]
async fn test_users_routes_require_authentication() {
    let server = create_test_server().await;

    for path in [
        "/api/users",
        "/api/users/friends",
        "/api/users/friend-requests",
        "/api/users/outgoing-friend-requests",
    ] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    let response = server.post("/api/users/friend-request/some-id").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_friend_request_lifecycle() {
    let server = create_test_server().await;
    let (alice_token, alice_id) = onboarded_user(&server, "Alice", "alice@example.com").await;
    let (bob_token, bob_id) = onboarded_user(&server, "Bob", "bob@example.com").await;

    // Alice sends a request to Bob
    let response = server
        .post(&format!("/api/users/friend-request/{}", bob_id))
        .add_header("Authorization", bearer(&alice_token))
        .await;
    response.assert_status(StatusCode::CREATED);

    let request: serde_json::Value = response.json();
    assert_eq!(request["status"], "pending");
    assert_eq!(request["sender"], alice_id.as_str());
    assert_eq!(request["recipient"], bob_id.as_str());
    let request_id = request["id"].as_str().unwrap().to_string();

    // Bob sees it in his incoming listing with Alice's profile attached
    let response = server
        .get("/api/users/friend-requests")
        .add_header("Authorization", bearer(&bob_token))
        .await;
    response.assert_status_ok();
    let listing: serde_json::Value = response.json();
    assert_eq!(listing["incomingRequests"].as_array().unwrap().len(), 1);
    assert_eq!(
        listing["incomingRequests"][0]["sender"]["fullName"],
        "Alice"
    );

    // Bob accepts
    let response = server
        .put(&format!("/api/users/friend-request/{}/accept", request_id))
        .add_header("Authorization", bearer(&bob_token))
        .await;
    response.assert_status_ok();

    // Both friends listings now contain the other user
    let response = server
        .get("/api/users/friends")
        .add_header("Authorization", bearer(&alice_token))
        .await;
    let alice_friends: serde_json::Value = response.json();
    assert_eq!(alice_friends.as_array().unwrap().len(), 1);
    assert_eq!(alice_friends[0]["id"], bob_id.as_str());

    let response = server
        .get("/api/users/friends")
        .add_header("Authorization", bearer(&bob_token))
        .await;
    let bob_friends: serde_json::Value = response.json();
    assert_eq!(bob_friends.as_array().unwrap().len(), 1);
    assert_eq!(bob_friends[0]["id"], alice_id.as_str());

    // Accepting a second time is a conflict
    let response = server
        .put(&format!("/api/users/friend-request/{}/accept", request_id))
        .add_header("Authorization", bearer(&bob_token))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    // Alice sees the accepted request in the combined listing
    let response = server
        .get("/api/users/friend-requests")
        .add_header("Authorization", bearer(&alice_token))
        .await;
    let listing: serde_json::Value = response.json();
    assert_eq!(listing["acceptedReqs"].as_array().unwrap().len(), 1);
    assert_eq!(listing["acceptedReqs"][0]["recipient"]["fullName"], "Bob");
}

#[tokio::test]
async fn test_send_friend_request_to_self() {
    let server = create_test_server().await;
    let (token, user_id) = onboarded_user(&server, "Loner", "loner@example.com").await;

    let response = server
        .post(&format!("/api/users/friend-request/{}", user_id))
        .add_header("Authorization", bearer(&token))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_send_friend_request_to_unknown_user() {
    let server = create_test_server().await;
    let (token, _) = onboarded_user(&server, "Alice", "alice@example.com").await;

    let response = server
        .post("/api/users/friend-request/does-not-exist")
        .add_header("Authorization", bearer(&token))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_friend_request_conflicts_in_both_directions() {
    let server = create_test_server().await;
    let (alice_token, _alice_id) = onboarded_user(&server, "Alice", "alice@example.com").await;
    let (bob_token, bob_id) = onboarded_user(&server, "Bob", "bob@example.com").await;

    let response = server
        .post(&format!("/api/users/friend-request/{}", bob_id))
        .add_header("Authorization", bearer(&alice_token))
        .await;
    response.assert_status(StatusCode::CREATED);
    let request: serde_json::Value = response.json();
    let alice_id = request["sender"].as_str().unwrap().to_string();

    // Same direction again
    let response = server
        .post(&format!("/api/users/friend-request/{}", bob_id))
        .add_header("Authorization", bearer(&alice_token))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    // Opposite direction
    let response = server
        .post(&format!("/api/users/friend-request/{}", alice_id))
        .add_header("Authorization", bearer(&bob_token))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_accept_forbidden_for_non_recipient() {
    let server = create_test_server().await;
    let (alice_token, _) = onboarded_user(&server, "Alice", "alice@example.com").await;
    let (_, bob_id) = onboarded_user(&server, "Bob", "bob@example.com").await;
    let (carol_token, _) = onboarded_user(&server, "Carol", "carol@example.com").await;

    let response = server
        .post(&format!("/api/users/friend-request/{}", bob_id))
        .add_header("Authorization", bearer(&alice_token))
        .await;
    let request: serde_json::Value = response.json();
    let request_id = request["id"].as_str().unwrap();

    // The sender cannot accept their own request
    let response = server
        .put(&format!("/api/users/friend-request/{}/accept", request_id))
        .add_header("Authorization", bearer(&alice_token))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    // Neither can an unrelated user
    let response = server
        .put(&format!("/api/users/friend-request/{}/accept", request_id))
        .add_header("Authorization", bearer(&carol_token))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_decline_keeps_friends_empty_and_frees_the_pair() {
    let server = create_test_server().await;
    let (alice_token, alice_id) = onboarded_user(&server, "Alice", "alice@example.com").await;
    let (bob_token, bob_id) = onboarded_user(&server, "Bob", "bob@example.com").await;

    let response = server
        .post(&format!("/api/users/friend-request/{}", bob_id))
        .add_header("Authorization", bearer(&alice_token))
        .await;
    let request: serde_json::Value = response.json();
    let request_id = request["id"].as_str().unwrap().to_string();

    let response = server
        .delete(&format!(
            "/api/users/friend-request/{}/decline",
            request_id
        ))
        .add_header("Authorization", bearer(&bob_token))
        .await;
    response.assert_status_ok();

    // No friendship edge was created
    let response = server
        .get("/api/users/friends")
        .add_header("Authorization", bearer(&alice_token))
        .await;
    let friends: serde_json::Value = response.json();
    assert!(friends.as_array().unwrap().is_empty());

    // Declining again is a conflict
    let response = server
        .delete(&format!(
            "/api/users/friend-request/{}/decline",
            request_id
        ))
        .add_header("Authorization", bearer(&bob_token))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    // The pair can start over, in either direction
    let response = server
        .post(&format!("/api/users/friend-request/{}", alice_id))
        .add_header("Authorization", bearer(&bob_token))
        .await;
    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_outgoing_friend_requests_listing() {
    let server = create_test_server().await;
    let (alice_token, _) = onboarded_user(&server, "Alice", "alice@example.com").await;
    let (_, bob_id) = onboarded_user(&server, "Bob", "bob@example.com").await;
    let (_, carol_id) = onboarded_user(&server, "Carol", "carol@example.com").await;

    for id in [&bob_id, &carol_id] {
        server
            .post(&format!("/api/users/friend-request/{}", id))
            .add_header("Authorization", bearer(&alice_token))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = server
        .get("/api/users/outgoing-friend-requests")
        .add_header("Authorization", bearer(&alice_token))
        .await;
    response.assert_status_ok();

    let outgoing: serde_json::Value = response.json();
    let outgoing = outgoing.as_array().unwrap();
    assert_eq!(outgoing.len(), 2);
    for entry in outgoing {
        assert_eq!(entry["status"], "pending");
        assert!(entry["recipient"]["fullName"].is_string());
    }
}

#[tokio::test]
async fn test_recommendations_exclude_self_friends_and_not_onboarded() {
    let server = create_test_server().await;
    let (alice_token, _alice_id) = onboarded_user(&server, "Alice", "alice@example.com").await;
    let (bob_token, bob_id) = onboarded_user(&server, "Bob", "bob@example.com").await;
    let (_carol_token, carol_id) = onboarded_user(&server, "Carol", "carol@example.com").await;

    // Dave signs up but never onboards
    server
        .post("/api/auth/signup")
        .json(&serde_json::json!({
            "fullName": "Dave",
            "email": "dave@example.com",
            "password": "password123"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    // Alice and Bob become friends
    let response = server
        .post(&format!("/api/users/friend-request/{}", bob_id))
        .add_header("Authorization", bearer(&alice_token))
        .await;
    let request: serde_json::Value = response.json();
    let request_id = request["id"].as_str().unwrap();
    server
        .put(&format!("/api/users/friend-request/{}/accept", request_id))
        .add_header("Authorization", bearer(&bob_token))
        .await
        .assert_status_ok();

    let response = server
        .get("/api/users")
        .add_header("Authorization", bearer(&alice_token))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let recommended = body["recommendedUsers"].as_array().unwrap();
    assert_eq!(recommended.len(), 1);
    assert_eq!(recommended[0]["id"], carol_id.as_str());
}
