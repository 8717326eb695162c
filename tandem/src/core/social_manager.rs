//! Social manager interface for Tandem
//!
//! The primary interface for interacting with the social system. All
//! friendship workflow rules live here; the storage layer only persists and
//! supplies the uniqueness/atomicity primitives these rules rely on.

use std::sync::Arc;

use crate::auth::{hash_password, verify_password};
use crate::config::TandemConfig;
use crate::models::{
    pair_key, FriendRequest, NewUser, OnboardingProfile, ProfileSummary, RequestStatus, User,
};
use crate::storage::{RequestFilter, SocialStore, UserFilter};
use crate::{Result, TandemError};

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// The primary interface for interacting with Tandem's social system
#[derive(Clone)]
pub struct SocialManager {
    store: Arc<dyn SocialStore>,
    config: TandemConfig,
}

impl std::fmt::Debug for SocialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocialManager")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SocialManager {
    /// Create a new social manager with the provided storage and configuration
    pub fn new(store: Arc<dyn SocialStore>, config: TandemConfig) -> Self {
        Self { store, config }
    }

    /// Get the underlying store for advanced operations
    pub fn store(&self) -> Arc<dyn SocialStore> {
        Arc::clone(&self.store)
    }

    /// Get the configuration
    pub fn config(&self) -> &TandemConfig {
        &self.config
    }

    // =========================================================================
    // Identity operations
    // =========================================================================

    /// Register a new account.
    ///
    /// Validates the input, hashes the password, and persists the user.
    /// Fails with `Conflict` when the email is already taken.
    pub async fn register_user(&self, new_user: NewUser) -> Result<User> {
        if new_user.full_name.trim().is_empty() {
            return Err(TandemError::Validation("full name is required".to_string()));
        }
        if new_user.email.trim().is_empty() {
            return Err(TandemError::Validation("email is required".to_string()));
        }
        if !is_valid_email(new_user.email.trim()) {
            return Err(TandemError::Validation("email is not valid".to_string()));
        }
        if new_user.password.len() < MIN_PASSWORD_LENGTH {
            return Err(TandemError::Validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let email = new_user.email.trim().to_lowercase();
        if self.store.get_user_by_email(&email).await?.is_some() {
            return Err(TandemError::Conflict(format!(
                "email '{}' is already registered",
                email
            )));
        }

        let password_hash = hash_password(&new_user.password)?;
        let user = User::new(&new_user, password_hash);

        // The unique email index catches two signups racing past the lookup.
        let user = self.store.create_user(user).await?;
        tracing::info!(user_id = %user.id, "registered new user");

        Ok(user)
    }

    /// Verify credentials and return the matching account.
    ///
    /// The same failure is reported for an unknown email and a wrong
    /// password.
    pub async fn authenticate_user(&self, email: &str, password: &str) -> Result<User> {
        let email = email.trim().to_lowercase();
        let user = self
            .store
            .get_user_by_email(&email)
            .await?
            .ok_or_else(|| TandemError::Unauthenticated("invalid email or password".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(TandemError::Unauthenticated(
                "invalid email or password".to_string(),
            ));
        }

        Ok(user)
    }

    /// Get a user by id
    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.store.get_user(id).await?)
    }

    /// Complete the one-time profile step and mark the account as onboarded
    pub async fn complete_onboarding(
        &self,
        user_id: &str,
        profile: OnboardingProfile,
    ) -> Result<User> {
        let mut user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| TandemError::NotFound(format!("user {} not found", user_id)))?;

        user.full_name = profile.full_name;
        user.bio = profile.bio;
        user.native_language = profile.native_language;
        user.learning_language = profile.learning_language;
        user.location = profile.location;
        user.is_onboarded = true;

        let user = self.store.update_user(user).await?;
        tracing::info!(user_id = %user.id, "user completed onboarding");

        Ok(user)
    }

    // =========================================================================
    // Social graph operations
    // =========================================================================

    /// Users the caller could befriend: onboarded accounts that are neither
    /// the caller nor already friends with the caller. Order is unspecified.
    pub async fn recommended_users(&self, caller: &User) -> Result<Vec<User>> {
        let filter = UserFilter {
            is_onboarded: Some(true),
            ..Default::default()
        };
        let candidates = self.store.list_users(filter).await?;

        Ok(candidates
            .into_iter()
            .filter(|user| user.id != caller.id && !caller.friends.contains(&user.id))
            .collect())
    }

    /// The caller's friends as profile summaries
    pub async fn friends_of(&self, caller_id: &str) -> Result<Vec<ProfileSummary>> {
        let caller = self
            .store
            .get_user(caller_id)
            .await?
            .ok_or_else(|| TandemError::NotFound(format!("user {} not found", caller_id)))?;

        let mut friends = Vec::with_capacity(caller.friends.len());
        for friend_id in &caller.friends {
            match self.store.get_user(friend_id).await? {
                Some(friend) => friends.push(friend.summary()),
                None => tracing::warn!(
                    friend_id = %friend_id,
                    user_id = %caller_id,
                    "friend entry points at a missing user"
                ),
            }
        }

        Ok(friends)
    }

    /// Send a friend request from the caller to another user
    pub async fn send_request(&self, caller: &User, recipient_id: &str) -> Result<FriendRequest> {
        if caller.id == recipient_id {
            return Err(TandemError::InvalidOperation(
                "you cannot send a friend request to yourself".to_string(),
            ));
        }

        let recipient = self
            .store
            .get_user(recipient_id)
            .await?
            .ok_or_else(|| TandemError::NotFound("recipient not found".to_string()))?;

        if recipient.friends.contains(&caller.id) {
            return Err(TandemError::Conflict(
                "you are already friends with this user".to_string(),
            ));
        }

        // One pending request per unordered pair, whichever side sent it.
        let existing = self
            .store
            .list_requests(RequestFilter {
                pair_key: Some(pair_key(&caller.id, &recipient.id)),
                status: Some(RequestStatus::Pending),
                ..Default::default()
            })
            .await?;
        if !existing.is_empty() {
            return Err(TandemError::Conflict(
                "a friend request already exists between you and this user".to_string(),
            ));
        }

        // The unique pair_key index turns a concurrent duplicate into a
        // Conflict instead of a second pending request.
        let request = self
            .store
            .create_request(FriendRequest::new(&caller.id, &recipient.id))
            .await?;
        tracing::info!(request_id = %request.id, sender = %caller.id, recipient = %recipient.id, "friend request sent");

        Ok(request)
    }

    /// Accept a pending request addressed to the caller.
    ///
    /// On success both users hold each other in their friends sets; the
    /// store applies the transition and both updates atomically.
    pub async fn accept_request(&self, caller_id: &str, request_id: &str) -> Result<FriendRequest> {
        let request = self
            .store
            .get_request(request_id)
            .await?
            .ok_or_else(|| TandemError::NotFound("friend request not found".to_string()))?;

        if request.recipient != caller_id {
            return Err(TandemError::Forbidden(
                "you are not the recipient of this friend request".to_string(),
            ));
        }
        if !request.status.is_pending() {
            return Err(TandemError::Conflict(
                "this friend request has already been resolved".to_string(),
            ));
        }

        let accepted = self
            .store
            .accept_request(request_id, &request.sender, &request.recipient)
            .await?
            .ok_or_else(|| {
                TandemError::Conflict("this friend request has already been resolved".to_string())
            })?;
        tracing::info!(request_id = %request_id, "friend request accepted");

        Ok(accepted)
    }

    /// Decline a pending request addressed to the caller. No friends-set
    /// mutation; the pair becomes free for a future request.
    pub async fn decline_request(
        &self,
        caller_id: &str,
        request_id: &str,
    ) -> Result<FriendRequest> {
        let request = self
            .store
            .get_request(request_id)
            .await?
            .ok_or_else(|| TandemError::NotFound("friend request not found".to_string()))?;

        if request.recipient != caller_id {
            return Err(TandemError::Forbidden(
                "you are not the recipient of this friend request".to_string(),
            ));
        }
        if !request.status.is_pending() {
            return Err(TandemError::Conflict(
                "this friend request has already been resolved".to_string(),
            ));
        }

        let declined = self
            .store
            .resolve_request(request_id, RequestStatus::Declined)
            .await?
            .ok_or_else(|| {
                TandemError::Conflict("this friend request has already been resolved".to_string())
            })?;
        tracing::info!(request_id = %request_id, "friend request declined");

        Ok(declined)
    }

    /// Pending requests addressed to the caller, with sender summaries
    pub async fn incoming_requests(
        &self,
        caller_id: &str,
    ) -> Result<Vec<(FriendRequest, ProfileSummary)>> {
        let requests = self
            .store
            .list_requests(RequestFilter {
                recipient: Some(caller_id.to_string()),
                status: Some(RequestStatus::Pending),
                ..Default::default()
            })
            .await?;

        self.expand_requests(requests, Counterpart::Sender).await
    }

    /// Requests the caller sent that were accepted, with recipient summaries
    pub async fn outgoing_accepted(
        &self,
        caller_id: &str,
    ) -> Result<Vec<(FriendRequest, ProfileSummary)>> {
        let requests = self
            .store
            .list_requests(RequestFilter {
                sender: Some(caller_id.to_string()),
                status: Some(RequestStatus::Accepted),
                ..Default::default()
            })
            .await?;

        self.expand_requests(requests, Counterpart::Recipient).await
    }

    /// Pending requests the caller sent, with recipient summaries
    pub async fn outgoing_pending(
        &self,
        caller_id: &str,
    ) -> Result<Vec<(FriendRequest, ProfileSummary)>> {
        let requests = self
            .store
            .list_requests(RequestFilter {
                sender: Some(caller_id.to_string()),
                status: Some(RequestStatus::Pending),
                ..Default::default()
            })
            .await?;

        self.expand_requests(requests, Counterpart::Recipient).await
    }

    /// Attach the counterpart user's profile summary to each request
    async fn expand_requests(
        &self,
        requests: Vec<FriendRequest>,
        counterpart: Counterpart,
    ) -> Result<Vec<(FriendRequest, ProfileSummary)>> {
        let mut expanded = Vec::with_capacity(requests.len());
        for request in requests {
            let other_id = match counterpart {
                Counterpart::Sender => request.sender.clone(),
                Counterpart::Recipient => request.recipient.clone(),
            };
            match self.store.get_user(&other_id).await? {
                Some(user) => expanded.push((request, user.summary())),
                None => tracing::warn!(
                    request_id = %request.id,
                    user_id = %other_id,
                    "friend request references a missing user"
                ),
            }
        }
        Ok(expanded)
    }
}

/// Which side of a request to expand in a listing
#[derive(Debug, Clone, Copy)]
enum Counterpart {
    Sender,
    Recipient,
}

/// Minimal shape check for email addresses
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;

    async fn test_manager() -> SocialManager {
        let config = ConfigBuilder::new().with_memory_storage().build().unwrap();
        crate::init(config).await.unwrap()
    }

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            full_name: name.to_string(),
            email: email.to_string(),
            password: "password123".to_string(),
            profile_picture: String::new(),
        }
    }

    async fn onboarded_user(manager: &SocialManager, name: &str, email: &str) -> User {
        let user = manager.register_user(new_user(name, email)).await.unwrap();
        manager
            .complete_onboarding(
                &user.id,
                OnboardingProfile {
                    full_name: name.to_string(),
                    bio: "learning languages".to_string(),
                    native_language: "english".to_string(),
                    learning_language: "spanish".to_string(),
                    location: "nowhere".to_string(),
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let manager = test_manager().await;
        let mut input = new_user("Short", "short@example.com");
        input.password = "five5".to_string();

        let err = manager.register_user(input).await.unwrap_err();
        assert!(matches!(err, TandemError::Validation(_)));

        // No record was created
        let user = manager
            .store()
            .get_user_by_email("short@example.com")
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_register_rejects_bad_email() {
        let manager = test_manager().await;
        let err = manager
            .register_user(new_user("Bad", "not-an-email"))
            .await
            .unwrap_err();
        assert!(matches!(err, TandemError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let manager = test_manager().await;
        manager
            .register_user(new_user("First", "dup@example.com"))
            .await
            .unwrap();

        let err = manager
            .register_user(new_user("Second", "Dup@Example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, TandemError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let manager = test_manager().await;
        let user = manager
            .register_user(new_user("Hashed", "hashed@example.com"))
            .await
            .unwrap();
        assert_ne!(user.password_hash, "password123");
        assert!(crate::auth::verify_password("password123", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_authenticate_user() {
        let manager = test_manager().await;
        manager
            .register_user(new_user("Login", "login@example.com"))
            .await
            .unwrap();

        let user = manager
            .authenticate_user("login@example.com", "password123")
            .await
            .unwrap();
        assert_eq!(user.email, "login@example.com");

        let err = manager
            .authenticate_user("login@example.com", "wrong-password")
            .await
            .unwrap_err();
        assert!(matches!(err, TandemError::Unauthenticated(_)));

        let err = manager
            .authenticate_user("nobody@example.com", "password123")
            .await
            .unwrap_err();
        assert!(matches!(err, TandemError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn test_onboarding_sets_flag_and_profile() {
        let manager = test_manager().await;
        let user = manager
            .register_user(new_user("Raw", "raw@example.com"))
            .await
            .unwrap();
        assert!(!user.is_onboarded);

        let user = manager
            .complete_onboarding(
                &user.id,
                OnboardingProfile {
                    full_name: "Raw Renamed".to_string(),
                    bio: "bio".to_string(),
                    native_language: "french".to_string(),
                    learning_language: "german".to_string(),
                    location: "paris".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(user.is_onboarded);
        assert_eq!(user.full_name, "Raw Renamed");
        assert_eq!(user.native_language, "french");

        // Persisted, not just returned
        let reloaded = manager.get_user(&user.id).await.unwrap().unwrap();
        assert!(reloaded.is_onboarded);
    }

    #[tokio::test]
    async fn test_recommendations_exclude_caller_friends_and_not_onboarded() {
        let manager = test_manager().await;
        let alice = onboarded_user(&manager, "Alice", "alice@example.com").await;
        let bob = onboarded_user(&manager, "Bob", "bob@example.com").await;
        let carol = onboarded_user(&manager, "Carol", "carol@example.com").await;
        // Dave never finished onboarding
        manager
            .register_user(new_user("Dave", "dave@example.com"))
            .await
            .unwrap();

        // Alice and Bob become friends
        let request = manager.send_request(&alice, &bob.id).await.unwrap();
        manager.accept_request(&bob.id, &request.id).await.unwrap();

        let alice = manager.get_user(&alice.id).await.unwrap().unwrap();
        let recommended = manager.recommended_users(&alice).await.unwrap();
        let ids: Vec<&str> = recommended.iter().map(|u| u.id.as_str()).collect();

        assert_eq!(ids, vec![carol.id.as_str()]);
    }

    #[tokio::test]
    async fn test_send_request_to_self_rejected() {
        let manager = test_manager().await;
        let alice = onboarded_user(&manager, "Alice", "alice@example.com").await;

        let err = manager.send_request(&alice, &alice.id).await.unwrap_err();
        assert!(matches!(err, TandemError::InvalidOperation(_)));
    }

    #[tokio::test]
    async fn test_send_request_to_unknown_recipient() {
        let manager = test_manager().await;
        let alice = onboarded_user(&manager, "Alice", "alice@example.com").await;

        let err = manager
            .send_request(&alice, "missing-user-id")
            .await
            .unwrap_err();
        assert!(matches!(err, TandemError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_request_rejected_in_both_directions() {
        let manager = test_manager().await;
        let alice = onboarded_user(&manager, "Alice", "alice@example.com").await;
        let bob = onboarded_user(&manager, "Bob", "bob@example.com").await;

        manager.send_request(&alice, &bob.id).await.unwrap();

        // Same direction
        let err = manager.send_request(&alice, &bob.id).await.unwrap_err();
        assert!(matches!(err, TandemError::Conflict(_)));

        // Opposite direction
        let err = manager.send_request(&bob, &alice.id).await.unwrap_err();
        assert!(matches!(err, TandemError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_accept_creates_symmetric_friendship() {
        let manager = test_manager().await;
        let alice = onboarded_user(&manager, "Alice", "alice@example.com").await;
        let bob = onboarded_user(&manager, "Bob", "bob@example.com").await;

        let request = manager.send_request(&alice, &bob.id).await.unwrap();
        let accepted = manager.accept_request(&bob.id, &request.id).await.unwrap();
        assert_eq!(accepted.status, RequestStatus::Accepted);

        let alice = manager.get_user(&alice.id).await.unwrap().unwrap();
        let bob = manager.get_user(&bob.id).await.unwrap().unwrap();
        assert!(alice.friends.contains(&bob.id));
        assert!(bob.friends.contains(&alice.id));

        // Sending again now fails because they are already friends
        let err = manager.send_request(&alice, &bob.id).await.unwrap_err();
        assert!(matches!(err, TandemError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_accept_requires_recipient() {
        let manager = test_manager().await;
        let alice = onboarded_user(&manager, "Alice", "alice@example.com").await;
        let bob = onboarded_user(&manager, "Bob", "bob@example.com").await;
        let carol = onboarded_user(&manager, "Carol", "carol@example.com").await;

        let request = manager.send_request(&alice, &bob.id).await.unwrap();

        // Neither the sender nor a third party may accept
        let err = manager
            .accept_request(&alice.id, &request.id)
            .await
            .unwrap_err();
        assert!(matches!(err, TandemError::Forbidden(_)));

        let err = manager
            .accept_request(&carol.id, &request.id)
            .await
            .unwrap_err();
        assert!(matches!(err, TandemError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_resolved_request_cannot_transition_again() {
        let manager = test_manager().await;
        let alice = onboarded_user(&manager, "Alice", "alice@example.com").await;
        let bob = onboarded_user(&manager, "Bob", "bob@example.com").await;

        let request = manager.send_request(&alice, &bob.id).await.unwrap();
        manager.accept_request(&bob.id, &request.id).await.unwrap();

        let err = manager
            .accept_request(&bob.id, &request.id)
            .await
            .unwrap_err();
        assert!(matches!(err, TandemError::Conflict(_)));

        let err = manager
            .decline_request(&bob.id, &request.id)
            .await
            .unwrap_err();
        assert!(matches!(err, TandemError::Conflict(_)));

        // Status stayed accepted
        let stored = manager
            .store()
            .get_request(&request.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, RequestStatus::Accepted);
    }

    #[tokio::test]
    async fn test_decline_leaves_friends_untouched_and_frees_the_pair() {
        let manager = test_manager().await;
        let alice = onboarded_user(&manager, "Alice", "alice@example.com").await;
        let bob = onboarded_user(&manager, "Bob", "bob@example.com").await;

        let request = manager.send_request(&alice, &bob.id).await.unwrap();
        let declined = manager.decline_request(&bob.id, &request.id).await.unwrap();
        assert_eq!(declined.status, RequestStatus::Declined);

        let alice_reloaded = manager.get_user(&alice.id).await.unwrap().unwrap();
        let bob_reloaded = manager.get_user(&bob.id).await.unwrap().unwrap();
        assert!(alice_reloaded.friends.is_empty());
        assert!(bob_reloaded.friends.is_empty());

        // The pair can try again after a decline
        let second = manager.send_request(&bob, &alice.id).await.unwrap();
        assert_eq!(second.status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn test_request_listings() {
        let manager = test_manager().await;
        let alice = onboarded_user(&manager, "Alice", "alice@example.com").await;
        let bob = onboarded_user(&manager, "Bob", "bob@example.com").await;
        let carol = onboarded_user(&manager, "Carol", "carol@example.com").await;

        let to_bob = manager.send_request(&alice, &bob.id).await.unwrap();
        manager.send_request(&alice, &carol.id).await.unwrap();

        // Bob sees one incoming request from Alice
        let incoming = manager.incoming_requests(&bob.id).await.unwrap();
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].1.id, alice.id);
        assert_eq!(incoming[0].1.full_name, "Alice");

        // Alice sees two outgoing pending requests
        let pending = manager.outgoing_pending(&alice.id).await.unwrap();
        assert_eq!(pending.len(), 2);

        manager.accept_request(&bob.id, &to_bob.id).await.unwrap();

        // Accepted requests move listings
        let accepted = manager.outgoing_accepted(&alice.id).await.unwrap();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].1.id, bob.id);

        let pending = manager.outgoing_pending(&alice.id).await.unwrap();
        assert_eq!(pending.len(), 1);

        let incoming = manager.incoming_requests(&bob.id).await.unwrap();
        assert!(incoming.is_empty());
    }

    #[tokio::test]
    async fn test_friends_listing_uses_profile_summaries() {
        let manager = test_manager().await;
        let alice = onboarded_user(&manager, "Alice", "alice@example.com").await;
        let bob = onboarded_user(&manager, "Bob", "bob@example.com").await;

        let request = manager.send_request(&alice, &bob.id).await.unwrap();
        manager.accept_request(&bob.id, &request.id).await.unwrap();

        let friends = manager.friends_of(&alice.id).await.unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].id, bob.id);
        assert_eq!(friends[0].native_language, "english");
    }

    #[test]
    fn test_email_shape_check() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user name@example.com"));
    }
}
