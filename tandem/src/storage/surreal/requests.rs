//! Friend-request storage implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, RecordId};

use super::base::DocumentStore;
use super::record_key;
use crate::models::{FriendRequest, RequestStatus};
use crate::storage::errors::StorageError;
use crate::storage::filters::RequestFilter;
use crate::storage::traits::FriendRequestStore;

/// Internal representation of a friend-request record for SurrealDB
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct RequestRecord {
    id: RecordId,
    sender: String,
    recipient: String,
    status: RequestStatus,
    pair_key: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Struct for creating friend-request records (without the id field)
#[derive(Debug, Clone, serde::Serialize)]
struct RequestContent {
    sender: String,
    recipient: String,
    status: RequestStatus,
    pair_key: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&FriendRequest> for RequestContent {
    fn from(request: &FriendRequest) -> Self {
        Self {
            sender: request.sender.clone(),
            recipient: request.recipient.clone(),
            status: request.status,
            pair_key: request.pair_key.clone(),
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

impl From<RequestRecord> for FriendRequest {
    fn from(record: RequestRecord) -> Self {
        Self {
            id: record_key(&record.id),
            sender: record.sender,
            recipient: record.recipient,
            status: record.status,
            pair_key: record.pair_key,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[async_trait]
impl<C> FriendRequestStore for DocumentStore<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_request(&self, request: FriendRequest) -> Result<FriendRequest, StorageError> {
        let content = RequestContent::from(&request);

        let created: Option<RequestRecord> = self
            .client
            .create(("friend_request", request.id.as_str()))
            .content(content)
            .await
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("already contains") {
                    StorageError::AlreadyExists(
                        "a pending friend request already exists for this pair".to_string(),
                    )
                } else {
                    StorageError::Query(format!("Failed to create friend request: {}", msg))
                }
            })?;

        created
            .map(FriendRequest::from)
            .ok_or_else(|| StorageError::Internal("No friend request created".to_string()))
    }

    async fn get_request(&self, id: &str) -> Result<Option<FriendRequest>, StorageError> {
        let record: Option<RequestRecord> = self
            .client
            .select(("friend_request", id))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get friend request: {}", e)))?;

        Ok(record.map(FriendRequest::from))
    }

    async fn list_requests(
        &self,
        filter: RequestFilter,
    ) -> Result<Vec<FriendRequest>, StorageError> {
        let mut query = String::from("SELECT * FROM friend_request");
        let mut conditions = Vec::new();

        if filter.sender.is_some() {
            conditions.push("sender = $sender");
        }
        if filter.recipient.is_some() {
            conditions.push("recipient = $recipient");
        }
        if filter.status.is_some() {
            conditions.push("status = $status");
        }
        if filter.pair_key.is_some() {
            conditions.push("pair_key = $pair_key");
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY created_at DESC");

        let mut request = self.client.query(query);
        if let Some(sender) = filter.sender {
            request = request.bind(("sender", sender));
        }
        if let Some(recipient) = filter.recipient {
            request = request.bind(("recipient", recipient));
        }
        if let Some(status) = filter.status {
            request = request.bind(("status", status));
        }
        if let Some(pair_key) = filter.pair_key {
            request = request.bind(("pair_key", pair_key));
        }

        let mut response = request
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list friend requests: {}", e)))?;

        let records: Vec<RequestRecord> = response
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract friend requests: {}", e)))?;

        Ok(records.into_iter().map(FriendRequest::from).collect())
    }

    async fn resolve_request(
        &self,
        request_id: &str,
        status: RequestStatus,
    ) -> Result<Option<FriendRequest>, StorageError> {
        // The WHERE guard makes the transition conditional: a request that
        // is already terminal matches nothing and nothing is written.
        let query = r#"
            UPDATE $record_id
                SET status = $status, pair_key = $pair_key, updated_at = $updated_at
                WHERE status = 'pending'
        "#;

        let mut response = self
            .client
            .query(query)
            .bind(("record_id", RecordId::from(("friend_request", request_id))))
            .bind(("status", status))
            .bind(("pair_key", FriendRequest::resolved_pair_key(request_id)))
            .bind(("updated_at", Utc::now()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to resolve friend request: {}", e)))?;

        let updated: Vec<RequestRecord> = response
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract updated request: {}", e)))?;

        Ok(updated.into_iter().next().map(FriendRequest::from))
    }

    async fn accept_request(
        &self,
        request_id: &str,
        sender_id: &str,
        recipient_id: &str,
    ) -> Result<Option<FriendRequest>, StorageError> {
        // Status transition and both friends-set updates commit together or
        // not at all; the THROW aborts the transaction when the request is
        // no longer pending, so a lost race cannot create a partial edge.
        let query = r#"
            BEGIN TRANSACTION;
            LET $updated = (
                UPDATE $record_id
                    SET status = 'accepted', pair_key = $pair_key, updated_at = $updated_at
                    WHERE status = 'pending'
            );
            IF array::len($updated) = 0 { THROW "request_not_pending" };
            UPDATE $sender SET friends = array::union(friends, [$recipient_key]), updated_at = $updated_at;
            UPDATE $recipient SET friends = array::union(friends, [$sender_key]), updated_at = $updated_at;
            COMMIT TRANSACTION;
        "#;

        let response = self
            .client
            .query(query)
            .bind(("record_id", RecordId::from(("friend_request", request_id))))
            .bind(("pair_key", FriendRequest::resolved_pair_key(request_id)))
            .bind(("sender", RecordId::from(("user", sender_id))))
            .bind(("recipient", RecordId::from(("user", recipient_id))))
            .bind(("sender_key", sender_id.to_string()))
            .bind(("recipient_key", recipient_id.to_string()))
            .bind(("updated_at", Utc::now()))
            .await
            .map_err(|e| {
                StorageError::Transaction(format!("Failed to accept friend request: {}", e))
            })?;

        match response.check() {
            Ok(_) => self.get_request(request_id).await,
            Err(e) if e.to_string().contains("request_not_pending") => Ok(None),
            Err(e) => Err(StorageError::Transaction(format!(
                "Failed to accept friend request: {}",
                e
            ))),
        }
    }
}
