//! Schema initialization for the document store

use surrealdb::{Connection, Surreal};

use crate::storage::errors::StorageError;

/// Initialize tables and indexes for the social data model
pub async fn initialize_schema<C>(client: &Surreal<C>) -> Result<(), StorageError>
where
    C: Connection,
{
    // User accounts. The unique email index is what makes duplicate signups
    // fail at write time even when two requests race past the lookup.
    let user_table_query = r#"
        DEFINE TABLE IF NOT EXISTS user SCHEMALESS
        COMMENT "Stores user accounts and their friends set";

        DEFINE INDEX IF NOT EXISTS user_email_idx ON user FIELDS email UNIQUE;
        DEFINE INDEX IF NOT EXISTS user_onboarded_idx ON user FIELDS is_onboarded;
    "#;

    // Friend requests. pair_key is the canonical unordered-pair key while a
    // request is pending; the unique index allows only one active request
    // per pair regardless of direction.
    let request_table_query = r#"
        DEFINE TABLE IF NOT EXISTS friend_request SCHEMALESS
        COMMENT "Stores directed friend requests with a lifecycle status";

        DEFINE INDEX IF NOT EXISTS request_pair_idx ON friend_request FIELDS pair_key UNIQUE;
        DEFINE INDEX IF NOT EXISTS request_sender_idx ON friend_request FIELDS sender;
        DEFINE INDEX IF NOT EXISTS request_recipient_idx ON friend_request FIELDS recipient;
        DEFINE INDEX IF NOT EXISTS request_status_idx ON friend_request FIELDS status;
    "#;

    for query in [user_table_query, request_table_query] {
        client
            .query(query)
            .await
            .map_err(|e| StorageError::Query(format!("Failed to initialize schema: {}", e)))?;
    }

    Ok(())
}
