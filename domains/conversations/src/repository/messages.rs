//! Message repository

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::domain::entities::{Message, NewMessage};
use advisor_common::Result;

const MESSAGE_COLUMNS: &str = "id, conversation_id, role, content, created_at";

#[derive(Clone)]
pub struct MessageRepository {
    pool: SqlitePool,
}

impl MessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List messages for a conversation in chronological order.
    /// Ties on `created_at` (batch inserts share a timestamp) fall back to
    /// the auto-assigned id, which is insertion order.
    pub async fn list_by_conversation(&self, conversation_id: &str) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages \
             WHERE conversation_id = ? \
             ORDER BY created_at ASC, id ASC"
        ))
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }
}

/// Insert a message within a transaction; the database assigns the id
pub(crate) async fn insert_tx(
    tx: &mut Transaction<'_, Sqlite>,
    conversation_id: &str,
    msg: &NewMessage,
    created_at: DateTime<Utc>,
) -> std::result::Result<Message, sqlx::Error> {
    sqlx::query_as::<_, Message>(&format!(
        "INSERT INTO messages (conversation_id, role, content, created_at) \
         VALUES (?, ?, ?, ?) \
         RETURNING {MESSAGE_COLUMNS}"
    ))
    .bind(conversation_id)
    .bind(msg.role)
    .bind(&msg.content)
    .bind(created_at)
    .fetch_one(&mut **tx)
    .await
}
