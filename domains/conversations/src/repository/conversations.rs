//! Conversation repository

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::domain::entities::Conversation;
use advisor_common::Result;

const CONVERSATION_COLUMNS: &str = "id, title, created_at, updated_at";

#[derive(Clone)]
pub struct ConversationRepository {
    pool: SqlitePool,
}

impl ConversationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find conversation by ID
    pub async fn find(&self, id: &str) -> Result<Option<Conversation>> {
        let conv = sqlx::query_as::<_, Conversation>(&format!(
            "SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(conv)
    }

    /// List conversations ordered by most recently updated first
    pub async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Conversation>> {
        let convs = sqlx::query_as::<_, Conversation>(&format!(
            "SELECT {CONVERSATION_COLUMNS} FROM conversations \
             ORDER BY updated_at DESC LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(convs)
    }

    /// Create a new conversation
    pub async fn create(&self, conv: &Conversation) -> Result<Conversation> {
        let created = sqlx::query_as::<_, Conversation>(&format!(
            "INSERT INTO conversations (id, title, created_at, updated_at) \
             VALUES (?, ?, ?, ?) \
             RETURNING {CONVERSATION_COLUMNS}"
        ))
        .bind(&conv.id)
        .bind(&conv.title)
        .bind(conv.created_at)
        .bind(conv.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update a conversation's title. `title = None` leaves the stored title
    /// untouched; `updated_at` is bumped either way.
    pub async fn update(&self, id: &str, title: Option<&str>) -> Result<Option<Conversation>> {
        let updated = sqlx::query_as::<_, Conversation>(&format!(
            "UPDATE conversations SET \
                 title = CASE WHEN ? THEN ? ELSE title END, \
                 updated_at = ? \
             WHERE id = ? \
             RETURNING {CONVERSATION_COLUMNS}"
        ))
        .bind(title.is_some())
        .bind(title)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a conversation; messages go with it via ON DELETE CASCADE
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM conversations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Bump `updated_at` (and optionally set the title) within a transaction
pub(crate) async fn touch_tx(
    tx: &mut Transaction<'_, Sqlite>,
    id: &str,
    title: Option<&str>,
    updated_at: DateTime<Utc>,
) -> std::result::Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE conversations SET \
             title = CASE WHEN ? THEN ? ELSE title END, \
             updated_at = ? \
         WHERE id = ?",
    )
    .bind(title.is_some())
    .bind(title)
    .bind(updated_at)
    .bind(id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
