//! Message API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use advisor_common::{Result, ValidatedJson};

use super::conversation_not_found;
use crate::api::state::ConversationsState;
use crate::domain::entities::{Conversation, Message, MessageRole, NewMessage};

/// One item of a message batch. An unknown role fails deserialization, so
/// the whole request is rejected before any handler logic runs.
#[derive(Debug, Deserialize, Validate)]
pub struct MessageCreate {
    pub role: MessageRole,

    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
}

/// Request body for the batch add endpoint: a JSON array of messages.
/// Validation is all-or-nothing; one bad item rejects the entire batch.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct MessageBatch(pub Vec<MessageCreate>);

impl Validate for MessageBatch {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        for item in &self.0 {
            item.validate()?;
        }
        Ok(())
    }
}

/// Message response DTO
#[derive(Debug, Serialize)]
pub struct MessageRead {
    pub id: i64,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageRead {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            role: m.role,
            content: m.content,
            created_at: m.created_at,
        }
    }
}

/// Append a batch of messages to a conversation.
///
/// All messages are persisted in input order inside one transaction. The
/// conversation's `updated_at` is bumped once, and when the conversation has
/// no title yet, one is derived from the first user-role message in the
/// batch. A title that is already set is never regenerated.
pub async fn add_messages(
    State(state): State<ConversationsState>,
    Path(id): Path<String>,
    ValidatedJson(MessageBatch(items)): ValidatedJson<MessageBatch>,
) -> Result<(StatusCode, Json<Vec<MessageRead>>)> {
    let conversation = state
        .repos
        .conversations
        .find(&id)
        .await?
        .ok_or_else(|| conversation_not_found(&id))?;

    let drafts = items
        .into_iter()
        .map(|m| NewMessage::new(m.role, m.content))
        .collect::<Result<Vec<_>>>()?;

    let new_title = match conversation.title {
        None => drafts
            .iter()
            .find(|m| m.role == MessageRole::User)
            .map(|m| Conversation::derive_title(&m.content)),
        Some(_) => None,
    };

    let created = state
        .repos
        .append_messages(&id, &drafts, new_title.as_deref())
        .await?;

    tracing::debug!(conversation_id = %id, count = created.len(), "Messages appended");

    let responses: Vec<MessageRead> = created.into_iter().map(Into::into).collect();
    Ok((StatusCode::CREATED, Json(responses)))
}

/// List all messages for a conversation, oldest first
pub async fn list_messages(
    State(state): State<ConversationsState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MessageRead>>> {
    state
        .repos
        .conversations
        .find(&id)
        .await?
        .ok_or_else(|| conversation_not_found(&id))?;

    let messages = state.repos.messages.list_by_conversation(&id).await?;

    let responses: Vec<MessageRead> = messages.into_iter().map(Into::into).collect();
    Ok(Json(responses))
}
