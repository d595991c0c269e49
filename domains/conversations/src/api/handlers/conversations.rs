//! Conversation management API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use advisor_common::{Pagination, Result, ValidatedJson, ValidatedQuery};

use super::conversation_not_found;
use super::messages::MessageRead;
use crate::api::state::ConversationsState;
use crate::domain::entities::Conversation;

/// Request body for creating a conversation
#[derive(Debug, Deserialize, Validate)]
pub struct ConversationCreate {
    /// Optional title; auto-derived from the first user message if unset
    #[validate(length(max = 100, message = "title must be at most 100 characters"))]
    pub title: Option<String>,
}

/// Request body for updating a conversation. A missing or null title leaves
/// the stored title untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct ConversationUpdate {
    #[validate(length(max = 100, message = "title must be at most 100 characters"))]
    pub title: Option<String>,
}

/// Conversation response DTO (without messages)
#[derive(Debug, Serialize)]
pub struct ConversationRead {
    pub id: String,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Conversation> for ConversationRead {
    fn from(c: Conversation) -> Self {
        Self {
            id: c.id,
            title: c.title,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Conversation response DTO including the full message history
#[derive(Debug, Serialize)]
pub struct ConversationReadWithMessages {
    pub id: String,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub messages: Vec<MessageRead>,
}

/// List conversations, most recently updated first
pub async fn list_conversations(
    State(state): State<ConversationsState>,
    ValidatedQuery(pagination): ValidatedQuery<Pagination>,
) -> Result<Json<Vec<ConversationRead>>> {
    let convs = state
        .repos
        .conversations
        .list(pagination.skip, pagination.limit)
        .await?;

    let responses: Vec<ConversationRead> = convs.into_iter().map(Into::into).collect();
    Ok(Json(responses))
}

/// Create a new conversation
pub async fn create_conversation(
    State(state): State<ConversationsState>,
    ValidatedJson(req): ValidatedJson<ConversationCreate>,
) -> Result<(StatusCode, Json<ConversationRead>)> {
    let conversation = Conversation::new(req.title)?;

    let created = state.repos.conversations.create(&conversation).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Get a single conversation with its messages in chronological order
pub async fn get_conversation(
    State(state): State<ConversationsState>,
    Path(id): Path<String>,
) -> Result<Json<ConversationReadWithMessages>> {
    let conv = state
        .repos
        .conversations
        .find(&id)
        .await?
        .ok_or_else(|| conversation_not_found(&id))?;

    let messages = state.repos.messages.list_by_conversation(&id).await?;

    Ok(Json(ConversationReadWithMessages {
        id: conv.id,
        title: conv.title,
        created_at: conv.created_at,
        updated_at: conv.updated_at,
        messages: messages.into_iter().map(Into::into).collect(),
    }))
}

/// Update a conversation's title. `updated_at` is bumped even when the
/// payload carries no title.
pub async fn update_conversation(
    State(state): State<ConversationsState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ConversationUpdate>,
) -> Result<Json<ConversationRead>> {
    let updated = state
        .repos
        .conversations
        .update(&id, req.title.as_deref())
        .await?
        .ok_or_else(|| conversation_not_found(&id))?;

    Ok(Json(updated.into()))
}

/// Delete a conversation and, via cascade, all its messages
pub async fn delete_conversation(
    State(state): State<ConversationsState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let deleted = state.repos.conversations.delete(&id).await?;
    if !deleted {
        return Err(conversation_not_found(&id));
    }

    Ok(StatusCode::NO_CONTENT)
}
