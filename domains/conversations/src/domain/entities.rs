//! Domain entities for the Conversations domain
//!
//! A `Conversation` owns an ordered list of `Message`s. Entities carry the
//! shape validation rules; request-level validation happens in the API layer
//! before these constructors run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use advisor_common::{Error, Result};

/// Message sender role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// Maximum title length in characters (varchar(100))
pub const MAX_TITLE_LENGTH: usize = 100;

/// How many characters of the first user message become the auto-title
const TITLE_PREVIEW_CHARS: usize = 50;

/// Conversation entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Conversation {
    pub id: String,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new conversation with a generated UUID and no messages
    pub fn new(title: Option<String>) -> Result<Self> {
        // Validate title (optional, varchar(100))
        if let Some(ref t) = title {
            if t.chars().count() > MAX_TITLE_LENGTH {
                return Err(Error::Validation(format!(
                    "Title must be at most {} characters",
                    MAX_TITLE_LENGTH
                )));
            }
        }

        let now = Utc::now();
        Ok(Conversation {
            id: Uuid::new_v4().to_string(),
            title,
            created_at: now,
            updated_at: now,
        })
    }

    /// Derive a title from message content: the first 50 characters, with
    /// "..." appended when the content was longer than that.
    pub fn derive_title(content: &str) -> String {
        let mut title: String = content.chars().take(TITLE_PREVIEW_CHARS).collect();
        if content.chars().count() > TITLE_PREVIEW_CHARS {
            title.push_str("...");
        }
        title
    }
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub conversation_id: String,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A message that has not been persisted yet; the database assigns the id
/// and the insert stamps `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub role: MessageRole,
    pub content: String,
}

impl NewMessage {
    /// Create a message draft, rejecting empty content (CHECK length >= 1)
    pub fn new(role: MessageRole, content: String) -> Result<Self> {
        if content.is_empty() {
            return Err(Error::Validation(
                "Message content cannot be empty".to_string(),
            ));
        }
        Ok(NewMessage { role, content })
    }
}
