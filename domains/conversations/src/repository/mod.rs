//! Repository implementations for the Conversations domain

pub mod conversations;
pub mod messages;

use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::entities::{Message, NewMessage};
use advisor_common::Result;

pub use conversations::ConversationRepository;
pub use messages::MessageRepository;

/// Combined repository access for the Conversations domain
#[derive(Clone)]
pub struct ConversationsRepositories {
    pool: SqlitePool,
    pub conversations: ConversationRepository,
    pub messages: MessageRepository,
}

impl ConversationsRepositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            conversations: ConversationRepository::new(pool.clone()),
            messages: MessageRepository::new(pool.clone()),
            pool,
        }
    }

    /// Append a validated batch of messages to a conversation.
    ///
    /// Runs in a single transaction so the batch commits or rolls back as a
    /// unit: every message is inserted in input order, the conversation's
    /// `updated_at` is bumped once, and `new_title` is stored when the
    /// caller derived one. All messages in the batch share one timestamp;
    /// their auto-assigned ids preserve input order.
    pub async fn append_messages(
        &self,
        conversation_id: &str,
        items: &[NewMessage],
        new_title: Option<&str>,
    ) -> Result<Vec<Message>> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let msg = messages::insert_tx(&mut tx, conversation_id, item, now).await?;
            created.push(msg);
        }

        conversations::touch_tx(&mut tx, conversation_id, new_title, now).await?;
        tx.commit().await?;

        Ok(created)
    }
}
