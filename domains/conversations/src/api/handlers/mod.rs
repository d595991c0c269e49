//! Request handlers for the Conversations domain

pub mod conversations;
pub mod messages;

use advisor_common::Error;

/// 404 error whose message names the missing conversation id
pub(crate) fn conversation_not_found(id: &str) -> Error {
    Error::NotFound(format!("Conversation with id '{id}' not found"))
}
