//! Conversations domain state

use crate::ConversationsRepositories;

/// Application state for the Conversations domain.
///
/// Handlers only hold repositories; there is no cross-request mutable
/// business state.
#[derive(Clone)]
pub struct ConversationsState {
    pub repos: ConversationsRepositories,
}
