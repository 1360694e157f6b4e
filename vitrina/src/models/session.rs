use std::collections::BTreeMap;

use super::ConversationTurn;

/// All chat sessions of one user: chat name → turns in submission order.
/// Stored wholesale as one JSON column per user.
pub type SessionMap = BTreeMap<String, Vec<ConversationTurn>>;

/// Default name for a user's next chat session, matching the
/// `{userId}_Chat_{n}` convention the presentation layer shows.
pub fn next_session_name(user_id: &str, sessions: &SessionMap) -> String {
    format!("{}_Chat_{}", user_id, sessions.len() + 1)
}
