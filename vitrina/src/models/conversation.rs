use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            _ => Err(format!("Unknown role: {s}")),
        }
    }
}

/// A single utterance in a chat session. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only dialogue state for one chat session.
///
/// Turns are never reordered or mutated after [`ConversationLog::append`];
/// the only way in is the back of the sequence. Each session owns exactly
/// one log, so there is no shared mutable state between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_turns(turns: Vec<ConversationTurn>) -> Self {
        Self { turns }
    }

    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// All turns in submission order.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// User turn texts in chronological order, the input to contextualization.
    pub fn user_turns(&self) -> Vec<String> {
        self.turns
            .iter()
            .filter(|turn| turn.role == Role::User)
            .map(|turn| turn.text.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn into_turns(self) -> Vec<ConversationTurn> {
        self.turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut log = ConversationLog::new();
        log.append(ConversationTurn::user("I want tshirts"));
        log.append(ConversationTurn::assistant("{\"results\":[]}"));
        log.append(ConversationTurn::user("for boys"));

        let texts: Vec<&str> = log.turns().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["I want tshirts", "{\"results\":[]}", "for boys"]
        );
    }

    #[test]
    fn test_user_turns_filters_assistant_entries() {
        let mut log = ConversationLog::new();
        log.append(ConversationTurn::user("shoes"));
        log.append(ConversationTurn::assistant("ok"));
        log.append(ConversationTurn::user("black color"));

        assert_eq!(log.user_turns(), vec!["shoes", "black color"]);
    }

    #[test]
    fn test_role_roundtrip() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("assistant".parse::<Role>().unwrap(), Role::Assistant);
        assert_eq!(Role::User.to_string(), "user");
        assert!("system".parse::<Role>().is_err());
    }

    #[test]
    fn test_log_serde_roundtrip() {
        let mut log = ConversationLog::new();
        log.append(ConversationTurn::user("hello"));
        log.append(ConversationTurn::assistant("hi"));

        let json = serde_json::to_string(&log).unwrap();
        let restored: ConversationLog = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, log);
    }
}
