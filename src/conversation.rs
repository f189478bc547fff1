//! In-memory conversation history

use crate::llm::{LlmMessage, MessageRole};

/// Who produced a turn
pub type Role = MessageRole;

/// One role-tagged utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

impl From<&Turn> for LlmMessage {
    fn from(turn: &Turn) -> Self {
        LlmMessage {
            role: turn.role,
            text: turn.text.clone(),
        }
    }
}

/// Ordered, append-only history of turns for one session.
///
/// Alternation of roles is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    #[allow(dead_code)] // API completeness
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Render the history as provider messages, oldest first
    pub fn to_messages(&self) -> Vec<LlmMessage> {
        self.turns.iter().map(LlmMessage::from).collect()
    }
}
