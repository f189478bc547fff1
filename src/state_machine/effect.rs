//! Effects produced by state transitions

use crate::conversation::Turn;

/// Effects to be executed after a state transition, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a turn to the conversation log
    AppendTurn { turn: Turn },

    /// Ask the responder for a reply to the whole log
    RequestReply,

    /// Print an assistant reply with the bot label
    PrintReply { text: String },

    /// Print the goodbye line
    PrintFarewell,
}

impl Effect {
    pub fn append(turn: Turn) -> Self {
        Effect::AppendTurn { turn }
    }
}
