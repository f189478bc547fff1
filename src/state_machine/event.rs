//! Events that can occur in a session

use crate::conversation::Turn;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// One line read from the operator, already stripped of surrounding whitespace
    OperatorLine { text: String },
    /// The operator's input stream reached end of file
    InputClosed,
    /// The responder produced the assistant turn for the pending request
    Reply { turn: Turn },
}

impl Event {
    /// Build an `OperatorLine` from raw console input
    pub fn operator_line(raw: &str) -> Self {
        Event::OperatorLine {
            text: raw.trim().to_string(),
        }
    }
}
