//! Pure state transition function

use super::{Effect, Event, SessionState, TerminationReason, TurnPhase};
use crate::conversation::Turn;
use thiserror::Error;

/// Inputs that end the session, compared case-insensitively
const EXIT_COMMANDS: [&str; 3] = ["quit", "exit", "q"];

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Session already terminated")]
    Terminated,
    #[error("Waiting for a reply, cannot accept input")]
    AwaitingReply,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// True when `text` asks to leave the session
pub fn is_exit_command(text: &str) -> bool {
    let text = text.trim();
    EXIT_COMMANDS
        .iter()
        .any(|cmd| text.eq_ignore_ascii_case(cmd))
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
pub fn transition(
    state: &SessionState,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    const AWAITING_INPUT: SessionState = SessionState::Running {
        phase: TurnPhase::AwaitingInput,
    };
    const AWAITING_REPLY: SessionState = SessionState::Running {
        phase: TurnPhase::AwaitingReply,
    };

    match (state, event) {
        (SessionState::Terminated { .. }, _) => Err(TransitionError::Terminated),

        (
            SessionState::Running {
                phase: TurnPhase::AwaitingInput,
            },
            Event::OperatorLine { text },
        ) => {
            if is_exit_command(&text) {
                Ok(TransitionResult::new(SessionState::Terminated {
                    reason: TerminationReason::Quit,
                })
                .with_effect(Effect::PrintFarewell))
            } else {
                Ok(TransitionResult::new(AWAITING_REPLY)
                    .with_effect(Effect::append(Turn::user(text)))
                    .with_effect(Effect::RequestReply))
            }
        }

        (
            SessionState::Running {
                phase: TurnPhase::AwaitingInput,
            },
            Event::InputClosed,
        ) => Ok(TransitionResult::new(SessionState::Terminated {
            reason: TerminationReason::InputClosed,
        })
        .with_effect(Effect::PrintFarewell)),

        (
            SessionState::Running {
                phase: TurnPhase::AwaitingReply,
            },
            Event::Reply { turn },
        ) => Ok(TransitionResult::new(AWAITING_INPUT)
            .with_effect(Effect::PrintReply {
                text: turn.text.clone(),
            })
            .with_effect(Effect::append(turn))),

        (
            SessionState::Running {
                phase: TurnPhase::AwaitingReply,
            },
            Event::OperatorLine { .. } | Event::InputClosed,
        ) => Err(TransitionError::AwaitingReply),

        (
            SessionState::Running {
                phase: TurnPhase::AwaitingInput,
            },
            Event::Reply { .. },
        ) => Err(TransitionError::InvalidTransition(
            "reply received with no pending request".to_string(),
        )),
    }
}
