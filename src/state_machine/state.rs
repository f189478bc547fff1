//! Session state types

/// What a running session is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPhase {
    /// Waiting for the next operator line
    #[default]
    AwaitingInput,
    /// A user turn was appended and a reply was requested
    AwaitingReply,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Operator typed an exit keyword
    Quit,
    /// Operator input reached end of file
    InputClosed,
}

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running { phase: TurnPhase },
    Terminated { reason: TerminationReason },
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Running {
            phase: TurnPhase::AwaitingInput,
        }
    }
}

impl SessionState {
    #[allow(dead_code)] // API completeness
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Terminated { .. })
    }

    pub fn awaiting_input(&self) -> bool {
        matches!(
            self,
            SessionState::Running {
                phase: TurnPhase::AwaitingInput
            }
        )
    }
}
