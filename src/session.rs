//! Interactive chat session
//!
//! Owns the conversation log for its whole lifetime. Each operator line is
//! fed through the pure state machine and the resulting effects are executed
//! here: appending turns, asking the responder, writing the transcript.

pub mod console;

#[cfg(test)]
pub mod testing;

use crate::conversation::ConversationLog;
use crate::llm::LlmError;
use crate::responder::Responder;
use crate::state_machine::{
    transition, Effect, Event, SessionState, TerminationReason, TransitionError,
};
use console::Console;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Quit,
    InputClosed,
}

impl From<TerminationReason> for SessionOutcome {
    fn from(reason: TerminationReason) -> Self {
        match reason {
            TerminationReason::Quit => SessionOutcome::Quit,
            TerminationReason::InputClosed => SessionOutcome::InputClosed,
        }
    }
}

/// Failures that end a session abruptly
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("responder failed: {0}")]
    Responder(#[from] LlmError),
    #[error("console I/O failed: {0}")]
    Console(#[from] std::io::Error),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

pub struct Session<R> {
    responder: R,
    log: ConversationLog,
    state: SessionState,
}

impl<R: Responder> Session<R> {
    pub fn new(responder: R) -> Self {
        Self {
            responder,
            log: ConversationLog::new(),
            state: SessionState::default(),
        }
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run the read-reply-print loop until an exit keyword or end of input.
    ///
    /// A responder error aborts the loop immediately; nothing further is
    /// written for that turn.
    pub async fn run<I, W>(&mut self, input: I, output: W) -> Result<SessionOutcome, SessionError>
    where
        I: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut console = Console::new(output);
        let mut lines = input.lines();

        console.banner().await?;

        loop {
            if let SessionState::Terminated { reason } = self.state {
                tracing::info!(turns = self.log.len(), outcome = ?reason, "Session ended");
                return Ok(reason.into());
            }

            debug_assert!(self.state.awaiting_input());
            console.prompt().await?;
            let event = match lines.next_line().await? {
                Some(line) => Event::operator_line(&line),
                None => {
                    console.end_line().await?;
                    Event::InputClosed
                }
            };

            self.process_event(event, &mut console).await?;
        }
    }

    async fn process_event<W: AsyncWrite + Unpin>(
        &mut self,
        event: Event,
        console: &mut Console<W>,
    ) -> Result<(), SessionError> {
        // Effects may yield follow-up events (a reply), processed in order
        let mut events_to_process = vec![event];

        while let Some(current_event) = events_to_process.pop() {
            let result = transition(&self.state, current_event)?;
            self.state = result.new_state;

            for effect in result.effects {
                if let Some(next) = self.execute_effect(effect, console).await? {
                    events_to_process.push(next);
                }
            }
        }

        Ok(())
    }

    async fn execute_effect<W: AsyncWrite + Unpin>(
        &mut self,
        effect: Effect,
        console: &mut Console<W>,
    ) -> Result<Option<Event>, SessionError> {
        match effect {
            Effect::AppendTurn { turn } => {
                self.log.push(turn);
                Ok(None)
            }
            Effect::RequestReply => {
                tracing::debug!(turns = self.log.len(), "Requesting reply");
                let turn = self.responder.respond(&self.log).await.map_err(|e| {
                    tracing::error!(
                        kind = e.kind.as_str(),
                        error = %e.message,
                        turns = self.log.len(),
                        "Responder failed, aborting session"
                    );
                    e
                })?;
                Ok(Some(Event::Reply { turn }))
            }
            Effect::PrintReply { text } => {
                console.reply(&text).await?;
                Ok(None)
            }
            Effect::PrintFarewell => {
                console.farewell().await?;
                Ok(None)
            }
        }
    }
}
