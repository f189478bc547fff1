//! Mock responders for session tests

use crate::conversation::{ConversationLog, Turn};
use crate::llm::LlmError;
use crate::responder::Responder;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Responder that replays queued results, then repeats a fallback reply
pub struct ScriptedResponder {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    fallback: Option<String>,
    /// Snapshot of the log passed to every call
    pub seen: Mutex<Vec<ConversationLog>>,
}

impl ScriptedResponder {
    /// Always answer `text`
    pub fn fixed(text: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(text.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Answer from `script` in order; fail once it runs dry
    pub fn scripted(script: impl IntoIterator<Item = Result<String, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl Responder for ScriptedResponder {
    async fn respond(&self, log: &ConversationLog) -> Result<Turn, LlmError> {
        self.seen.lock().unwrap().push(log.clone());
        let next = self.script.lock().unwrap().pop_front();
        match (next, &self.fallback) {
            (Some(result), _) => result.map(Turn::assistant),
            (None, Some(text)) => Ok(Turn::assistant(text.clone())),
            (None, None) => Err(LlmError::network("No scripted reply left")),
        }
    }
}

/// Responder that echoes the last user turn, deterministic across runs
pub struct EchoResponder;

#[async_trait]
impl Responder for EchoResponder {
    async fn respond(&self, log: &ConversationLog) -> Result<Turn, LlmError> {
        let last = log.last().map(|t| t.text.as_str()).unwrap_or_default();
        Ok(Turn::assistant(format!("[{}] {last}", log.len())))
    }
}
