//! Produces the assistant's reply for a conversation

use crate::conversation::{ConversationLog, Turn};
use crate::llm::{LlmError, LlmRequest, LlmService};
use async_trait::async_trait;
use std::sync::Arc;

/// Given the full history, produce exactly one new assistant turn.
///
/// Implementations never mutate the log; the caller appends the result.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, log: &ConversationLog) -> Result<Turn, LlmError>;
}

#[async_trait]
impl<T: Responder + ?Sized> Responder for Arc<T> {
    async fn respond(&self, log: &ConversationLog) -> Result<Turn, LlmError> {
        (**self).respond(log).await
    }
}

/// Responder backed by a hosted model
pub struct LlmResponder {
    service: Arc<dyn LlmService>,
    temperature: f32,
}

impl LlmResponder {
    pub fn new(service: Arc<dyn LlmService>, temperature: f32) -> Self {
        Self {
            service,
            temperature,
        }
    }

    pub fn build_request(&self, log: &ConversationLog) -> LlmRequest {
        LlmRequest {
            messages: log.to_messages(),
            temperature: Some(self.temperature),
        }
    }
}

#[async_trait]
impl Responder for LlmResponder {
    async fn respond(&self, log: &ConversationLog) -> Result<Turn, LlmError> {
        if log.is_empty() {
            return Err(LlmError::invalid_request(
                "Cannot request a reply for an empty conversation",
            ));
        }

        let response = self.service.complete(&self.build_request(log)).await?;
        Ok(Turn::assistant(response.text.unwrap_or_default()))
    }
}
