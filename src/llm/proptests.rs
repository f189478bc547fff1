//! Property-based tests for the `OpenAI` translation layer
//!
//! Invariants:
//! - Every message survives translation, in order, with its text verbatim
//! - The request temperature is forwarded untouched
//! - Normalization takes the first choice's text as-is

use super::openai::{
    translate_message, OpenAIChoice, OpenAIMessage, OpenAIResponse, OpenAIService, OpenAIUsage,
};
use super::types::{LlmMessage, LlmRequest, MessageRole};
use proptest::prelude::*;
use std::time::Duration;

fn arb_role() -> impl Strategy<Value = MessageRole> {
    prop_oneof![Just(MessageRole::User), Just(MessageRole::Assistant)]
}

/// Arbitrary text, including empty strings, whitespace and non-ASCII
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z0-9 _.!?,]{1,100}",
        "\\PC{0,40}",
    ]
}

fn arb_message() -> impl Strategy<Value = LlmMessage> {
    (arb_role(), arb_text()).prop_map(|(role, text)| LlmMessage { role, text })
}

fn service() -> OpenAIService {
    OpenAIService::new(
        "sk-test".to_string(),
        "gpt-4o-mini".to_string(),
        "https://api.openai.com/v1",
        Duration::from_secs(1),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn prop_translation_preserves_history(
        messages in proptest::collection::vec(arb_message(), 1..30),
        temperature in prop_oneof![Just(None), (0u8..=20).prop_map(|t| Some(f32::from(t) / 10.0))],
    ) {
        let request = LlmRequest { messages: messages.clone(), temperature };
        let out = service().translate_request(&request);

        prop_assert_eq!(out.messages.len(), messages.len());
        prop_assert_eq!(out.temperature, temperature);
        for (wire, msg) in out.messages.iter().zip(&messages) {
            prop_assert_eq!(wire.role.as_str(), msg.role.as_str());
            prop_assert_eq!(wire.content.as_deref(), Some(msg.text.as_str()));
        }
    }

    #[test]
    fn prop_translated_message_serializes_role_and_content(msg in arb_message()) {
        let value = serde_json::to_value(translate_message(&msg)).unwrap();
        prop_assert_eq!(value["role"].as_str(), Some(msg.role.as_str()));
        prop_assert_eq!(value["content"].as_str(), Some(msg.text.as_str()));
    }

    #[test]
    fn prop_normalize_takes_first_choice_verbatim(
        texts in proptest::collection::vec(arb_text(), 1..4),
        prompt_tokens in 0u32..100_000,
        completion_tokens in 0u32..100_000,
    ) {
        let choices = texts
            .iter()
            .map(|t| OpenAIChoice {
                message: OpenAIMessage { role: "assistant".to_string(), content: Some(t.clone()) },
                finish_reason: Some("stop".to_string()),
            })
            .collect();
        let resp = OpenAIResponse {
            choices,
            usage: Some(OpenAIUsage { prompt_tokens, completion_tokens }),
        };

        let out = OpenAIService::normalize_response(resp).unwrap();
        prop_assert_eq!(out.text.as_deref(), Some(texts[0].as_str()));
        prop_assert_eq!(out.usage.input_tokens, u64::from(prompt_tokens));
        prop_assert_eq!(out.usage.output_tokens, u64::from(completion_tokens));
    }
}
