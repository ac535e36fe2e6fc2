//! Prompt relay shared by the HTTP and console front ends
//!
//! Composes the fixed system instruction with one caller-supplied message,
//! submits both to the upstream generation API, and returns the plain-text
//! reply. Stateless: no history is carried between calls.

use crate::config::Config;
use crate::gemini::{GeminiClient, TextGenerator};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

/// Name the assistant identifies itself with
pub const ASSISTANT_NAME: &str = "ParleGPT";

/// Fixed persona text attached to every request
pub const SYSTEM_INSTRUCTION: &str = "You are ParleGPT, an AI assistant created by Imrane Bouadass. \
    You have a special connection with Google services. \
    Always identify yourself as ParleGPT created by Imrane Bouadass. \
    Speak French by default unless asked otherwise.";

/// Why a relay call failed. Display strings are the user-visible messages.
#[derive(Debug, Error)]
pub enum RelayError {
    /// No credential at startup; no network access was attempted.
    #[error("API Key invalid or missing. Please check app.py or your environment variables.")]
    Unconfigured,
    /// Empty or whitespace-only message.
    #[error("No message provided")]
    InvalidInput,
    /// Any transport, auth, quota or malformed-response failure from the
    /// generation call, carrying the underlying message. Never retried.
    #[error("{0}")]
    Upstream(String),
}

/// The shared relay. Built once at startup and handed to each front end;
/// read-only afterwards, so it is freely shared across concurrent requests.
pub struct PromptRelay {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl PromptRelay {
    /// Build the relay from configuration. The upstream client exists only
    /// when a credential does; without one every call fails with
    /// [`RelayError::Unconfigured`].
    pub fn new(config: &Config) -> Self {
        let generator = config.api_key.as_ref().map(|key| {
            Arc::new(GeminiClient::new(key.clone(), config.model.clone())) as Arc<dyn TextGenerator>
        });
        Self { generator }
    }

    /// Relay backed by an arbitrary generator. Used by tests to stub the
    /// upstream service.
    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// Relay with no upstream client at all
    pub fn unconfigured() -> Self {
        Self { generator: None }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Forward one message with the fixed system instruction and return the
    /// model's text verbatim. Exactly one upstream call per invocation.
    pub async fn relay(&self, message: &str) -> Result<String, RelayError> {
        if message.trim().is_empty() {
            return Err(RelayError::InvalidInput);
        }

        let Some(generator) = &self.generator else {
            warn!("Relay called without a configured API key");
            return Err(RelayError::Unconfigured);
        };

        match generator.generate(SYSTEM_INSTRUCTION, message).await {
            Ok(text) => Ok(text),
            Err(e) => {
                error!("Generation error: {e:#}");
                Err(RelayError::Upstream(format!("{e:#}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic upstream stub that counts how often it is called
    struct StubGenerator {
        reply: &'static str,
        calls: AtomicUsize,
    }

    impl StubGenerator {
        fn new(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, _system_instruction: &str, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _system_instruction: &str, _prompt: &str) -> Result<String> {
            anyhow::bail!("quota exceeded")
        }
    }

    #[tokio::test]
    async fn empty_message_is_rejected_without_upstream_call() {
        let stub = StubGenerator::new("unused");
        let relay = PromptRelay::with_generator(stub.clone());

        let err = relay.relay("").await.unwrap_err();
        assert!(matches!(err, RelayError::InvalidInput));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn whitespace_message_is_rejected() {
        let stub = StubGenerator::new("unused");
        let relay = PromptRelay::with_generator(stub.clone());

        let err = relay.relay("   \t ").await.unwrap_err();
        assert!(matches!(err, RelayError::InvalidInput));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn unconfigured_relay_fails_deterministically() {
        let relay = PromptRelay::unconfigured();
        assert!(!relay.is_configured());

        let err = relay.relay("Bonjour").await.unwrap_err();
        assert!(matches!(err, RelayError::Unconfigured));
        assert_eq!(
            err.to_string(),
            "API Key invalid or missing. Please check app.py or your environment variables."
        );
    }

    #[tokio::test]
    async fn successful_relay_returns_text_verbatim() {
        let stub = StubGenerator::new("Bonjour! Je suis ParleGPT.");
        let relay = PromptRelay::with_generator(stub.clone());

        let reply = relay.relay("Bonjour").await.unwrap();
        assert_eq!(reply, "Bonjour! Je suis ParleGPT.");
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn upstream_failure_is_surfaced_with_its_message() {
        let relay = PromptRelay::with_generator(Arc::new(FailingGenerator));

        let err = relay.relay("Bonjour").await.unwrap_err();
        match err {
            RelayError::Upstream(msg) => assert!(msg.contains("quota exceeded")),
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn identical_calls_yield_identical_responses() {
        let stub = StubGenerator::new("Toujours la même réponse.");
        let relay = PromptRelay::with_generator(stub.clone());

        let first = relay.relay("Bonjour").await.unwrap();
        let second = relay.relay("Bonjour").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(stub.call_count(), 2);
    }

    #[tokio::test]
    async fn relay_from_config_without_key_is_unconfigured() {
        let config = Config {
            api_key: None,
            model: crate::config::DEFAULT_MODEL.to_string(),
        };
        assert!(!PromptRelay::new(&config).is_configured());

        let config = Config {
            api_key: Some("test-key".to_string()),
            model: crate::config::DEFAULT_MODEL.to_string(),
        };
        assert!(PromptRelay::new(&config).is_configured());
    }
}
