use crate::config::AppConfig;
use crate::llm::providers::ollama::OllamaProvider;
use crate::llm::providers::ChatProvider;
use crate::llm::{ChatError, ChatMessage, ChunkObserver};
use tracing::{error, info};

/// Result of one generation at a given temperature
#[derive(Debug)]
pub struct Draft {
    pub temperature: f32,
    pub result: Result<ChatMessage, ChatError>,
}

/// Generic LLM client that delegates work to a concrete provider.
#[derive(Debug)]
pub struct LlmClient {
    provider: Box<dyn ChatProvider>,
}

impl LlmClient {
    /// Creates a client talking to the Ollama endpoint named in the configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ChatError> {
        let provider =
            OllamaProvider::new(config.endpoint.clone(), &config.model, config.timeout)?;
        Ok(Self::with_provider(Box::new(provider)))
    }

    pub fn with_provider(provider: Box<dyn ChatProvider>) -> Self {
        LlmClient { provider }
    }

    /// Streams one answer for the conversation.
    ///
    /// # Arguments
    /// * `messages` - Conversation so far, must not be empty
    /// * `temperature` - Sampling temperature
    /// * `on_chunk` - Optional observer for incremental display
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        on_chunk: Option<&mut ChunkObserver<'_>>,
    ) -> Result<ChatMessage, ChatError> {
        if messages.is_empty() {
            return Err(ChatError::EmptyConversation);
        }
        self.provider.stream_chat(messages, temperature, on_chunk).await
    }

    /// Generates one draft per temperature, one request after the other.
    ///
    /// A failing temperature does not stop the remaining ones.
    pub async fn generate_drafts(
        &self,
        messages: &[ChatMessage],
        temperatures: &[f32],
    ) -> Vec<Draft> {
        let mut drafts = Vec::with_capacity(temperatures.len());
        for &temperature in temperatures {
            let result = self.chat(messages, temperature, None).await;
            match &result {
                Ok(_) => info!(
                    "Draft at temperature {} generated with {}",
                    temperature,
                    self.provider.model()
                ),
                Err(e) => error!(
                    "Failed to generate draft at temperature {}: {}",
                    temperature, e
                ),
            }
            drafts.push(Draft { temperature, result });
        }
        drafts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ScriptedProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn one_draft_per_temperature_in_order() {
        let client = LlmClient::with_provider(Box::new(ScriptedProvider::default()));
        let drafts = client
            .generate_drafts(&[ChatMessage::user("notities")], &[0.1, 0.4, 0.7])
            .await;
        let temps: Vec<f32> = drafts.iter().map(|d| d.temperature).collect();
        assert_eq!(temps, vec![0.1, 0.4, 0.7]);
        assert!(drafts.iter().all(|d| d.result.is_ok()));
    }

    #[tokio::test]
    async fn failing_draft_does_not_abort_the_rest() {
        let provider = ScriptedProvider {
            fail_at: Some(0.4),
            ..Default::default()
        };
        let client = LlmClient::with_provider(Box::new(provider));
        let drafts = client
            .generate_drafts(&[ChatMessage::user("notities")], &[0.1, 0.4, 0.7])
            .await;
        assert!(drafts[0].result.is_ok());
        assert!(matches!(drafts[1].result, Err(ChatError::IncompleteStream)));
        assert!(drafts[2].result.is_ok());
    }

    #[tokio::test]
    async fn empty_conversation_never_reaches_provider() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = ScriptedProvider {
            calls: calls.clone(),
            fail_at: None,
        };
        let client = LlmClient::with_provider(Box::new(provider));
        let err = client.chat(&[], 0.1, None).await.unwrap_err();
        assert!(matches!(err, ChatError::EmptyConversation));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
