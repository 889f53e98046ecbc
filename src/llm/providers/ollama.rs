use super::ChatProvider;
use crate::llm::{accumulate_stream, ChatError, ChatMessage, ChunkObserver};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

/// Provider implementation for Ollama's streaming chat API
#[derive(Debug)]
pub struct OllamaProvider {
    client: Client,
    /// Full URL of the chat endpoint (e.g. "http://localhost:11434/api/chat")
    endpoint: Url,
    /// Model identifier to use (e.g. "llama3.2")
    model: String,
    /// Bound on connecting, on waiting for the response headers and on each body read
    timeout: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    temperature: f32,
}

impl OllamaProvider {
    /// Creates a new Ollama provider instance
    ///
    /// # Arguments
    /// * `endpoint` - Chat endpoint URL
    /// * `model` - The model identifier to use
    /// * `timeout` - Connect, response and read timeout
    pub fn new(endpoint: Url, model: &str, timeout: Duration) -> Result<Self, ChatError> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()?;
        Ok(OllamaProvider {
            client,
            endpoint,
            model: model.to_string(),
            timeout,
        })
    }
}

#[async_trait]
impl ChatProvider for OllamaProvider {
    /// Calls Ollama's chat API with `stream: true` and accumulates the answer
    ///
    /// # Arguments
    /// * `messages` - Conversation to send, oldest first
    /// * `temperature` - Sampling temperature
    /// * `on_chunk` - Optional observer for incremental display
    ///
    /// # Returns
    /// * `Result<ChatMessage, ChatError>` - Final assistant message or typed failure
    async fn stream_chat(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        on_chunk: Option<&mut ChunkObserver<'_>>,
    ) -> Result<ChatMessage, ChatError> {
        if messages.is_empty() {
            return Err(ChatError::EmptyConversation);
        }

        let request_body = ChatRequest {
            model: &self.model,
            messages,
            stream: true,
            temperature,
        };

        let send = self
            .client
            .post(self.endpoint.clone())
            .json(&request_body)
            .send();

        let res = match tokio::time::timeout(self.timeout, send).await {
            Ok(Ok(res)) => res,
            Ok(Err(e)) => {
                error!("Failed to connect to Ollama: {}", e);
                return Err(e.into());
            }
            Err(_) => {
                error!("Failed to connect to Ollama: no response within {:?}", self.timeout);
                return Err(ChatError::Timeout);
            }
        };

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!("Ollama API error {}: {}", status, body);
            return Err(ChatError::RemoteStatus { status, body });
        }
        info!(
            "Request to Ollama with temperature {} was successful.",
            temperature
        );

        let result = accumulate_stream(res.bytes_stream(), on_chunk).await;
        match &result {
            Ok(message) => debug!("Ollama answer complete: {} chars", message.content.len()),
            Err(e) => error!("Error in Ollama response: {}", e),
        }
        result
    }

    fn model(&self) -> &str {
        &self.model
    }
}
