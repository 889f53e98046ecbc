use crate::llm::{ChatError, ChatMessage, ChunkObserver};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod ollama;

#[async_trait]
pub trait ChatProvider: Debug + Send + Sync {
    /// Sends the conversation and reduces the streamed answer to one message.
    async fn stream_chat(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        on_chunk: Option<&mut ChunkObserver<'_>>,
    ) -> Result<ChatMessage, ChatError>;

    /// Model identifier sent with every request.
    fn model(&self) -> &str;
}
