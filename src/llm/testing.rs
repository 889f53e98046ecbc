//! Test doubles for the chat provider seam.

use crate::llm::providers::ChatProvider;
use crate::llm::{ChatError, ChatMessage, ChunkObserver};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Provider answering from a fixed script, keyed by temperature.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    pub calls: Arc<AtomicUsize>,
    pub fail_at: Option<f32>,
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn stream_chat(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        mut on_chunk: Option<&mut ChunkObserver<'_>>,
    ) -> Result<ChatMessage, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(temperature) {
            return Err(ChatError::IncompleteStream);
        }
        let last = messages.last().map(|m| m.content.as_str()).unwrap_or_default();
        let text = format!("# Verslag ({})\n{}", temperature, last);
        if let Some(observer) = on_chunk.as_deref_mut() {
            observer(&text);
        }
        Ok(ChatMessage::assistant(&text))
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
