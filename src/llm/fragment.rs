//! Reduction of streamed chat fragments into one final message.
//!
//! Every line of an Ollama chat stream is one JSON object:
//! ```text
//! {"model":"llama3.2","message":{"role":"assistant","content":"Hel"},"done":false}
//! {"model":"llama3.2","message":{"role":"assistant","content":"lo"},"done":false}
//! {"model":"llama3.2","message":{"role":"assistant","content":""},"done":true}
//! ```
//! or, when the server gives up half-way, `{"error":"..."}`.

use crate::llm::{ChatError, ChatMessage, Role};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// One decoded line of the response body
#[derive(Debug, Default, Deserialize)]
pub struct StreamFragment {
    /// `Some(false)` for content fragments, `Some(true)` for the terminal one
    #[serde(default)]
    pub done: Option<bool>,
    #[serde(default)]
    pub message: Option<FragmentMessage>,
    #[serde(default)]
    pub error: Option<Value>,
}

/// Partial message carried by a fragment
#[derive(Debug, Default, Deserialize)]
pub struct FragmentMessage {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub content: String,
}

impl StreamFragment {
    /// Decodes one line of the wire payload.
    pub fn parse(line: &str) -> Result<Self, ChatError> {
        Ok(serde_json::from_str(line)?)
    }

    /// Returns the error text if the fragment reports a failure.
    ///
    /// A present but empty (or null) `error` field is not a failure.
    pub fn error_message(&self) -> Option<String> {
        match &self.error {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

/// Outcome of feeding one fragment to the accumulator
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    /// A content fragment; carries the text that was appended.
    Chunk(String),
    /// Fragment without `done` flag or error, nothing to do.
    Ignored,
    /// The terminal fragment arrived; carries the full message.
    Done(ChatMessage),
}

/// Accumulates fragment contents until the terminal fragment arrives.
#[derive(Debug, Default)]
pub struct FragmentAccumulator {
    text: String,
    fragments: usize,
}

impl FragmentAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fragments fed so far.
    pub fn fragments_seen(&self) -> usize {
        self.fragments
    }

    /// Decodes and processes one raw line.
    pub fn push_line(&mut self, line: &str) -> Result<Step, ChatError> {
        let fragment = StreamFragment::parse(line)?;
        self.push(fragment)
    }

    /// Processes one decoded fragment.
    pub fn push(&mut self, fragment: StreamFragment) -> Result<Step, ChatError> {
        self.fragments += 1;

        if let Some(message) = fragment.error_message() {
            return Err(ChatError::Remote(message));
        }
        if fragment.error.is_some() {
            warn!("Ignoring empty error field in fragment {}", self.fragments);
        }

        match fragment.done {
            Some(false) => {
                let content = fragment.message.map(|m| m.content).unwrap_or_default();
                self.text.push_str(&content);
                Ok(Step::Chunk(content))
            }
            Some(true) => {
                let role = fragment
                    .message
                    .and_then(|m| m.role)
                    .unwrap_or(Role::Assistant);
                debug!(
                    "Terminal fragment after {} fragments, {} chars",
                    self.fragments,
                    self.text.chars().count()
                );
                Ok(Step::Done(ChatMessage {
                    role,
                    content: std::mem::take(&mut self.text),
                }))
            }
            None => Ok(Step::Ignored),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str) -> String {
        serde_json::json!({"model": "llama3.2", "message": {"role": "assistant", "content": text}, "done": false})
            .to_string()
    }

    #[test]
    fn hello_is_reassembled() {
        let mut acc = FragmentAccumulator::new();
        assert_eq!(
            acc.push_line(r#"{"done":false,"message":{"content":"Hel"}}"#).unwrap(),
            Step::Chunk("Hel".into())
        );
        acc.push_line(r#"{"done":false,"message":{"content":"lo"}}"#).unwrap();
        let step = acc.push_line(r#"{"done":true,"message":{}}"#).unwrap();
        assert_eq!(step, Step::Done(ChatMessage::assistant("Hello")));
    }

    #[test]
    fn terminal_content_is_replaced_by_accumulated_text() {
        let mut acc = FragmentAccumulator::new();
        acc.push_line(&chunk("Vandaag ")).unwrap();
        acc.push_line(&chunk("was goed.")).unwrap();
        let step = acc
            .push_line(r#"{"done":true,"message":{"role":"assistant","content":"ignored"}}"#)
            .unwrap();
        assert_eq!(step, Step::Done(ChatMessage::assistant("Vandaag was goed.")));
        assert_eq!(acc.fragments_seen(), 3);
    }

    #[test]
    fn missing_message_counts_as_empty_chunk() {
        let mut acc = FragmentAccumulator::new();
        assert_eq!(
            acc.push_line(r#"{"done":false}"#).unwrap(),
            Step::Chunk(String::new())
        );
        assert_eq!(acc.text, "");
    }

    #[test]
    fn absent_done_is_ignored() {
        let mut acc = FragmentAccumulator::new();
        acc.push_line(&chunk("a")).unwrap();
        assert_eq!(
            acc.push_line(r#"{"message":{"content":"zzz"}}"#).unwrap(),
            Step::Ignored
        );
        assert_eq!(acc.text, "a");
    }

    #[test]
    fn error_field_fails() {
        let mut acc = FragmentAccumulator::new();
        acc.push_line(&chunk("a")).unwrap();
        let err = acc.push_line(r#"{"error":"boom"}"#).unwrap_err();
        assert!(matches!(err, ChatError::Remote(msg) if msg == "boom"));
    }

    #[test]
    fn error_wins_over_done() {
        let mut acc = FragmentAccumulator::new();
        let err = acc.push_line(r#"{"done":true,"error":"overloaded"}"#).unwrap_err();
        assert!(matches!(err, ChatError::Remote(_)));
    }

    #[test]
    fn empty_error_field_is_not_a_failure() {
        let mut acc = FragmentAccumulator::new();
        let step = acc
            .push_line(r#"{"done":false,"error":"","message":{"content":"x"}}"#)
            .unwrap();
        assert_eq!(step, Step::Chunk("x".into()));
        let step = acc.push_line(r#"{"done":true,"error":null}"#).unwrap();
        assert_eq!(step, Step::Done(ChatMessage::assistant("x")));
    }

    #[test]
    fn structured_error_is_stringified() {
        let mut acc = FragmentAccumulator::new();
        let err = acc.push_line(r#"{"error":{"code":1}}"#).unwrap_err();
        assert!(matches!(err, ChatError::Remote(msg) if msg.contains("code")));
    }

    #[test]
    fn invalid_json_is_decode_error() {
        let mut acc = FragmentAccumulator::new();
        let err = acc.push_line("{not json").unwrap_err();
        assert!(matches!(err, ChatError::Decode(_)));
    }
}
