use reqwest::StatusCode;

/// Failure of a single streamed chat exchange
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Conversation is empty, nothing to send")]
    EmptyConversation,
    #[error("Request to the chat endpoint timed out")]
    Timeout,
    #[error("Failed to connect to the chat endpoint: {0}")]
    Connection(String),
    #[error("Chat endpoint answered with status {status}: {body}")]
    RemoteStatus { status: StatusCode, body: String },
    #[error("Error in model response: {0}")]
    Remote(String),
    #[error("Invalid fragment in response stream: {0}")]
    Decode(String),
    #[error("Response stream ended without a terminal fragment")]
    IncompleteStream,
}

impl ChatError {
    /// True for transport-level failures, timeouts included.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, ChatError::Timeout | ChatError::Connection(_))
    }

    /// Short text suitable for showing to a caregiver.
    pub fn user_message(&self) -> &'static str {
        match self {
            ChatError::EmptyConversation => "Er is geen invoer om te versturen.",
            ChatError::Timeout => "Het taalmodel reageerde niet op tijd.",
            ChatError::Connection(_) => "Kan geen verbinding maken met het taalmodel.",
            ChatError::RemoteStatus { .. } | ChatError::Remote(_) => {
                "Het taalmodel gaf een foutmelding."
            }
            ChatError::Decode(_) => "Het antwoord van het taalmodel was onleesbaar.",
            ChatError::IncompleteStream => "Het antwoord van het taalmodel was onvolledig.",
        }
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChatError::Timeout
        } else {
            ChatError::Connection(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::Decode(err.to_string())
    }
}
