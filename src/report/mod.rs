//! Prompt composition for day reports and the running conversation of the
//! interactive mode.

use crate::constants::{INTERACTIVE_PROMPT, REPORT_PROMPT};
use crate::llm::{ChatError, ChatMessage, Role};

/// Builds the single-message conversation asking for a report about `client_name`.
///
/// # Returns
/// * `Err(ChatError::EmptyConversation)` when the notes are blank
pub fn build_report_messages(
    client_name: &str,
    notes: &str,
) -> Result<Vec<ChatMessage>, ChatError> {
    if notes.trim().is_empty() {
        return Err(ChatError::EmptyConversation);
    }
    let instruction = REPORT_PROMPT.replace("{client}", client_name.trim());
    Ok(vec![ChatMessage::user(&format!("{}{}", instruction, notes))])
}

/// Conversation history kept across reports in one interactive session.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Starts with the standing report instruction as system message.
    pub fn new() -> Self {
        Conversation {
            messages: vec![ChatMessage::system(INTERACTIVE_PROMPT)],
        }
    }

    pub fn push_user(&mut self, content: &str) {
        self.messages.push(ChatMessage::user(content));
    }

    /// Appends the model's answer; earlier entries are never touched.
    pub fn push_reply(&mut self, reply: ChatMessage) {
        self.messages.push(reply);
    }

    /// Drops the trailing user message after a failed exchange.
    pub fn discard_pending(&mut self) {
        let pending = self.messages.last().is_some_and(|m| m.role == Role::User);
        if self.messages.len() > 1 && pending {
            self.messages.pop();
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_the_client_and_keeps_notes() {
        let messages = build_report_messages("Pietje", "Was op tijd aanwezig.").unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
        assert!(messages[0].content.contains("Het verslag gaat over Pietje.\n"));
        assert!(messages[0].content.ends_with("Was op tijd aanwezig."));
    }

    #[test]
    fn blank_notes_are_rejected() {
        assert!(matches!(
            build_report_messages("Pietje", "   \n"),
            Err(ChatError::EmptyConversation)
        ));
    }

    #[test]
    fn conversation_appends_in_order() {
        let mut conversation = Conversation::new();
        conversation.push_user("Pietje was er.");
        conversation.push_reply(ChatMessage::assistant("# Verslag"));
        let roles: Vec<Role> = conversation.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
    }

    #[test]
    fn discard_pending_only_drops_user_message() {
        let mut conversation = Conversation::new();
        conversation.discard_pending();
        assert_eq!(conversation.messages().len(), 1);
        conversation.push_user("x");
        conversation.discard_pending();
        assert_eq!(conversation.messages().len(), 1);
    }
}
