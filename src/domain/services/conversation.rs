#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use crate::domain::models::AgentBox;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

/// Owns the conversation log and sequences exchanges with the agent.
/// Invariant: at most one exchange is outstanding at a time, and
/// `waiting_for_agent` is true exactly while one is.
pub struct Conversation {
    pub messages: Vec<Message>,
    pub waiting_for_agent: bool,
    pub last_error: Option<String>,
}

impl Conversation {
    pub fn new() -> Conversation {
        let mut conversation = Conversation {
            messages: vec![],
            waiting_for_agent: false,
            last_error: None,
        };

        conversation.add_message(Message::new(
            Author::Exa,
            "Hello, I am Exa. How can I help you govern your schedule?",
        ));

        return conversation;
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Submits one user query to the agent and reconciles the outcome into
    /// the log. Submissions arriving while a previous exchange is still
    /// outstanding are dropped, not queued. Whitespace-only input is a
    /// no-op. Every failure is recovered here: it becomes an error message
    /// in the log and a `last_error` description, never a propagated fault.
    pub async fn submit(&mut self, agent: &AgentBox, raw_input: &str) {
        if self.waiting_for_agent {
            return;
        }
        if raw_input.trim().is_empty() {
            return;
        }

        // The user message keeps the input exactly as typed.
        self.add_message(Message::new(Author::User, raw_input));
        self.waiting_for_agent = true;
        self.last_error = None;

        match agent.send(raw_input).await {
            Ok(reply) => {
                self.add_message(Message::new(Author::Exa, &reply));
            }
            Err(err) => {
                tracing::error!(error = ?err, "Agent exchange failed");
                let description = err.to_string();
                self.add_message(Message::new_with_type(
                    Author::Exa,
                    MessageType::Error,
                    &format!("Error: {description}"),
                ));
                self.last_error = Some(description);
            }
        }

        self.waiting_for_agent = false;
    }
}
