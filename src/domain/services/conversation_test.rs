use std::sync::Arc;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use super::Conversation;
use crate::domain::models::Agent;
use crate::domain::models::AgentBox;
use crate::domain::models::Author;
use crate::domain::models::MessageType;
use crate::domain::models::TransportError;

struct MockAgent {
    reply: Mutex<Option<Result<String, TransportError>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Agent for MockAgent {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn send(&self, query: &str) -> Result<String, TransportError> {
        self.calls.lock().unwrap().push(query.to_string());
        return self.reply.lock().unwrap().take().unwrap();
    }
}

fn mock_agent(reply: Result<String, TransportError>) -> (AgentBox, Arc<Mutex<Vec<String>>>) {
    let calls = Arc::new(Mutex::new(vec![]));
    let agent = MockAgent {
        reply: Mutex::new(Some(reply)),
        calls: calls.clone(),
    };

    return (Box::new(agent), calls);
}

fn decode_error() -> TransportError {
    let cause = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
    return TransportError::Decode(cause);
}

#[test]
fn it_seeds_the_greeting() {
    let conversation = Conversation::new();

    assert_eq!(conversation.messages.len(), 1);
    assert_eq!(conversation.messages[0].author, Author::Exa);
    assert_eq!(conversation.messages[0].message_type(), MessageType::Normal);
    assert_eq!(
        conversation.messages[0].text,
        "Hello, I am Exa. How can I help you govern your schedule?"
    );
    assert!(!conversation.waiting_for_agent);
    assert!(conversation.last_error.is_none());
}

#[tokio::test]
async fn it_ignores_empty_input() {
    let (agent, calls) = mock_agent(Ok("unused".to_string()));
    let mut conversation = Conversation::new();

    conversation.submit(&agent, "").await;

    assert_eq!(conversation.messages.len(), 1);
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn it_ignores_whitespace_only_input() {
    let (agent, calls) = mock_agent(Ok("unused".to_string()));
    let mut conversation = Conversation::new();

    conversation.submit(&agent, "  ").await;

    assert_eq!(conversation.messages.len(), 1);
    assert!(calls.lock().unwrap().is_empty());
    assert!(!conversation.waiting_for_agent);
}

#[tokio::test]
async fn it_appends_user_and_agent_messages_on_success() {
    let (agent, calls) = mock_agent(Ok("Done, moved to 4pm.".to_string()));
    let mut conversation = Conversation::new();

    conversation.submit(&agent, "Move my 3pm meeting").await;

    assert_eq!(conversation.messages.len(), 3);
    assert_eq!(conversation.messages[1].author, Author::User);
    assert_eq!(conversation.messages[1].text, "Move my 3pm meeting");
    assert_eq!(conversation.messages[2].author, Author::Exa);
    assert_eq!(conversation.messages[2].text, "Done, moved to 4pm.");
    assert_eq!(conversation.messages[2].message_type(), MessageType::Normal);
    assert!(!conversation.waiting_for_agent);
    assert!(conversation.last_error.is_none());
    assert_eq!(*calls.lock().unwrap(), vec!["Move my 3pm meeting"]);
}

#[tokio::test]
async fn it_sends_untrimmed_input() {
    let (agent, calls) = mock_agent(Ok("Noted.".to_string()));
    let mut conversation = Conversation::new();

    conversation.submit(&agent, "  remind me tonight  ").await;

    assert_eq!(conversation.messages[1].text, "  remind me tonight  ");
    assert_eq!(*calls.lock().unwrap(), vec!["  remind me tonight  "]);
}

#[tokio::test]
async fn it_surfaces_server_failures() {
    let (agent, _calls) = mock_agent(Err(TransportError::Server(500)));
    let mut conversation = Conversation::new();

    conversation.submit(&agent, "Move my 3pm meeting").await;

    assert_eq!(conversation.messages.len(), 3);
    assert_eq!(conversation.messages[2].author, Author::Exa);
    assert_eq!(conversation.messages[2].message_type(), MessageType::Error);
    assert!(conversation.messages[2].text.contains("500"));
    assert!(conversation.last_error.as_ref().unwrap().contains("500"));
    assert!(!conversation.waiting_for_agent);
}

#[tokio::test]
async fn it_surfaces_decode_failures() {
    let (agent, _calls) = mock_agent(Err(decode_error()));
    let mut conversation = Conversation::new();

    conversation.submit(&agent, "Move my 3pm meeting").await;

    assert_eq!(conversation.messages.len(), 3);
    assert_eq!(conversation.messages[2].message_type(), MessageType::Error);
    assert!(conversation.messages[2].text.contains("could not be decoded"));
    assert!(conversation.last_error.is_some());
    assert!(!conversation.waiting_for_agent);
}

#[tokio::test]
async fn it_surfaces_transport_failures() {
    // A builder-stage reqwest error, no network involved.
    let cause = reqwest::Client::new()
        .get("http://")
        .send()
        .await
        .unwrap_err();
    let (agent, _calls) = mock_agent(Err(TransportError::Transport(cause)));
    let mut conversation = Conversation::new();

    conversation.submit(&agent, "Move my 3pm meeting").await;

    assert_eq!(conversation.messages.len(), 3);
    assert_eq!(conversation.messages[2].message_type(), MessageType::Error);
    assert!(conversation.messages[2]
        .text
        .contains("failed to reach the agent"));
    assert!(!conversation.waiting_for_agent);
}

#[tokio::test]
async fn it_clears_last_error_on_the_next_submission() {
    let (failing, _calls) = mock_agent(Err(TransportError::Server(503)));
    let mut conversation = Conversation::new();

    conversation.submit(&failing, "first try").await;
    assert!(conversation.last_error.is_some());

    let (succeeding, _calls) = mock_agent(Ok("All set.".to_string()));
    conversation.submit(&succeeding, "second try").await;

    assert!(conversation.last_error.is_none());
    assert_eq!(conversation.messages.len(), 5);
}

#[tokio::test]
async fn it_drops_submissions_while_waiting() {
    let (agent, calls) = mock_agent(Ok("unused".to_string()));
    let mut conversation = Conversation::new();
    conversation.waiting_for_agent = true;

    conversation.submit(&agent, "Move my 3pm meeting").await;

    assert_eq!(conversation.messages.len(), 1);
    assert!(calls.lock().unwrap().is_empty());
    assert!(conversation.waiting_for_agent);
}

#[tokio::test]
async fn it_remains_usable_after_a_failure() {
    let (failing, _calls) = mock_agent(Err(TransportError::Server(500)));
    let mut conversation = Conversation::new();
    conversation.submit(&failing, "first try").await;

    let (succeeding, calls) = mock_agent(Ok("Recovered.".to_string()));
    conversation.submit(&succeeding, "second try").await;

    assert_eq!(conversation.messages.len(), 5);
    assert_eq!(conversation.messages[4].text, "Recovered.");
    assert_eq!(conversation.messages[4].message_type(), MessageType::Normal);
    assert_eq!(*calls.lock().unwrap(), vec!["second try"]);
}
