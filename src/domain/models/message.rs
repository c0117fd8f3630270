#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use super::Author;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageType {
    Normal,
    Error,
}

/// A single entry in the conversation log. Immutable once created.
#[derive(Clone, Debug)]
pub struct Message {
    id: Uuid,
    pub author: Author,
    pub text: String,
    mtype: MessageType,
    timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message::new_with_type(author, MessageType::Normal, text);
    }

    pub fn new_with_type(author: Author, mtype: MessageType, text: &str) -> Message {
        return Message {
            id: Uuid::new_v4(),
            author,
            text: text.to_string(),
            mtype,
            timestamp: Utc::now(),
        };
    }

    pub fn id(&self) -> Uuid {
        return self.id;
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        return self.timestamp;
    }
}
