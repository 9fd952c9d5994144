//! Chat conversation log.

use chrono::{DateTime, Local};

pub type MessageId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

/// Append-only list of chat messages, opened with the bot greeting.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    next_id: MessageId,
}

impl Conversation {
    pub fn new(greeting: impl Into<String>) -> Self {
        let mut conversation = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        conversation.push(Sender::Bot, greeting.into());
        conversation
    }

    pub fn push(&mut self, sender: Sender, text: String) -> MessageId {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            text,
            sender,
            timestamp: Local::now(),
        });
        id
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> MessageId {
        self.push(Sender::User, text.into())
    }

    pub fn push_bot(&mut self, text: impl Into<String>) -> MessageId {
        self.push(Sender::Bot, text.into())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
