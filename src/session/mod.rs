//! Per-pane session state: scrollback, chat log and delayed deliveries.

mod conversation;
mod deferred;
mod transcript;

pub use conversation::{Conversation, Message, MessageId, Sender};
pub use deferred::Deferred;
pub use transcript::{Transcript, TranscriptEntry};
