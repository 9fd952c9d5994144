//! Response engines that map raw input to canned text.
//!
//! The shell engine dispatches on exact command names; the chat engine
//! matches topic keywords. Both always produce an answer: unknown input
//! gets a fixed default reply rather than an error.

pub mod calc;
pub mod chat;
pub mod profile;
pub mod shell;

pub use calc::CalcError;
pub use chat::{classify, reply_to, TopicKind, TOPICS};
pub use shell::{ShellEngine, ShellOutcome, HERO_VOCABULARY, SHELL_VOCABULARY};
