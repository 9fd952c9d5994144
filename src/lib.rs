//! termfolio - a portfolio that lives in a fake terminal
//!
//! This library provides the pieces behind the `termfolio` binary:
//! - a line-editing command interpreter with history and autocompletion
//! - canned-response engines for the shell and the chat assistant
//! - a contact form delivered through an HTTP mail relay
//! - translations for five languages, with a persisted preference
//! - the ratatui widgets and event loop tying them together
//!
//! # Example
//!
//! ```no_run
//! use termfolio::engine::ShellEngine;
//! use termfolio::i18n::Language;
//! use termfolio::interpreter::History;
//!
//! let mut engine = ShellEngine::new(Language::En);
//! let history = History::new().with("about");
//!
//! let outcome = engine.respond("history", &history);
//! println!("{:?}", outcome.text());
//! ```

pub mod app;
pub mod config;
pub mod engine;
pub mod event;
pub mod i18n;
pub mod interpreter;
pub mod mail;
pub mod session;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use app::{ActivePane, App};
pub use config::Settings;
pub use engine::{ShellEngine, ShellOutcome};
pub use event::{init_app_eventsource, init_user_event, AppEvent, UserEvent};
pub use i18n::Language;
pub use interpreter::{CommandInterpreter, History};
