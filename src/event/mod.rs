//! Event handling system for the application.
//!
//! Two channels feed the main loop. User events (keyboard, resize) are read
//! on a dedicated thread so input stays responsive. App events carry results
//! of background work (delayed chat replies, mail delivery, timers) back to
//! the UI thread.
//!
//! # Submodules
//!
//! - `terminal`: keys for the hero and terminal panes
//! - `chat`: keys for the chat pane
//! - `contact`: keys for the contact form

pub mod chat;
pub mod contact;
pub mod terminal;

use std::thread;

use tokio::sync::mpsc::{self, Receiver, UnboundedReceiver, UnboundedSender};
use std::io::Result;

/// Raw terminal input.
pub type UserEvent = crossterm::event::Event;

/// Spawn the input reader thread.
///
/// The thread blocks on `crossterm::event::read()` and exits once the
/// receiver is dropped.
pub fn init_user_event() -> Receiver<Result<UserEvent>> {
    let (tx, rx) = mpsc::channel(64);
    thread::spawn(move || {
        loop {
            if tx.blocking_send(crossterm::event::read()).is_err() {
                break;
            }
        }
    });
    rx
}

/// Results of background work, delivered to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AppEvent {
    /// The chat bot's delayed answer is due.
    ChatReply { text: String },

    /// The hero pane's one-shot boot line is due.
    HeroBoot,

    /// The mail relay accepted the contact message.
    MailDelivered,

    /// The mail relay failed.
    MailFailed { reason: String },

    /// The contact form's success state has been shown long enough.
    ContactSuccessExpired,
}

/// Low-frequency, lightweight events, so unbounded is fine.
pub fn init_app_eventsource() -> (UnboundedSender<AppEvent>, UnboundedReceiver<AppEvent>) {
    mpsc::unbounded_channel()
}
