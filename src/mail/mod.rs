//! Contact form and outbound mail delivery.
//!
//! The form is plain state. Delivery goes through [`MailRelay`] so the app
//! can swap the HTTP relay for a fake in tests.

mod emailjs;
mod form;

pub use emailjs::EmailJsRelay;
pub use form::{ContactError, ContactForm, Field, FormStatus};

use futures::future::BoxFuture;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail relay is not configured")]
    NotConfigured,
    #[error("mail relay request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("mail relay answered {status}: {body}")]
    Status { status: u16, body: String },
}

pub trait MailRelay: Send + Sync {
    /// Deliver one message. The future owns everything it needs.
    fn send(&self, message: ContactMessage) -> BoxFuture<'static, Result<(), MailError>>;
}
