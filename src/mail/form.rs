//! Contact form state.

use thiserror::Error;

use super::ContactMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Message,
            Field::Message => Field::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Name => Field::Message,
            Field::Email => Field::Name,
            Field::Message => Field::Email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("{} is required", .0.label())]
    Missing(Field),
    #[error("email address must contain '@'")]
    InvalidEmail,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Invalid(ContactError),
    Sending,
    Sent,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    focus: Field,
    status: FormStatus,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_sending(&self) -> bool {
        self.status == FormStatus::Sending
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn insert_char(&mut self, c: char) {
        let focus = self.focus;
        self.value_mut(focus).push(c);
        self.settle_status();
    }

    pub fn backspace(&mut self) {
        let focus = self.focus;
        self.value_mut(focus).pop();
        self.settle_status();
    }

    // Editing clears a stale validation or delivery notice.
    fn settle_status(&mut self) {
        if matches!(self.status, FormStatus::Invalid(_) | FormStatus::Failed(_)) {
            self.status = FormStatus::Idle;
        }
    }

    /// Check the fields without changing any state.
    pub fn validate(&self) -> Result<ContactMessage, ContactError> {
        for field in Field::ALL {
            if self.value(field).trim().is_empty() {
                return Err(ContactError::Missing(field));
            }
        }
        if !self.email.contains('@') {
            return Err(ContactError::InvalidEmail);
        }
        Ok(ContactMessage {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
        })
    }

    /// Start a submission.
    ///
    /// Returns the message to hand to the relay, or `None` when one is
    /// already in flight or the fields do not validate. The form stays in
    /// `Sending` until [`ContactForm::mark_sent`] or [`ContactForm::mark_failed`].
    pub fn try_submit(&mut self) -> Option<ContactMessage> {
        if self.is_sending() {
            return None;
        }
        match self.validate() {
            Ok(message) => {
                self.status = FormStatus::Sending;
                Some(message)
            }
            Err(e) => {
                self.focus = match e {
                    ContactError::Missing(field) => field,
                    ContactError::InvalidEmail => Field::Email,
                };
                self.status = FormStatus::Invalid(e);
                None
            }
        }
    }

    /// Delivery succeeded: empty the form and show the success state.
    pub fn mark_sent(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
        self.focus = Field::Name;
        self.status = FormStatus::Sent;
    }

    /// Delivery failed: keep what the user typed.
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.status = FormStatus::Failed(reason.into());
    }

    /// Drop the success state once its display time is over.
    pub fn expire_success(&mut self) {
        if self.status == FormStatus::Sent {
            self.status = FormStatus::Idle;
        }
    }

    pub fn to_plain_text(&self) -> String {
        Field::ALL
            .iter()
            .map(|f| format!("{}: {}", f.label(), self.value(*f)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
