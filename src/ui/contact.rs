//! Contact pane: three-field form that hands messages to the mail relay.

use std::sync::Arc;
use std::time::Duration;

use ratatui::prelude::{Buffer, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};
use unicode_width::UnicodeWidthStr;

use crate::engine::profile::EMAIL;
use crate::event::AppEvent;
use crate::i18n::{self, Language};
use crate::mail::{ContactForm, Field, FormStatus, MailRelay};
use crate::session::Deferred;

/// Width of the label column, `message: ` included.
const LABEL_WIDTH: u16 = 10;

pub struct TuiContact {
    form: ContactForm,
    relay: Arc<dyn MailRelay>,
    sink: UnboundedSender<AppEvent>,
    expiry: Deferred<AppEvent>,
    success_display: Duration,
    lang: Language,
}

impl TuiContact {
    pub fn new(
        relay: Arc<dyn MailRelay>,
        success_display: Duration,
        lang: Language,
        sink: UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            form: ContactForm::new(),
            relay,
            expiry: Deferred::new(sink.clone()),
            sink,
            success_display,
            lang,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn set_language(&mut self, lang: Language) {
        self.lang = lang;
    }

    /// Validate and hand the message to the relay in the background.
    ///
    /// Returns false when nothing was sent (invalid, or a send is in flight).
    pub fn submit(&mut self) -> bool {
        let Some(message) = self.form.try_submit() else {
            return false;
        };
        info!("Sending contact message");
        let delivery = self.relay.send(message);
        let sink = self.sink.clone();
        tokio::spawn(async move {
            let event = match delivery.await {
                Ok(()) => AppEvent::MailDelivered,
                Err(e) => {
                    warn!("Contact message not delivered: {}", e);
                    AppEvent::MailFailed { reason: e.to_string() }
                }
            };
            if sink.send(event).is_err() {
                debug!("App event stream closed before mail result");
            }
        });
        true
    }

    pub fn on_delivered(&mut self) {
        self.form.mark_sent();
        self.expiry.schedule(self.success_display, AppEvent::ContactSuccessExpired);
    }

    pub fn on_failed(&mut self, reason: String) {
        self.form.mark_failed(reason);
    }

    pub fn on_success_expired(&mut self) {
        self.form.expire_success();
    }

    fn status_line(&self) -> Option<Line<'static>> {
        let (text, color) = match self.form.status() {
            FormStatus::Idle => return None,
            FormStatus::Invalid(e) => (format!("Error: {}", e), Color::Red),
            FormStatus::Sending => ("Sending...".to_string(), Color::Yellow),
            FormStatus::Sent => (i18n::t(self.lang, "contact_sent"), Color::Green),
            FormStatus::Failed(_) => (i18n::t(self.lang, "contact_failed"), Color::Red),
        };
        Some(Line::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD)))
    }

    fn field_row(field: Field) -> u16 {
        // one intro line and a blank, then one row per field
        2 + match field {
            Field::Name => 0,
            Field::Email => 1,
            Field::Message => 2,
        }
    }

    pub fn cursor_position(&self, area: Rect) -> Option<(u16, u16)> {
        if self.form.is_sending() {
            return None;
        }
        let focus = self.form.focus();
        let row = Self::field_row(focus);
        if row >= area.height {
            return None;
        }
        let col = (usize::from(LABEL_WIDTH) + self.form.value(focus).width())
            .min(usize::from(area.width.saturating_sub(1)));
        Some((area.x + col as u16, area.y + row))
    }

    pub fn to_plain_text(&self) -> String {
        self.form.to_plain_text()
    }
}

impl Widget for &TuiContact {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![
            Line::styled(
                format!("Send a message, or write to {} directly.", EMAIL),
                Style::default().fg(Color::Cyan),
            ),
            Line::from(""),
        ];

        for field in Field::ALL {
            let focused = self.form.focus() == field;
            let label_style = if focused {
                Style::default().fg(Color::Black).bg(Color::Green)
            } else {
                Style::default().fg(Color::Green)
            };
            let label = format!("{:<width$}", format!("{}:", field.label()), width = usize::from(LABEL_WIDTH));
            lines.push(Line::from(vec![
                Span::styled(label, label_style),
                Span::raw(self.form.value(field).to_string()),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::styled(
            "Tab/Shift+Tab: move   Enter on message: send",
            Style::default().fg(Color::DarkGray),
        ));
        if let Some(status) = self.status_line() {
            lines.push(status);
        }

        Paragraph::new(lines).wrap(Wrap { trim: false }).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use futures::future::BoxFuture;
    use futures::FutureExt;
    use tokio::sync::mpsc;

    use crate::mail::{ContactMessage, MailError};

    #[derive(Default)]
    struct FakeRelay {
        fail: bool,
        sent: Mutex<Vec<ContactMessage>>,
    }

    impl MailRelay for FakeRelay {
        fn send(&self, message: ContactMessage) -> BoxFuture<'static, Result<(), MailError>> {
            self.sent.lock().unwrap().push(message);
            let result = if self.fail {
                Err(MailError::Status { status: 500, body: "down".into() })
            } else {
                Ok(())
            };
            futures::future::ready(result).boxed()
        }
    }

    fn fill(contact: &mut TuiContact) {
        let form = contact.form_mut();
        "Ada".chars().for_each(|c| form.insert_char(c));
        form.focus_next();
        "ada@example.com".chars().for_each(|c| form.insert_char(c));
        form.focus_next();
        "hello".chars().for_each(|c| form.insert_char(c));
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_delivery_resets_and_expires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let relay = Arc::new(FakeRelay::default());
        let mut contact = TuiContact::new(relay.clone(), Duration::from_secs(3), Language::En, tx);
        fill(&mut contact);

        assert!(contact.submit());
        assert!(!contact.submit());
        assert_eq!(rx.recv().await, Some(AppEvent::MailDelivered));
        assert_eq!(relay.sent.lock().unwrap().len(), 1);

        contact.on_delivered();
        assert_eq!(contact.form().status(), &FormStatus::Sent);
        assert_eq!(contact.form().value(Field::Name), "");

        tokio::time::advance(Duration::from_millis(2999)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(rx.recv().await, Some(AppEvent::ContactSuccessExpired));
        contact.on_success_expired();
        assert_eq!(contact.form().status(), &FormStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_delivery_keeps_form() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let relay = Arc::new(FakeRelay { fail: true, ..FakeRelay::default() });
        let mut contact = TuiContact::new(relay, Duration::from_secs(3), Language::En, tx);
        fill(&mut contact);

        assert!(contact.submit());
        let Some(AppEvent::MailFailed { reason }) = rx.recv().await else {
            panic!("expected failure");
        };
        contact.on_failed(reason);
        assert!(matches!(contact.form().status(), FormStatus::Failed(_)));
        assert_eq!(contact.form().value(Field::Email), "ada@example.com");
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_form_never_reaches_relay() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let relay = Arc::new(FakeRelay::default());
        let mut contact = TuiContact::new(relay.clone(), Duration::from_secs(3), Language::En, tx);

        assert!(!contact.submit());
        assert!(relay.sent.lock().unwrap().is_empty());
        assert!(matches!(contact.form().status(), FormStatus::Invalid(_)));
    }
}
