//! EmailJS REST relay.

use std::time::Duration;

use anyhow::Context as _;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;
use tracing::{info, warn};

use super::{ContactMessage, MailError, MailRelay};
use crate::config::EmailJsSettings;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
struct Credentials {
    service_id: String,
    template_id: String,
    public_key: String,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a ContactMessage,
}

pub struct EmailJsRelay {
    client: reqwest::Client,
    endpoint: String,
    credentials: Option<Credentials>,
}

impl EmailJsRelay {
    pub fn new(settings: &EmailJsSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        let credentials = settings
            .credentials()
            .map(|(service_id, template_id, public_key)| Credentials {
                service_id: service_id.to_string(),
                template_id: template_id.to_string(),
                public_key: public_key.to_string(),
            });
        if credentials.is_none() {
            warn!("EmailJS credentials missing; contact form will not deliver");
        }

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            credentials,
        })
    }
}

fn request_body<'a>(credentials: &'a Credentials, message: &'a ContactMessage) -> SendRequest<'a> {
    SendRequest {
        service_id: &credentials.service_id,
        template_id: &credentials.template_id,
        user_id: &credentials.public_key,
        template_params: message,
    }
}

impl MailRelay for EmailJsRelay {
    fn send(&self, message: ContactMessage) -> BoxFuture<'static, Result<(), MailError>> {
        let Some(credentials) = self.credentials.clone() else {
            return futures::future::ready(Err(MailError::NotConfigured)).boxed();
        };
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();

        async move {
            let body = request_body(&credentials, &message);
            let response = client.post(&endpoint).json(&body).send().await?;

            let status = response.status();
            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "failed to get response body".to_string());
                return Err(MailError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            info!("Contact message delivered");
            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "hello".into(),
        }
    }

    #[test]
    fn test_request_body_shape() {
        let credentials = Credentials {
            service_id: "svc".into(),
            template_id: "tpl".into(),
            public_key: "key".into(),
        };
        let message = message();
        let body = serde_json::to_value(request_body(&credentials, &message)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "service_id": "svc",
                "template_id": "tpl",
                "user_id": "key",
                "template_params": {
                    "name": "Ada",
                    "email": "ada@example.com",
                    "message": "hello",
                }
            })
        );
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Answer a single HTTP request with `200 OK` once its body has arrived.
    async fn accept_one(listener: TcpListener) {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let length = text[..head_end]
                    .lines()
                    .find_map(|line| {
                        let line = line.to_ascii_lowercase();
                        line.strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap())
                    })
                    .unwrap_or(0);
                if request.len() >= head_end + 4 + length {
                    break;
                }
            }
        }
        socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\nOK")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delivery_log_omits_sender_address() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(accept_one(listener));

        let settings = EmailJsSettings {
            endpoint: format!("http://{}/api/v1.0/email/send", addr),
            service_id: Some("svc".into()),
            template_id: Some("tpl".into()),
            public_key: Some("key".into()),
        };
        let relay = EmailJsRelay::new(&settings).unwrap();

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _default = tracing::subscriber::set_default(subscriber);

        relay.send(message()).await.unwrap();
        server.await.unwrap();

        let logs = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Contact message delivered"));
        assert!(!logs.contains("ada@example.com"));
    }

    #[tokio::test]
    async fn test_unconfigured_fails_without_network() {
        let relay = EmailJsRelay::new(&EmailJsSettings::default()).unwrap();
        let result = relay.send(message()).await;
        assert!(matches!(result, Err(MailError::NotConfigured)));
    }
}
