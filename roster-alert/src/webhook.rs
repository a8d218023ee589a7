use reqwest::StatusCode;
use roster_core::AlertConfig;
use roster_utils::formatting::{format_alert_content, with_mention};
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// What happened to a failure notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertOutcome {
    Delivered,
    /// No webhook configured; the failure was only logged.
    Skipped,
    /// The webhook could not be reached or answered with an unexpected status.
    Failed,
}

/// Posts failure reports to a Discord webhook.
///
/// Notifying never fails the caller: problems with the webhook itself are
/// logged and reported through [`AlertOutcome`].
#[derive(Clone, Debug)]
pub struct AlertSink {
    http: reqwest::Client,
    webhook_url: Option<String>,
    ping_id: Option<String>,
}

impl AlertSink {
    pub fn new(config: &AlertConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            webhook_url: config.webhook_url.clone(),
            ping_id: config.ping_id.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Message body as it will appear in the channel.
    pub fn content(&self, message: &str, error: &str) -> String {
        let message = with_mention(message, self.ping_id.as_deref());
        format_alert_content(&message, error)
    }

    pub async fn notify(&self, message: &str, error: &str) -> AlertOutcome {
        error!(%message, %error, "sync failed");

        let Some(webhook_url) = self.webhook_url.as_deref() else {
            warn!("DISCORD_WEBHOOK is not set; skipping alert");
            return AlertOutcome::Skipped;
        };

        let content = self.content(message, error);
        let response = match self
            .http
            .post(webhook_url)
            .json(&WebhookPayload { content: &content })
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!(?err, "failed to send alert to webhook");
                return AlertOutcome::Failed;
            }
        };

        let status = response.status();
        // Drain the body so the connection is released.
        let _ = response.bytes().await;

        if status == StatusCode::OK || status == StatusCode::NO_CONTENT {
            info!(%status, "alert delivered");
            AlertOutcome::Delivered
        } else {
            warn!(status = status.as_u16(), "unexpected status code from webhook");
            AlertOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use roster_core::AlertConfig;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    use super::{AlertOutcome, AlertSink};

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0_u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(end) = buf.windows(4).position(|window| window == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
                let content_length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    async fn respond_once(status: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response =
                format!("HTTP/1.1 {status}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{addr}/api/webhooks/1/token"), handle)
    }

    fn sink(webhook_url: Option<String>, ping_id: Option<&str>) -> AlertSink {
        AlertSink::new(&AlertConfig {
            webhook_url,
            ping_id: ping_id.map(str::to_owned),
        })
    }

    #[test]
    fn content_has_no_mention_without_ping_id() {
        let sink = sink(None, None);

        assert_eq!(
            sink.content("Error getting users", "timed out"),
            "Error getting users\n```timed out```"
        );
    }

    #[test]
    fn content_mentions_configured_recipient() {
        let sink = sink(None, Some("123"));

        assert_eq!(
            sink.content("Error getting users", "timed out"),
            "<@123> Error getting users\n```timed out```"
        );
    }

    #[tokio::test]
    async fn unconfigured_webhook_is_skipped() {
        let sink = sink(None, Some("123"));

        assert!(!sink.is_configured());
        assert_eq!(sink.notify("Error", "boom").await, AlertOutcome::Skipped);
    }

    #[tokio::test]
    async fn posts_json_content_to_webhook() {
        let (url, server) = respond_once("204 No Content").await;
        let sink = sink(Some(url), Some("123"));

        let outcome = sink.notify("Error updating sheet", "quota exceeded").await;
        let request = server.await.unwrap();

        assert_eq!(outcome, AlertOutcome::Delivered);
        assert!(request.starts_with("POST /api/webhooks/1/token HTTP/1.1"));
        assert!(
            request
                .to_ascii_lowercase()
                .contains("content-type: application/json")
        );
        assert!(request.ends_with(
            r#"{"content":"<@123> Error updating sheet\n```quota exceeded```"}"#
        ));
    }

    #[tokio::test]
    async fn server_error_from_webhook_is_reported_as_failed() {
        let (url, server) = respond_once("500 Internal Server Error").await;
        let sink = sink(Some(url), None);

        let outcome = sink.notify("Error getting users", "boom").await;
        server.await.unwrap();

        assert_eq!(outcome, AlertOutcome::Failed);
    }

    #[tokio::test]
    async fn unreachable_webhook_is_reported_as_failed() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let sink = sink(Some(format!("http://{addr}/hook")), None);

        assert_eq!(sink.notify("Error", "boom").await, AlertOutcome::Failed);
    }
}
