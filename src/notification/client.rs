use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::{NotificationConfig, Transport};
use crate::domain::NotificationRequest;

/// Method path of the downstream `SendNotification` operation.
pub const SEND_NOTIFICATION_PATH: &str = "/notification.NotificationService/SendNotification";

/// Errors raised by a single `SendNotification` call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Notification transport error: {0}")]
    Transport(String),
    #[error("Notification rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("Invalid notification client configuration: {0}")]
    InvalidConfig(String),
}

/// Acknowledgement returned by the notification service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationAck {
    #[serde(default = "ack_success_default")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

fn ack_success_default() -> bool {
    true
}

impl Default for NotificationAck {
    fn default() -> Self {
        Self {
            success: true,
            message: String::new(),
        }
    }
}

/// Outbound seam for the notification dependency.
#[async_trait]
pub trait NotificationSender: Send + Sync + 'static {
    async fn send_notification(
        &self,
        request: &NotificationRequest,
    ) -> Result<NotificationAck, NotificationError>;
}

/// HTTP/JSON stub for the downstream NotificationService.
///
/// The underlying `reqwest::Client` owns a connection pool: nothing is dialed
/// until the first call, and idle connections are kept for reuse. No retries
/// and no request timeout are applied here.
#[derive(Clone)]
pub struct NotificationClient {
    http: reqwest::Client,
    endpoint: String,
}

impl NotificationClient {
    pub fn new(config: &NotificationConfig) -> Result<Self, NotificationError> {
        let mut builder = reqwest::Client::builder().pool_idle_timeout(None::<Duration>);

        if let Transport::Tls = config.transport {
            if let Some(path) = &config.ca_cert_path {
                let pem = std::fs::read(path).map_err(|e| {
                    NotificationError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
                })?;
                let cert = reqwest::Certificate::from_pem(&pem)
                    .map_err(|e| NotificationError::InvalidConfig(e.to_string()))?;
                builder = builder.add_root_certificate(cert);
            }
        }

        let http = builder
            .build()
            .map_err(|e| NotificationError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}://{}{}",
                config.transport.scheme(),
                config.address,
                SEND_NOTIFICATION_PATH
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl NotificationSender for NotificationClient {
    #[instrument(fields(user_id = %request.user_id), skip(self, request))]
    async fn send_notification(
        &self,
        request: &NotificationRequest,
    ) -> Result<NotificationAck, NotificationError> {
        debug!("Sending request");
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        // An empty or non-JSON 2xx body still counts as an ack.
        let ack: NotificationAck = serde_json::from_slice(&body).unwrap_or_default();
        if !ack.success {
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                message: ack.message,
            });
        }
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr.to_string()
    }

    fn config(address: String) -> NotificationConfig {
        NotificationConfig {
            address,
            ..NotificationConfig::default()
        }
    }

    #[test]
    fn test_endpoint_follows_transport() {
        let insecure = NotificationClient::new(&config("localhost:50052".into())).unwrap();
        assert_eq!(
            insecure.endpoint(),
            "http://localhost:50052/notification.NotificationService/SendNotification"
        );

        let tls = NotificationClient::new(&NotificationConfig {
            transport: Transport::Tls,
            ..config("notify.internal:443".into())
        })
        .unwrap();
        assert!(tls.endpoint().starts_with("https://notify.internal:443/"));
    }

    #[test]
    fn test_missing_ca_cert_is_config_error() {
        let result = NotificationClient::new(&NotificationConfig {
            transport: Transport::Tls,
            ca_cert_path: Some(PathBuf::from("/nonexistent/ca.pem")),
            ..NotificationConfig::default()
        });
        assert!(matches!(result, Err(NotificationError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_send_notification_posts_request() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let app = Router::new().route(
            SEND_NOTIFICATION_PATH,
            post(move |Json(body): Json<serde_json::Value>| {
                let sink = Arc::clone(&sink);
                async move {
                    sink.lock().unwrap().push(body);
                    Json(serde_json::json!({ "success": true, "message": "queued" }))
                }
            }),
        );
        let client = NotificationClient::new(&config(serve(app).await)).unwrap();

        let ack = client
            .send_notification(&NotificationRequest::welcome("7", "amy@x.com"))
            .await
            .unwrap();

        assert_eq!(ack.message, "queued");
        let bodies = received.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["userId"], "7");
        assert_eq!(bodies[0]["email"], "amy@x.com");
        assert_eq!(bodies[0]["message"], "Welcome! Your account has been created.");
    }

    #[tokio::test]
    async fn test_empty_success_body_is_ack() {
        let app = Router::new().route(SEND_NOTIFICATION_PATH, post(|| async { StatusCode::OK }));
        let client = NotificationClient::new(&config(serve(app).await)).unwrap();

        let ack = client
            .send_notification(&NotificationRequest::updated("1", "john@example.com"))
            .await
            .unwrap();
        assert!(ack.success);
    }

    #[tokio::test]
    async fn test_error_status_is_rejected() {
        let app = Router::new().route(
            SEND_NOTIFICATION_PATH,
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
        );
        let client = NotificationClient::new(&config(serve(app).await)).unwrap();

        let err = client
            .send_notification(&NotificationRequest::deleted("1", "john@example.com"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            NotificationError::Rejected {
                status: 503,
                message: "down for maintenance".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_fails_at_call_time() {
        // Bind and drop to get a port with nothing listening.
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        let client = NotificationClient::new(&config(addr)).unwrap();
        let err = client
            .send_notification(&NotificationRequest::welcome("1", "john@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, NotificationError::Transport(_)));
    }
}
