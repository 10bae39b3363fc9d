//! # Mock Framework
//!
//! Test doubles for both sides of the user service.
//!
//! - Notification fakes implement [`NotificationSender`] so the service can run
//!   without a downstream: [`RecordingNotifier`] acks and reports every call,
//!   [`FailingNotifier`] always errors, [`StallingNotifier`] never answers.
//! - [`create_mock_user_client`] hands out a [`UserClient`] whose requests land
//!   on a receiver the test controls, so RPC handlers can be exercised without
//!   a running service. Use helpers like [`expect_get`] to assert on them.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::clients::UserClient;
use crate::domain::{NotificationRequest, UserRecord};
use crate::messages::UserRequest;
use crate::notification::{NotificationAck, NotificationError, NotificationSender};
use crate::user_actor::UserError;

/// Acks every notification and forwards a copy to the returned receiver.
pub struct RecordingNotifier {
    sent: mpsc::UnboundedSender<NotificationRequest>,
}

impl RecordingNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NotificationRequest>) {
        let (sent, receiver) = mpsc::unbounded_channel();
        (Self { sent }, receiver)
    }
}

#[async_trait]
impl NotificationSender for RecordingNotifier {
    async fn send_notification(
        &self,
        request: &NotificationRequest,
    ) -> Result<NotificationAck, NotificationError> {
        let _ = self.sent.send(request.clone());
        Ok(NotificationAck::default())
    }
}

/// Simulates an unreachable downstream.
pub struct FailingNotifier;

#[async_trait]
impl NotificationSender for FailingNotifier {
    async fn send_notification(
        &self,
        _request: &NotificationRequest,
    ) -> Result<NotificationAck, NotificationError> {
        Err(NotificationError::Transport("connection refused".to_string()))
    }
}

/// Simulates a hung downstream: reports that the call started, then never
/// completes.
pub struct StallingNotifier {
    started: mpsc::UnboundedSender<NotificationRequest>,
}

impl StallingNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NotificationRequest>) {
        let (started, receiver) = mpsc::unbounded_channel();
        (Self { started }, receiver)
    }
}

#[async_trait]
impl NotificationSender for StallingNotifier {
    async fn send_notification(
        &self,
        request: &NotificationRequest,
    ) -> Result<NotificationAck, NotificationError> {
        let _ = self.started.send(request.clone());
        std::future::pending().await
    }
}

/// Creates a user client wired to a receiver instead of a running service.
pub fn create_mock_user_client(buffer_size: usize) -> (UserClient, mpsc::Receiver<UserRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (UserClient::new(sender), receiver)
}

/// Helper to verify that the next message is a GetUser request
pub async fn expect_get(
    receiver: &mut mpsc::Receiver<UserRequest>,
) -> Option<(String, oneshot::Sender<Result<UserRecord, UserError>>)> {
    match receiver.recv().await {
        Some(UserRequest::GetUser { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a DeleteUser request
pub async fn expect_delete(
    receiver: &mut mpsc::Receiver<UserRequest>,
) -> Option<(String, oneshot::Sender<Result<UserRecord, UserError>>)> {
    match receiver.recv().await {
        Some(UserRequest::DeleteUser { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_user_client(10);

        let get_task = tokio::spawn(async move { client.get_user("1".to_string()).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected GetUser request");
        assert_eq!(id, "1");
        responder
            .send(Ok(UserRecord::new("1", "John Doe", "john@example.com")))
            .unwrap();

        let result = get_task.await.unwrap();
        assert_eq!(result.unwrap().name, "John Doe");
    }
}
