use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, Instrument};

use crate::domain::NotificationRequest;

use super::NotificationSender;

/// Fire-and-forget wrapper around a [`NotificationSender`].
///
/// Every dispatch runs on its own detached task. The outcome is only logged:
/// callers never wait on it and a failure never reaches the RPC caller.
#[derive(Clone)]
pub struct NotificationDispatcher {
    sender: Arc<dyn NotificationSender>,
}

impl NotificationDispatcher {
    pub fn new(sender: Arc<dyn NotificationSender>) -> Self {
        Self { sender }
    }

    /// Spawns the call and returns immediately.
    ///
    /// The handle is only useful to tests; production callers drop it, which
    /// detaches the task. There is no cancellation and no timeout.
    pub fn dispatch(&self, request: NotificationRequest) -> JoinHandle<()> {
        let sender = Arc::clone(&self.sender);
        let span = tracing::info_span!(
            "notification_dispatch",
            user_id = %request.user_id,
            message = %request.message
        );

        tokio::spawn(
            async move {
                match sender.send_notification(&request).await {
                    Ok(ack) => info!(ack_message = %ack.message, "Notification delivered"),
                    Err(e) => error!(error = %e, "Error sending notification"),
                }
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_framework::{FailingNotifier, RecordingNotifier, StallingNotifier};
    use std::time::Duration;

    #[tokio::test]
    async fn test_dispatch_delivers_request() {
        let (notifier, mut sent) = RecordingNotifier::new();
        let dispatcher = NotificationDispatcher::new(Arc::new(notifier));

        dispatcher
            .dispatch(NotificationRequest::welcome("3", "amy@x.com"))
            .await
            .unwrap();

        assert_eq!(
            sent.recv().await.unwrap(),
            NotificationRequest::welcome("3", "amy@x.com")
        );
    }

    #[tokio::test]
    async fn test_failure_is_swallowed() {
        let dispatcher = NotificationDispatcher::new(Arc::new(FailingNotifier));

        // The task completes normally; the error only goes to the log.
        let handle = dispatcher.dispatch(NotificationRequest::deleted("1", "john@example.com"));
        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn test_dispatch_returns_while_call_is_outstanding() {
        let (notifier, mut started) = StallingNotifier::new();
        let dispatcher = NotificationDispatcher::new(Arc::new(notifier));

        let handle = dispatcher.dispatch(NotificationRequest::welcome("3", "amy@x.com"));
        started.recv().await.unwrap();

        assert!(!handle.is_finished());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!handle.is_finished());
        handle.abort();
    }
}
