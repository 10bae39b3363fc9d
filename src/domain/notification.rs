use serde::Serialize;

pub const WELCOME_MESSAGE: &str = "Welcome! Your account has been created.";
pub const UPDATED_MESSAGE: &str = "Your profile has been updated";
pub const DELETED_MESSAGE: &str = "Your account has been deleted";

/// Outbound notification built once per committed mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    pub user_id: String,
    pub email: String,
    pub message: String,
}

impl NotificationRequest {
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn welcome(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new(user_id, email, WELCOME_MESSAGE)
    }

    pub fn updated(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new(user_id, email, UPDATED_MESSAGE)
    }

    /// `email` must be captured before the record is removed.
    pub fn deleted(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new(user_id, email, DELETED_MESSAGE)
    }
}
