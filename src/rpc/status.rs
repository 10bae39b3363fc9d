use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::user_actor::UserError;

pub const USER_NOT_FOUND: &str = "User not found";

/// RPC status codes carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Code {
    Ok,
    InvalidArgument,
    NotFound,
    Internal,
    Unavailable,
}

impl Code {
    pub fn as_str(self) -> &'static str {
        match self {
            Code::Ok => "OK",
            Code::InvalidArgument => "INVALID_ARGUMENT",
            Code::NotFound => "NOT_FOUND",
            Code::Internal => "INTERNAL",
            Code::Unavailable => "UNAVAILABLE",
        }
    }

    pub fn http_status(self) -> StatusCode {
        match self {
            Code::Ok => StatusCode::OK,
            Code::InvalidArgument => StatusCode::BAD_REQUEST,
            Code::NotFound => StatusCode::NOT_FOUND,
            Code::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Code::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured RPC error returned to callers as `{"code": .., "message": ..}`.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct RpcStatus {
    pub code: Code,
    pub message: String,
}

impl RpcStatus {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(Code::NotFound, USER_NOT_FOUND)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Code::InvalidArgument, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(Code::Unavailable, message)
    }
}

impl From<UserError> for RpcStatus {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => Self::not_found(),
            UserError::ActorCommunicationError(msg) => {
                Self::unavailable(format!("user service unavailable: {msg}"))
            }
        }
    }
}

impl IntoResponse for RpcStatus {
    fn into_response(self) -> Response {
        let status = self.code.http_status();
        if status.is_server_error() {
            error!(code = %self.code, message = %self.message, "rpc failed");
        } else {
            debug!(code = %self.code, message = %self.message, "rpc rejected");
        }
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_distinct_status() {
        let status = RpcStatus::from(UserError::NotFound("99".to_string()));
        assert_eq!(status, RpcStatus::new(Code::NotFound, "User not found"));
        assert_eq!(status.code.http_status(), StatusCode::NOT_FOUND);
        assert_ne!(status.code.http_status(), Code::Ok.http_status());
    }

    #[test]
    fn test_actor_failure_maps_to_unavailable() {
        let status = RpcStatus::from(UserError::ActorCommunicationError("Actor closed".into()));
        assert_eq!(status.code, Code::Unavailable);
        assert!(status.message.contains("Actor closed"));
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(RpcStatus::not_found()).unwrap();
        assert_eq!(json, serde_json::json!({ "code": "NOT_FOUND", "message": "User not found" }));
        assert_eq!(RpcStatus::not_found().to_string(), "NOT_FOUND: User not found");
    }
}
