//! Request and response bodies of the `user.UserService` contract.
//!
//! Missing string fields decode as empty strings, the way absent scalar
//! fields do in the schema this contract mirrors.

use serde::{Deserialize, Serialize};

use crate::domain::{UserCreate, UserRecord, UserReplace};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUserRequest {
    #[serde(default)]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserRequest {
    #[serde(default)]
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserRecord>,
}

/// Reply shared by the three mutating operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
}

impl MutationResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

impl From<CreateUserRequest> for UserCreate {
    fn from(req: CreateUserRequest) -> Self {
        UserCreate::new(req.name, req.email)
    }
}

impl UpdateUserRequest {
    pub fn into_parts(self) -> (String, UserReplace) {
        (self.user_id, UserReplace::new(self.name, self.email))
    }
}
