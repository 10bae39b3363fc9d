use serde::{Deserialize, Serialize};

/// A user record held by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

/// Payload for creating a new user. The id is assigned by the service.
#[derive(Debug, Clone, Default)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
}

/// Full replacement of an existing user's profile.
///
/// Unlike a patch, every field is written: an empty `name` or `email`
/// overwrites the stored value.
#[derive(Debug, Clone, Default)]
pub struct UserReplace {
    pub name: String,
    pub email: String,
}

impl UserRecord {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Builds the record stored for a freshly assigned id.
    pub fn from_create(user_id: String, payload: UserCreate) -> Self {
        Self {
            user_id,
            name: payload.name,
            email: payload.email,
        }
    }
}

impl UserCreate {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl UserReplace {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
