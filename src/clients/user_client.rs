use tokio::sync::mpsc;
use tracing::{debug, instrument};

use super::macros::client_method;
use crate::domain::{UserCreate, UserRecord, UserReplace};
use crate::messages::UserRequest;
use crate::user_actor::UserError;

/// Handle to the user service. Cheap to clone; every clone feeds the same
/// mailbox, so requests from all clones are applied one at a time.
#[derive(Clone)]
pub struct UserClient {
    sender: mpsc::Sender<UserRequest>,
}

impl UserClient {
    pub fn new(sender: mpsc::Sender<UserRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), UserError> {
        debug!("Sending shutdown request");
        self.sender
            .send(UserRequest::Shutdown)
            .await
            .map_err(|e| UserError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(UserClient => fn list_users() -> Vec<UserRecord> as UserRequest::ListUsers);
client_method!(UserClient => fn get_user(id: String) -> UserRecord as UserRequest::GetUser);
client_method!(UserClient => fn create_user(user: UserCreate) -> String as UserRequest::CreateUser);
client_method!(UserClient => fn update_user(id: String, user: UserReplace) -> UserRecord as UserRequest::UpdateUser);
client_method!(UserClient => fn delete_user(id: String) -> UserRecord as UserRequest::DeleteUser);

#[cfg(test)]
client_method!(UserClient => fn get_user_count() -> usize as UserRequest::GetUserCount);
