use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::clients::UserClient;
use crate::domain::{NotificationRequest, UserCreate, UserRecord, UserReplace};
use crate::messages::{ServiceResponse, UserRequest};
use crate::notification::NotificationDispatcher;

use super::{UserError, UserStore};

/// User directory actor.
///
/// Owns the [`UserStore`] outright. The mailbox is the store's only
/// mutual-exclusion scope: one request is applied at a time, so concurrent
/// creates never race for an id and an update racing a delete resolves in
/// arrival order.
///
/// Every committed mutation hands a [`NotificationRequest`] to the dispatcher
/// *after* the reply has been sent. The dispatcher spawns the outbound call,
/// so the actor never waits on the downstream service.
pub struct UserService {
    receiver: mpsc::Receiver<UserRequest>,
    store: UserStore,
    notifier: NotificationDispatcher,
}

impl UserService {
    pub fn new(
        buffer_size: usize,
        store: UserStore,
        notifier: NotificationDispatcher,
    ) -> (Self, UserClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            store,
            notifier,
        };
        (service, UserClient::new(sender))
    }

    #[instrument(name = "user_service", skip(self))]
    pub async fn run(mut self) {
        info!(user_count = self.store.len(), "UserService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                UserRequest::ListUsers { respond_to } => {
                    self.handle_list_users(respond_to);
                }
                UserRequest::GetUser { id, respond_to } => {
                    self.handle_get_user(id, respond_to);
                }
                UserRequest::CreateUser { user, respond_to } => {
                    self.handle_create_user(user, respond_to);
                }
                UserRequest::UpdateUser {
                    id,
                    user,
                    respond_to,
                } => {
                    self.handle_update_user(id, user, respond_to);
                }
                UserRequest::DeleteUser { id, respond_to } => {
                    self.handle_delete_user(id, respond_to);
                }
                UserRequest::Shutdown => {
                    info!("UserService shutting down");
                    break;
                }
                #[cfg(test)]
                UserRequest::GetUserCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }

        info!("UserService stopped");
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list_users(&self, respond_to: ServiceResponse<Vec<UserRecord>, UserError>) {
        debug!("Processing list_users request");

        let users = self.store.list_all();
        info!(user_count = users.len(), "Listed users");

        let _ = respond_to.send(Ok(users));
    }

    #[instrument(fields(user_id = %id), skip(self, id, respond_to))]
    fn handle_get_user(&self, id: String, respond_to: ServiceResponse<UserRecord, UserError>) {
        debug!("Processing get_user request");

        let result = match self.store.find_by_id(&id) {
            Some(user) => {
                info!(user_name = %user.name, "User found");
                Ok(user.clone())
            }
            None => {
                debug!("User not found");
                Err(UserError::NotFound(id))
            }
        };

        let _ = respond_to.send(result);
    }

    #[instrument(fields(user_name = %user.name), skip(self, user, respond_to))]
    fn handle_create_user(&mut self, user: UserCreate, respond_to: ServiceResponse<String, UserError>) {
        debug!("Processing create_user request");

        let email = user.email.clone();
        let id = self.store.insert(user);
        info!(user_id = %id, "User created successfully");

        let _ = respond_to.send(Ok(id.clone()));
        self.notifier.dispatch(NotificationRequest::welcome(id, email));
    }

    #[instrument(fields(user_id = %id, user_name = %user.name), skip(self, id, user, respond_to))]
    fn handle_update_user(
        &mut self,
        id: String,
        user: UserReplace,
        respond_to: ServiceResponse<UserRecord, UserError>,
    ) {
        debug!("Processing update_user request");

        let updated = match self.store.replace(&id, user) {
            Some(record) => record.clone(),
            None => {
                warn!("User not found for update");
                let _ = respond_to.send(Err(UserError::NotFound(id)));
                return;
            }
        };
        info!("User updated successfully");

        let notification = NotificationRequest::updated(&updated.user_id, &updated.email);
        let _ = respond_to.send(Ok(updated));
        self.notifier.dispatch(notification);
    }

    #[instrument(fields(user_id = %id), skip(self, id, respond_to))]
    fn handle_delete_user(&mut self, id: String, respond_to: ServiceResponse<UserRecord, UserError>) {
        debug!("Processing delete_user request");

        let removed = match self.store.remove_by_id(&id) {
            Some(record) => record,
            None => {
                warn!("User not found for delete");
                let _ = respond_to.send(Err(UserError::NotFound(id)));
                return;
            }
        };
        info!(remaining = self.store.len(), "User deleted successfully");

        // The record is gone from the store; notify with the email it had.
        let notification = NotificationRequest::deleted(&removed.user_id, &removed.email);
        let _ = respond_to.send(Ok(removed));
        self.notifier.dispatch(notification);
    }
}
