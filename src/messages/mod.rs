use tokio::sync::oneshot;

use crate::domain::{UserCreate, UserRecord, UserReplace};
use crate::user_actor::UserError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed messages for the user service. Each variant carries its parameters
/// and a oneshot channel for the reply.
#[derive(Debug)]
pub enum UserRequest {
    ListUsers {
        respond_to: ServiceResponse<Vec<UserRecord>, UserError>,
    },
    GetUser {
        id: String,
        respond_to: ServiceResponse<UserRecord, UserError>,
    },
    CreateUser {
        user: UserCreate,
        respond_to: ServiceResponse<String, UserError>,
    },
    UpdateUser {
        id: String,
        user: UserReplace,
        respond_to: ServiceResponse<UserRecord, UserError>,
    },
    DeleteUser {
        id: String,
        respond_to: ServiceResponse<UserRecord, UserError>,
    },
    Shutdown,
    #[cfg(test)]
    GetUserCount {
        respond_to: ServiceResponse<usize, UserError>,
    },
}
