use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::{info, instrument};

use crate::clients::UserClient;
use crate::domain::UserRecord;

use super::status::RpcStatus;
use super::wire::{
    CreateUserRequest, DeleteUserRequest, GetUserRequest, ListUsersResponse, MutationResponse,
    UpdateUserRequest,
};

pub const USER_CREATED: &str = "User created successfully";
pub const USER_UPDATED: &str = "User updated successfully";
pub const USER_DELETED: &str = "User deleted successfully";

pub type RpcResult<T> = Result<Json<T>, RpcStatus>;

/// Shared handler state: the handle to the user service.
#[derive(Clone)]
pub struct RpcState {
    pub users: UserClient,
}

// Bodies that fail to decode never reach the service.
fn decode<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, RpcStatus> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| RpcStatus::invalid_argument(rejection.body_text()))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<RpcState>) -> RpcResult<ListUsersResponse> {
    let users = state.users.list_users().await?;
    Ok(Json(ListUsersResponse { users }))
}

#[instrument(skip_all)]
pub async fn get_user(
    State(state): State<RpcState>,
    payload: Result<Json<GetUserRequest>, JsonRejection>,
) -> RpcResult<UserRecord> {
    let req = decode(payload)?;
    let user = state.users.get_user(req.user_id).await?;
    Ok(Json(user))
}

#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<RpcState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> RpcResult<MutationResponse> {
    let req = decode(payload)?;
    let user_id = state.users.create_user(req.into()).await?;
    info!(%user_id, "CreateUser completed");
    Ok(Json(MutationResponse::ok(USER_CREATED)))
}

#[instrument(skip_all)]
pub async fn update_user(
    State(state): State<RpcState>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> RpcResult<MutationResponse> {
    let (user_id, replacement) = decode(payload)?.into_parts();
    state.users.update_user(user_id, replacement).await?;
    Ok(Json(MutationResponse::ok(USER_UPDATED)))
}

#[instrument(skip_all)]
pub async fn delete_user(
    State(state): State<RpcState>,
    payload: Result<Json<DeleteUserRequest>, JsonRejection>,
) -> RpcResult<MutationResponse> {
    let req = decode(payload)?;
    state.users.delete_user(req.user_id).await?;
    Ok(Json(MutationResponse::ok(USER_DELETED)))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
