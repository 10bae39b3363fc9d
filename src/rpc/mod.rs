//! Inbound RPC surface of the `user.UserService` contract, served as
//! JSON over HTTP with one `POST` route per operation.

pub mod handlers;
pub mod status;
pub mod wire;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub use handlers::RpcState;

pub const LIST_USERS_PATH: &str = "/user.UserService/ListUsers";
pub const GET_USER_PATH: &str = "/user.UserService/GetUser";
pub const CREATE_USER_PATH: &str = "/user.UserService/CreateUser";
pub const UPDATE_USER_PATH: &str = "/user.UserService/UpdateUser";
pub const DELETE_USER_PATH: &str = "/user.UserService/DeleteUser";

pub fn build_router(state: RpcState) -> Router {
    Router::new()
        .route(LIST_USERS_PATH, post(handlers::list_users))
        .route(GET_USER_PATH, post(handlers::get_user))
        .route(CREATE_USER_PATH, post(handlers::create_user))
        .route(UPDATE_USER_PATH, post(handlers::update_user))
        .route(DELETE_USER_PATH, post(handlers::delete_user))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
