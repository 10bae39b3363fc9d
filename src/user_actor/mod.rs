pub mod error;
pub mod service;
pub mod store;

pub use error::UserError;
pub use service::UserService;
pub use store::UserStore;
