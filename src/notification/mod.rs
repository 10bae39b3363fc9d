//! Outbound notification plumbing: the downstream client and the
//! fire-and-forget dispatcher the user service drives.

pub mod client;
pub mod dispatcher;

pub use client::*;
pub use dispatcher::*;
