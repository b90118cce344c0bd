//! Shared response types.

pub mod response;

pub use response::{Created, MessageResponse, NoContent};
