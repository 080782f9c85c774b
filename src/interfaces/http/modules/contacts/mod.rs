//! Contacts module: paginated listing and CRUD

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
