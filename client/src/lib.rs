//! # contacts-client
//!
//! Terminal client for the contacts API: an HTTP wrapper, a state
//! controller mirroring the contacts screen, and plain-text rendering.

pub mod api;
pub mod app;
pub mod commands;
pub mod error;
pub mod model;
pub mod render;

pub use api::{ContactsApi, HttpContactsApi};
pub use app::{Confirm, ContactsApp};
pub use error::{ClientError, Result};
pub use model::{Contact, ContactForm, ContactInput, FormField, Paginated};
