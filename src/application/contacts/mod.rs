//! Contacts use-cases

mod service;

pub use service::ContactService;
