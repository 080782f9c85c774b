//! Database entities module

pub mod contact;

pub use contact::Entity as Contact;
