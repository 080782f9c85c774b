//! Contact aggregate
//!
//! Contains the Contact entity, its write DTOs, and the repository interface.

pub mod model;
pub mod repository;
pub mod rules;

mod dto_create;
mod dto_update;

pub use model::Contact;

pub use dto_create::CreateContactDto;
pub use dto_update::UpdateContactDto;

pub use repository::ContactRepository;
