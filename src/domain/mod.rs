//! Domain layer: entities, DTOs and repository interfaces

pub mod contact;

pub use contact::{Contact, ContactRepository, CreateContactDto, UpdateContactDto};

pub use crate::shared::errors::{DomainError, FieldErrors};

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
