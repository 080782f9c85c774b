//! Validation messages shared by the HTTP layer and the service.

use crate::domain::{DomainError, FieldErrors};

pub const MAX_FIELD_LENGTH: u64 = 255;

pub const EMAIL_TAKEN: &str = "The email has already been taken.";

/// Human label for a field: `first_name` -> `first name`.
pub fn field_label(field: &str) -> String {
    field.replace('_', " ")
}

pub fn required_message(field: &str) -> String {
    format!("The {} field is required.", field_label(field))
}

pub fn max_length_message(field: &str) -> String {
    format!(
        "The {} field must not be greater than {} characters.",
        field_label(field),
        MAX_FIELD_LENGTH
    )
}

pub fn email_message(field: &str) -> String {
    format!("The {} field must be a valid email address.", field_label(field))
}

pub fn string_message(field: &str) -> String {
    format!("The {} field must be a string.", field_label(field))
}

pub fn email_taken() -> DomainError {
    DomainError::Validation(FieldErrors::single("email", EMAIL_TAKEN))
}
