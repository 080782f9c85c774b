//! Contact DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidateLength, ValidationError, ValidationErrors};

use crate::domain::contact::rules::MAX_FIELD_LENGTH;
use crate::domain::{Contact, CreateContactDto, UpdateContactDto};
use crate::interfaces::http::common::input::{self, TextInput};

/// Contact API representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContactDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactDto {
    fn from(c: Contact) -> Self {
        Self {
            id: c.id,
            first_name: c.first_name,
            last_name: c.last_name,
            email: c.email,
            company: c.company,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Create contact request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateContactRequest {
    #[serde(default, deserialize_with = "input::text")]
    #[schema(value_type = String, example = "Bob")]
    pub first_name: Option<TextInput>,
    #[serde(default, deserialize_with = "input::text")]
    #[schema(value_type = String, example = "Loblaw")]
    pub last_name: Option<TextInput>,
    #[serde(default, deserialize_with = "input::text")]
    #[schema(value_type = String, example = "bob@example.com")]
    pub email: Option<TextInput>,
    #[serde(default, deserialize_with = "input::text")]
    #[schema(value_type = Option<String>, example = "Super Co")]
    pub company: Option<TextInput>,
}

impl Validate for CreateContactRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required(&mut errors, "first_name", self.first_name.as_ref(), false);
        check_required(&mut errors, "last_name", self.last_name.as_ref(), false);
        check_required(&mut errors, "email", self.email.as_ref(), true);
        if let Some(company) = &self.company {
            check_text(&mut errors, "company", company, false);
        }
        into_result(errors)
    }
}

impl CreateContactRequest {
    /// Only meaningful once `validate()` has passed.
    pub fn into_dto(self) -> CreateContactDto {
        CreateContactDto {
            first_name: text_or_empty(self.first_name),
            last_name: text_or_empty(self.last_name),
            email: text_or_empty(self.email),
            company: self.company.and_then(TextInput::into_text),
        }
    }
}

/// Update contact request. Omitted fields are left unchanged; `company`
/// may be `null` (or blank) to clear it.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateContactRequest {
    #[serde(default, deserialize_with = "input::patch_text")]
    #[schema(value_type = Option<String>)]
    pub first_name: Option<Option<TextInput>>,
    #[serde(default, deserialize_with = "input::patch_text")]
    #[schema(value_type = Option<String>)]
    pub last_name: Option<Option<TextInput>>,
    #[serde(default, deserialize_with = "input::patch_text")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<TextInput>>,
    #[serde(default, deserialize_with = "input::patch_text")]
    #[schema(value_type = Option<String>)]
    pub company: Option<Option<TextInput>>,
}

impl Validate for UpdateContactRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(value) = &self.first_name {
            check_required(&mut errors, "first_name", value.as_ref(), false);
        }
        if let Some(value) = &self.last_name {
            check_required(&mut errors, "last_name", value.as_ref(), false);
        }
        if let Some(value) = &self.email {
            check_required(&mut errors, "email", value.as_ref(), true);
        }
        if let Some(Some(company)) = &self.company {
            check_text(&mut errors, "company", company, false);
        }
        into_result(errors)
    }
}

impl UpdateContactRequest {
    /// Only meaningful once `validate()` has passed.
    pub fn into_dto(self) -> UpdateContactDto {
        UpdateContactDto {
            first_name: self.first_name.flatten().and_then(TextInput::into_text),
            last_name: self.last_name.flatten().and_then(TextInput::into_text),
            email: self.email.flatten().and_then(TextInput::into_text),
            company: self.company.map(|c| c.and_then(TextInput::into_text)),
        }
    }
}

// ── Field rules ────────────────────────────────────────────────

fn check_required(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&TextInput>,
    email: bool,
) {
    match value {
        None => errors.add(field, ValidationError::new("required")),
        Some(value) => check_text(errors, field, value, email),
    }
}

fn check_text(errors: &mut ValidationErrors, field: &'static str, value: &TextInput, email: bool) {
    let TextInput::Text(text) = value else {
        errors.add(field, ValidationError::new("string"));
        return;
    };
    if email && !text.validate_email() {
        errors.add(field, ValidationError::new("email"));
    }
    if !text.validate_length(None, Some(MAX_FIELD_LENGTH), None) {
        errors.add(field, ValidationError::new("length"));
    }
}

fn into_result(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn text_or_empty(value: Option<TextInput>) -> String {
    value.and_then(TextInput::into_text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(errors: &ValidationErrors, field: &str) -> Vec<String> {
        errors
            .field_errors()
            .get(field)
            .map(|errs| errs.iter().map(|e| e.code.to_string()).collect())
            .unwrap_or_default()
    }

    fn create(json: &str) -> CreateContactRequest {
        serde_json::from_str(json).unwrap()
    }

    fn update(json: &str) -> UpdateContactRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn empty_create_body_requires_names_and_email() {
        let errors = create("{}").validate().unwrap_err();
        assert_eq!(codes(&errors, "first_name"), ["required"]);
        assert_eq!(codes(&errors, "last_name"), ["required"]);
        assert_eq!(codes(&errors, "email"), ["required"]);
        assert!(codes(&errors, "company").is_empty());
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let errors = create(r#"{"first_name": "   ", "last_name": "L", "email": "a@b.co"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(codes(&errors, "first_name"), ["required"]);
        assert_eq!(errors.field_errors().len(), 1);
    }

    #[test]
    fn bad_email_and_long_company_are_reported() {
        let body = serde_json::json!({
            "first_name": "Bob",
            "last_name": "Loblaw",
            "email": "not-an-email",
            "company": "x".repeat(256),
        });
        let errors = create(&body.to_string()).validate().unwrap_err();
        assert_eq!(codes(&errors, "email"), ["email"]);
        assert_eq!(codes(&errors, "company"), ["length"]);
    }

    #[test]
    fn non_string_values_fail_the_string_rule() {
        let errors = create(r#"{"first_name": 1, "last_name": "L", "email": "a@b.co"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(codes(&errors, "first_name"), ["string"]);
    }

    #[test]
    fn valid_create_is_trimmed_into_dto() {
        let request = create(
            r#"{"first_name": " Bob ", "last_name": "Loblaw", "email": "bob@example.com", "company": "  "}"#,
        );
        assert!(request.validate().is_ok());

        let dto = request.into_dto();
        assert_eq!(dto.first_name, "Bob");
        assert_eq!(dto.email, "bob@example.com");
        assert_eq!(dto.company, None);
    }

    #[test]
    fn update_checks_only_present_fields() {
        assert!(update("{}").validate().is_ok());
        assert!(update(r#"{"company": null}"#).validate().is_ok());

        let errors = update(r#"{"first_name": "", "email": "nope"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(codes(&errors, "first_name"), ["required"]);
        assert_eq!(codes(&errors, "email"), ["email"]);
        assert!(codes(&errors, "last_name").is_empty());
    }

    #[test]
    fn update_dto_keeps_three_states_for_company() {
        let dto = update(r#"{"last_name": "Smith"}"#).into_dto();
        assert_eq!(dto.last_name.as_deref(), Some("Smith"));
        assert_eq!(dto.company, None);

        let dto = update(r#"{"company": null}"#).into_dto();
        assert_eq!(dto.company, Some(None));

        let dto = update(r#"{"company": "Acme"}"#).into_dto();
        assert_eq!(dto.company, Some(Some("Acme".to_string())));
    }
}
