//! Data model for the contacts API

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contact as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One entry of the envelope's `links` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLink {
    pub url: Option<String>,
    pub label: String,
    pub page: Option<u64>,
    pub active: bool,
}

/// Paginated response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub current_page: u64,
    pub data: Vec<T>,
    pub first_page_url: String,
    pub from: Option<u64>,
    pub last_page: u64,
    pub last_page_url: String,
    #[serde(default)]
    pub links: Vec<PageLink>,
    pub next_page_url: Option<String>,
    pub path: String,
    pub per_page: u64,
    pub prev_page_url: Option<String>,
    pub to: Option<u64>,
    pub total: u64,
}

/// Body sent on create and update. `company: None` is sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: Option<String>,
}

/// Editable form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Company,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Company,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::FirstName => "First name",
            FormField::LastName => "Last name",
            FormField::Email => "Email",
            FormField::Company => "Company",
        }
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "first_name" | "first" => Ok(FormField::FirstName),
            "last_name" | "last" => Ok(FormField::LastName),
            "email" => Ok(FormField::Email),
            "company" => Ok(FormField::Company),
            other => Err(format!("Unknown field: {}", other)),
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormField::FirstName => "first_name",
            FormField::LastName => "last_name",
            FormField::Email => "email",
            FormField::Company => "company",
        };
        f.write_str(name)
    }
}

/// In-progress create/edit values. Every field is plain text; an empty
/// company means "no company".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
}

impl ContactForm {
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            email: contact.email.clone(),
            company: contact.company.clone().unwrap_or_default(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Company => &self.company,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::FirstName => self.first_name = value,
            FormField::LastName => self.last_name = value,
            FormField::Email => self.email = value,
            FormField::Company => self.company = value,
        }
    }

    /// First name, last name and email are all filled in.
    pub fn is_complete(&self) -> bool {
        [&self.first_name, &self.last_name, &self.email]
            .iter()
            .all(|v| !v.trim().is_empty())
    }

    pub fn to_input(&self) -> ContactInput {
        let company = self.company.trim();
        ContactInput {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            company: (!company.is_empty()).then(|| company.to_string()),
        }
    }
}
