use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Per-field validation messages, kept in the order they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(String, Vec<String>)>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field shorthand.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.0.iter_mut().find(|(f, _)| *f == field) {
            Some((_, messages)) => messages.push(message),
            None => self.0.push((field, vec![message])),
        }
    }

    /// Total number of messages across all fields.
    pub fn message_count(&self) -> usize {
        self.0.iter().map(|(_, m)| m.len()).sum()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_slice())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(f, _)| f.as_str())
    }

    pub fn first_message(&self) -> Option<&str> {
        self.0
            .first()
            .and_then(|(_, m)| m.first())
            .map(String::as_str)
    }

    /// Headline: the first message, plus a count of the remaining ones.
    pub fn summary(&self) -> String {
        let first = self.first_message().unwrap_or("The given data was invalid.");
        match self.message_count().saturating_sub(1) {
            0 => first.to_string(),
            1 => format!("{} (and 1 more error)", first),
            n => format!("{} (and {} more errors)", first, n),
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{}: {}", field, m)))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, messages) in &self.0 {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(FieldErrors),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}
