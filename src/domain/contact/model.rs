//! Contact domain entity

use chrono::{DateTime, Utc};

/// A stored person/organization record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Server-assigned, monotonic identifier
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all contacts
    pub email: String,
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
