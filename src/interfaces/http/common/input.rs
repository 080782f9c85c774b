//! Request-body string normalisation
//!
//! String fields are trimmed and an empty string counts as absent.
//! Non-string JSON values are kept as [`TextInput::NotText`] so validation
//! can report them per field instead of failing the whole body.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInput {
    Text(String),
    NotText,
}

impl TextInput {
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s),
            Self::NotText => None,
        }
    }
}

fn normalise(value: Value) -> Option<TextInput> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(TextInput::Text(trimmed.to_string()))
            }
        }
        _ => Some(TextInput::NotText),
    }
}

/// `#[serde(default, deserialize_with = "text")]`: `null`, `""` and
/// whitespace all become `None`.
pub fn text<'de, D>(deserializer: D) -> Result<Option<TextInput>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(normalise(Value::deserialize(deserializer)?))
}

/// `#[serde(default, deserialize_with = "patch_text")]`: an absent key stays
/// `None`; a present key becomes `Some(..)`, where `Some(None)` means the
/// value was null or blank.
pub fn patch_text<'de, D>(deserializer: D) -> Result<Option<Option<TextInput>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(normalise(Value::deserialize(deserializer)?)))
}
