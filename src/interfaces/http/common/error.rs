//! HTTP error mapping
//!
//! Every handler returns `Result<_, ApiError>`. Bodies always carry a
//! `message`; validation failures add a per-field `errors` object:
//!
//! ```json
//! {"message": "The email has already been taken.", "errors": {"email": ["The email has already been taken."]}}
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::contact::rules;
use crate::domain::{DomainError, FieldErrors};

/// Plain `{"message": ...}` error body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

/// 422 body: headline message plus messages per field
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorBody {
    pub message: String,
    #[schema(value_type = Object)]
    pub errors: FieldErrors,
}

/// `{"ok": true}` acknowledgment
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

#[derive(Debug)]
pub enum ApiError {
    /// 422 with field errors
    Validation(FieldErrors),
    /// 404
    NotFound(String),
    /// Request body could not be read (status chosen by the rejection)
    Rejected { status: StatusCode, message: String },
    /// 500; the detail is logged, never returned
    Internal(String),
}

impl ApiError {
    pub fn contact_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("Contact {} not found.", id))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => {
                let body = ValidationErrorBody {
                    message: errors.summary(),
                    errors,
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(MessageBody { message })).into_response()
            }
            Self::Rejected { status, message } => {
                (status, Json(MessageBody { message })).into_response()
            }
            Self::Internal(detail) => {
                error!("Internal error: {}", detail);
                let body = MessageBody {
                    message: "Server Error".to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { entity, value, .. } => {
                Self::NotFound(format!("{} {} not found.", entity, value))
            }
            DomainError::Validation(errors) => Self::Validation(errors),
            DomainError::Database(msg) => Self::Internal(msg),
        }
    }
}

/// Body problems are client errors: bad syntax, a missing JSON content
/// type and a body of the wrong shape all answer 400.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) => Self::Rejected {
                status: StatusCode::BAD_REQUEST,
                message: NOT_AN_OBJECT.to_string(),
            },
            JsonRejection::JsonSyntaxError(_) | JsonRejection::MissingJsonContentType(_) => {
                Self::Rejected {
                    status: StatusCode::BAD_REQUEST,
                    message: rejection.body_text(),
                }
            }
            other => Self::Rejected {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

const NOT_AN_OBJECT: &str = "The request body must be a JSON object.";

/// Order in which contact fields are reported
const FIELD_ORDER: [&str; 4] = ["first_name", "last_name", "email", "company"];

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(field_errors_from(&errors))
    }
}

/// Translate `validator` output into ordered, human-readable field errors.
pub fn field_errors_from(errors: &validator::ValidationErrors) -> FieldErrors {
    let mut fields: Vec<(String, Vec<validator::ValidationError>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field.to_string(), errs.clone()))
        .collect();

    fields.sort_by_key(|(field, _)| {
        let rank = FIELD_ORDER
            .iter()
            .position(|f| f == field)
            .unwrap_or(FIELD_ORDER.len());
        (rank, field.clone())
    });

    let mut out = FieldErrors::new();
    for (field, errs) in fields {
        for e in errs {
            let message = match e.code.as_ref() {
                "required" => rules::required_message(&field),
                "string" => rules::string_message(&field),
                "length" => rules::max_length_message(&field),
                "email" => rules::email_message(&field),
                _ => e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("The {} field is invalid.", rules::field_label(&field))),
            };
            out.add(field.clone(), message);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::{ValidationError, ValidationErrors};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn validator_errors_are_ordered_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add("email", ValidationError::new("email"));
        errors.add("first_name", ValidationError::new("required"));
        errors.add("company", ValidationError::new("length"));

        let fields = field_errors_from(&errors);
        assert_eq!(
            fields.fields().collect::<Vec<_>>(),
            ["first_name", "email", "company"]
        );
        assert_eq!(
            fields.get("first_name").unwrap(),
            ["The first name field is required."]
        );
        assert_eq!(
            fields.get("email").unwrap(),
            ["The email field must be a valid email address."]
        );
        assert_eq!(
            fields.get("company").unwrap(),
            ["The company field must not be greater than 255 characters."]
        );
    }

    #[tokio::test]
    async fn validation_error_renders_422_with_field_map() {
        let response = ApiError::Validation(FieldErrors::single("email", rules::EMAIL_TAKEN))
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert_eq!(json["message"], rules::EMAIL_TAKEN);
        assert_eq!(json["errors"]["email"][0], rules::EMAIL_TAKEN);
    }

    #[tokio::test]
    async fn domain_not_found_renders_404() {
        let err = DomainError::NotFound {
            entity: "Contact",
            field: "id",
            value: "7".to_string(),
        };
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Contact 7 not found.");
    }

    #[tokio::test]
    async fn database_errors_do_not_leak() {
        let response =
            ApiError::from(DomainError::Database("disk I/O error".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], "Server Error");
    }
}
