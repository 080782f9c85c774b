//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` works like `axum::Json<T>`, but additionally runs
//! `validator::Validate::validate()` on the deserialized value. Failures
//! become an [`ApiError`]: body-reading problems keep the status axum picked,
//! validation problems become a 422 with per-field messages.

use axum::extract::FromRequest;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiError;

/// An extractor that deserializes JSON and validates it.
///
/// ```ignore
/// async fn handler(ValidatedJson(body): ValidatedJson<CreateContactRequest>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(max = 255))]
        first_name: String,
        #[validate(email)]
        email: String,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<TestBody>) -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new().route("/test", post(handler))
    }

    async fn send(req: Request<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = app().into_service();
        svc.call(req).await.unwrap()
    }

    fn json_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let resp = send(json_request(r#"{"first_name": "Bob", "email": "bob@example.com"}"#)).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400() {
        let resp = send(json_request("not json")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_content_type_returns_400() {
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .body(Body::from("{}"))
            .unwrap();
        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wrong_shape_returns_400() {
        let resp = send(json_request(r#"{"first_name": 7, "email": "bob@example.com"}"#)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn validation_failure_returns_422_with_fields() {
        let long_name = "a".repeat(256);
        let body = serde_json::json!({"first_name": long_name, "email": "nope"});
        let resp = send(json_request(&body.to_string())).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            json["errors"]["email"][0],
            "The email field must be a valid email address."
        );
        assert_eq!(
            json["message"],
            "The first name field must not be greater than 255 characters. (and 1 more error)"
        );
    }
}
