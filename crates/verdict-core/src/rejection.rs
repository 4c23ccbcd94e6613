//! Rejection returned by the typed extractors.

use crate::render::{self, IntoResponse, Response};
use crate::validatable::BoxError;
use http::StatusCode;
use std::fmt;
use tracing::error;
use verdict_validate::ValidationResult;

/// Why a request could not be turned into a validated value.
///
/// ```rust,ignore
/// async fn create(req: Request) -> Response {
///     match binder.json::<Signup>(&ctx, &mut req).await {
///         Ok(signup) => render::ok(&signup).unwrap_or_else(|e| ...),
///         Err(rejection) => rejection.into_response(),
///     }
/// }
/// ```
#[derive(Debug)]
pub enum Rejection {
    /// The client sent something unacceptable.
    Invalid(ValidationResult),
    /// Custom validation failed unexpectedly.
    Internal(BoxError),
}

impl Rejection {
    /// Status this rejection renders with: 400 when the result carries
    /// schema errors (the input could not be read), 422 for field or custom
    /// failures, 500 for internal errors.
    pub fn status(&self) -> StatusCode {
        match self {
            Rejection::Invalid(result) if !result.schema_errors().is_empty() => {
                StatusCode::BAD_REQUEST
            }
            Rejection::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Rejection::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn result(&self) -> Option<&ValidationResult> {
        match self {
            Rejection::Invalid(result) => Some(result),
            Rejection::Internal(_) => None,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Invalid(result) => write!(
                f,
                "invalid request: {} field error(s), {} schema error(s)",
                result.field_errors().len(),
                result.schema_errors().len()
            ),
            Rejection::Internal(e) => write!(f, "internal validation error: {e}"),
        }
    }
}

impl std::error::Error for Rejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Rejection::Invalid(_) => None,
            Rejection::Internal(e) => Some(&**e),
        }
    }
}

impl From<ValidationResult> for Rejection {
    fn from(result: ValidationResult) -> Self {
        Rejection::Invalid(result)
    }
}

impl From<BoxError> for Rejection {
    fn from(err: BoxError) -> Self {
        Rejection::Internal(err)
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Rejection::Invalid(result) => match render::respond(status, Some(&result)) {
                Ok(response) => response,
                Err(e) => {
                    error!(error = %e, "failed to render validation result");
                    render::empty(StatusCode::INTERNAL_SERVER_ERROR)
                }
            },
            Rejection::Internal(e) => {
                // Internal details never reach the client.
                error!(error = %e, "custom validation failed unexpectedly");
                render::empty(status)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use verdict_validate::{ErrorCode, FieldError};

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn malformed_input_is_bad_request() {
        let response = Rejection::Invalid(ValidationResult::malformed()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({
                "success": false,
                "field_errors": [],
                "schema_errors": [{"code": "malformed"}]
            })
        );
    }

    #[tokio::test]
    async fn field_failure_is_unprocessable() {
        let result = ValidationResult::fields_failure([FieldError::coded(
            "first_name",
            ErrorCode::REQUIRED,
        )]);
        let response = Rejection::from(result).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await["field_errors"],
            json!([{"field": "first_name", "code": "required"}])
        );
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let rejection = Rejection::from(BoxError::from("database unreachable"));
        assert!(rejection.result().is_none());
        assert_eq!(
            rejection.to_string(),
            "internal validation error: database unreachable"
        );

        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }
}
