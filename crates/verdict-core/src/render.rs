//! Response rendering
//!
//! Every response is a status code plus an optional JSON payload.
//!
//! | Helper | Status | Body |
//! |--------|--------|------|
//! | [`ok`] | 200 | payload |
//! | [`accepted`] | 202 | empty |
//! | [`no_content`] | 204 | empty |
//! | [`bad_request`] | 400 | payload |
//! | [`unauthorized`] | 401 | empty |
//! | [`not_found`] | 404 | empty |
//! | [`unprocessable_entity`] | 422 | payload |
//! | [`server_error`] | 500 | empty |

use bytes::Bytes;
use http::{header, StatusCode};
use http_body_util::Full;
use serde::Serialize;
use thiserror::Error;

/// HTTP Response type
pub type Response = http::Response<Full<Bytes>>;

/// Rendering failure.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize response body: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to build response: {0}")]
    Http(#[from] http::Error),
}

/// Trait for types that can be converted into an HTTP response
pub trait IntoResponse {
    /// Convert self into a Response
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        empty(self)
    }
}

/// Build a response with `status` and, when present, `body` serialized as
/// JSON. Without a body the response has no content and no content type.
pub fn respond<T>(status: StatusCode, body: Option<&T>) -> Result<Response, RenderError>
where
    T: Serialize + ?Sized,
{
    let builder = http::Response::builder().status(status);
    let response = match body {
        Some(body) => {
            let json = serde_json::to_vec(body)?;
            builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Full::new(Bytes::from(json)))?
        }
        None => builder.body(Full::new(Bytes::new()))?,
    };
    Ok(response)
}

/// A body-less response. Infallible: only the status is set.
pub(crate) fn empty(status: StatusCode) -> Response {
    let mut response = http::Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}

/// 200 with the provided body.
pub fn ok<T: Serialize + ?Sized>(body: &T) -> Result<Response, RenderError> {
    respond(StatusCode::OK, Some(body))
}

/// 202 with an empty body.
pub fn accepted() -> Result<Response, RenderError> {
    respond::<()>(StatusCode::ACCEPTED, None)
}

/// 204 with an empty body.
pub fn no_content() -> Result<Response, RenderError> {
    respond::<()>(StatusCode::NO_CONTENT, None)
}

/// 400 with the provided body.
pub fn bad_request<T: Serialize + ?Sized>(body: &T) -> Result<Response, RenderError> {
    respond(StatusCode::BAD_REQUEST, Some(body))
}

/// 422 with the provided body.
pub fn unprocessable_entity<T: Serialize + ?Sized>(body: &T) -> Result<Response, RenderError> {
    respond(StatusCode::UNPROCESSABLE_ENTITY, Some(body))
}

pub fn unauthorized() -> Result<Response, RenderError> {
    respond::<()>(StatusCode::UNAUTHORIZED, None)
}

pub fn not_found() -> Result<Response, RenderError> {
    respond::<()>(StatusCode::NOT_FOUND, None)
}

pub fn server_error() -> Result<Response, RenderError> {
    respond::<()>(StatusCode::INTERNAL_SERVER_ERROR, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde::ser::Error as _;
    use serde_json::{json, Value};
    use std::collections::BTreeMap;

    async fn body_bytes(response: Response) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn payload_is_json() {
        let response = ok(&json!({"quest": "find the grail"})).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body, json!({"quest": "find the grail"}));
    }

    #[tokio::test]
    async fn no_payload_is_header_only() {
        let response = respond::<()>(StatusCode::CREATED, None).unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn status_table() {
        let cases = [
            (accepted().unwrap(), StatusCode::ACCEPTED),
            (no_content().unwrap(), StatusCode::NO_CONTENT),
            (unauthorized().unwrap(), StatusCode::UNAUTHORIZED),
            (not_found().unwrap(), StatusCode::NOT_FOUND),
            (server_error().unwrap(), StatusCode::INTERNAL_SERVER_ERROR),
            (bad_request("nope").unwrap(), StatusCode::BAD_REQUEST),
            (unprocessable_entity(&[1, 2]).unwrap(), StatusCode::UNPROCESSABLE_ENTITY),
        ];
        for (response, status) in cases {
            assert_eq!(response.status(), status);
        }
    }

    #[tokio::test]
    async fn error_helpers_carry_body() {
        let response = bad_request(&json!({"success": false})).unwrap();
        assert_eq!(&body_bytes(response).await[..], br#"{"success":false}"#);
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("not today"))
        }
    }

    #[test]
    fn serialization_failure_is_reported() {
        let err = ok(&Unserializable).unwrap_err();
        assert!(matches!(err, RenderError::Serialize(_)));
    }

    #[test]
    fn non_string_map_keys_fail_to_serialize() {
        let mut map = BTreeMap::new();
        map.insert((1, 2), "pair");
        assert!(matches!(ok(&map), Err(RenderError::Serialize(_))));
    }

    #[test]
    fn status_code_into_response() {
        let response = StatusCode::NOT_FOUND.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
