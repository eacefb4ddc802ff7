//! Root-keyed JSON body extractor for Axum
//!
//! `RootedJson<T>` expects a body of the form `{"<root>": {...}}` and
//! deserializes the inner object into `T`. Unknown keys inside the object
//! are ignored, so `T` acts as the allow-list of accepted fields.
//!
//! - not JSON, wrong content type, missing/empty root → 400
//! - well-formed JSON whose values have the wrong type → 422

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiError;

/// Types that arrive wrapped under a fixed top-level key.
pub trait RootKey {
    const ROOT: &'static str;
}

pub struct RootedJson<T>(pub T);

/// Error type for `RootedJson` extraction failures.
#[derive(Debug)]
pub enum RootedJsonRejection {
    /// Body could not be read as JSON at all.
    Malformed(JsonRejection),
    /// Root key absent, `null`, or an empty object.
    MissingRoot(&'static str),
    /// Inner object has values of the wrong type.
    Invalid(serde_json::Error),
}

impl From<RootedJsonRejection> for ApiError {
    fn from(rejection: RootedJsonRejection) -> Self {
        match rejection {
            RootedJsonRejection::Malformed(rejection) => {
                ApiError::bad_request(format!("Invalid JSON: {}", rejection.body_text()))
            }
            RootedJsonRejection::MissingRoot(root) => ApiError::bad_request(format!(
                "param is missing or the value is empty: {}",
                root
            )),
            RootedJsonRejection::Invalid(e) => {
                ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, format!("Invalid parameters: {}", e))
            }
        }
    }
}

impl IntoResponse for RootedJsonRejection {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

impl<S, T> FromRequest<S> for RootedJson<T>
where
    T: DeserializeOwned + RootKey,
    S: Send + Sync,
{
    type Rejection = RootedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(RootedJsonRejection::Malformed)?;

        let inner = match body {
            Value::Object(mut map) => map.remove(T::ROOT),
            _ => None,
        };

        match inner {
            Some(Value::Object(fields)) if !fields.is_empty() => {
                serde_json::from_value(Value::Object(fields))
                    .map(RootedJson)
                    .map_err(RootedJsonRejection::Invalid)
            }
            _ => Err(RootedJsonRejection::MissingRoot(T::ROOT)),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
