//! Request body binding for DTOs.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::AppError;

/// JSON body extractor that reports rejections in the standard error format.
///
/// Structural validation only: the body must deserialize into `T`. Bodies that
/// are well-formed JSON of the wrong shape are a `422`, everything else a `400`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let reason = rejection.body_text();
    if rejection.status() == StatusCode::UNPROCESSABLE_ENTITY {
        AppError::validation(
            vec![json!({ "field": "body", "error": reason })],
            "request body failed validation",
        )
    } else {
        AppError::bad_request(reason)
    }
}
