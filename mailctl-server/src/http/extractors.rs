//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde_json::Value;

use super::error::ApiError;
use crate::models::{FromPayload, MailId, ValidationError};

/// Extract a mail id from the path.
///
/// A segment that is not an integer can never name a stored mail, so it is
/// reported as "mail not found" rather than as a validation error.
pub struct ValidMailId(pub MailId);

impl<S> FromRequestParts<S> for ValidMailId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::mail_not_found())?;

        let id = id.parse().map_err(|_| ApiError::mail_not_found())?;
        Ok(Self(id))
    }
}

/// Extract a JSON body and validate it into `T`.
///
/// Bodies that are not JSON objects are rejected as a single `body` error;
/// otherwise every field problem is reported together.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: FromPayload + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationError::malformed_body(rejection.body_text()))?;

        Ok(Self(T::from_payload(&payload)?))
    }
}
