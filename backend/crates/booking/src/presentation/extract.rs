//! Validating Extractors
//!
//! Decode then validate. A rejected request never reaches the handler body.
//! Bodies are decoded as JSON regardless of `Content-Type`.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use serde::de::DeserializeOwned;

use crate::error::BookingError;
use crate::presentation::validator::Validate;

fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, BookingError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        BookingError::InvalidRequest
    })
}

/// JSON body that passed [`Validate`]
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = BookingError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(%rejection, "Unreadable request body");
            BookingError::InvalidRequest
        })?;

        let value: T = decode_json(&body)?;
        value.validate().map_err(BookingError::Validation)?;

        Ok(Self(value))
    }
}

/// Query string that passed [`Validate`], or else a JSON body
///
/// The body is only read when the query string alone fails validation.
/// With no body the query's validation message is returned.
#[derive(Debug, Clone)]
pub struct ValidatedQueryOrJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedQueryOrJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = BookingError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let Query(from_query) = Query::<T>::from_request_parts(&mut parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "Rejected query string");
                BookingError::InvalidRequest
            })?;

        if from_query.validate().is_ok() {
            return Ok(Self(from_query));
        }

        let body = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "Unreadable request body");
                BookingError::InvalidRequest
            })?;

        let value = if body.trim_ascii().is_empty() {
            from_query
        } else {
            decode_json(&body)?
        };
        value.validate().map_err(BookingError::Validation)?;

        Ok(Self(value))
    }
}
