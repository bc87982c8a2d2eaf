//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from driver errors to [`AppError`], and the
//! HTTP rendering of [`AppError`] as a failed envelope.

use super::app_error::AppError;
#[allow(unused_imports)]
use super::kind::ErrorKind;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify a driver error into a kind and a client-safe message
///
/// See <https://www.postgresql.org/docs/current/errcodes-appendix.html>.
#[cfg(feature = "sqlx")]
pub fn classify_sqlx(err: &sqlx::Error) -> (ErrorKind, &'static str) {
    const UNAVAILABLE: (ErrorKind, &str) =
        (ErrorKind::ServiceUnavailable, "Service temporarily unavailable.");
    const INTERNAL: (ErrorKind, &str) = (ErrorKind::InternalServerError, "Internal server error.");

    match err {
        sqlx::Error::RowNotFound => (ErrorKind::NotFound, "Record not found."),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => UNAVAILABLE,
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23505") => (ErrorKind::Conflict, "Record already exists."),
            Some("23503") => (ErrorKind::NotFound, "Referenced record not found."),
            Some("23502" | "23514") => (ErrorKind::BadRequest, "Invalid field value."),
            Some("53000" | "53100" | "53200" | "53300" | "57P01" | "57P02" | "57P03") => {
                UNAVAILABLE
            }
            _ => INTERNAL,
        },
        _ => INTERNAL,
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, message) = classify_sqlx(&err);
        AppError::new(kind, message).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        use crate::envelope::Envelope;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(Envelope::failed(self.message().to_owned()))).into_response()
    }
}
