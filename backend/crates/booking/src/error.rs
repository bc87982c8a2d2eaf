//! Booking Error Types
//!
//! Domain failures of the booking service. Every variant maps onto the
//! unified `kernel::error::AppError` and is rendered as a failed envelope.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use platform::password::PasswordPolicyError;
use thiserror::Error;

/// Booking-specific result type alias
pub type BookingResult<T> = Result<T, BookingError>;

/// Booking-specific error variants
///
/// The `Display` text of every client-facing variant is the message sent
/// back to the caller.
#[derive(Debug, Error)]
pub enum BookingError {
    /// A mandatory request field is missing or empty
    #[error("{0}")]
    Validation(&'static str),

    /// The request body or query could not be decoded
    #[error("Invalid request payload.")]
    InvalidRequest,

    #[error("Invalid email format.")]
    InvalidEmail,

    #[error("{0}.")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("User already exists.")]
    UserAlreadyExists,

    /// Unknown email or wrong password
    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Account is locked.")]
    AccountLocked,

    /// Missing, invalid or expired access token
    #[error("Unauthorized")]
    Unauthorized,

    #[error("User not found.")]
    UserNotFound,

    /// A referenced passenger does not exist or belongs to someone else
    #[error("Passenger not found.")]
    PassengerNotFound,

    #[error("Bus not found.")]
    BusNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error (hashing, token signing, corrupt rows)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookingError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingError::Validation(_)
            | BookingError::InvalidRequest
            | BookingError::InvalidEmail
            | BookingError::InvalidPassword(_) => ErrorKind::BadRequest,
            BookingError::UserAlreadyExists => ErrorKind::Conflict,
            BookingError::InvalidCredentials | BookingError::Unauthorized => {
                ErrorKind::Unauthorized
            }
            BookingError::AccountLocked => ErrorKind::Forbidden,
            BookingError::UserNotFound
            | BookingError::PassengerNotFound
            | BookingError::BusNotFound => ErrorKind::NotFound,
            BookingError::Database(e) => classify_sqlx(e).0,
            BookingError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Database and internal details are only logged, never sent.
    pub fn into_app_error(self) -> AppError {
        match self {
            BookingError::Database(e) => AppError::from(e),
            BookingError::Internal(_) => AppError::internal("Internal server error."),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BookingError::Database(e) => {
                tracing::error!(error = %e, "Booking database error");
            }
            BookingError::Internal(msg) => {
                tracing::error!(message = %msg, "Booking internal error");
            }
            BookingError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            BookingError::AccountLocked => {
                tracing::warn!("Login attempt on locked account");
            }
            _ => {
                tracing::debug!(error = %self, "Booking error");
            }
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
