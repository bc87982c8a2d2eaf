//! Access Token Middleware
//!
//! Guards every route except register and login.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer_token;
use platform::token::TokenIssuer;

use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::BookingError;

/// Middleware state
#[derive(Clone)]
pub struct AccessGuard {
    pub tokens: Arc<dyn TokenIssuer>,
}

/// Identity taken from a verified access token
///
/// Inserted into request extensions by [`require_access_token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub email: Email,
}

/// Middleware that requires `Authorization: Bearer <token>`
pub async fn require_access_token(
    State(guard): State<AccessGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, BookingError> {
    let token = extract_bearer_token(req.headers()).ok_or(BookingError::Unauthorized)?;

    let claims = guard.tokens.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "Access token rejected");
        BookingError::Unauthorized
    })?;

    // Tokens carrying an unknown role are not accepted
    UserRole::from_code(&claims.role).ok_or(BookingError::Unauthorized)?;

    req.extensions_mut().insert(AuthUser {
        email: Email::from_db(claims.sub),
    });

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BookingError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(BookingError::Unauthorized)
    }
}
