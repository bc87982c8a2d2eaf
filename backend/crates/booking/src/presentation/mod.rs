//! Presentation Layer
//!
//! HTTP handlers, DTOs, validation, router, and middleware.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod validator;

pub use handlers::UserAppState;
pub use middleware::{AccessGuard, AuthUser, require_access_token};
pub use router::{booking_router, user_router};
