//! Booking Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, validation, router
//!
//! ## Features
//! - Account registration and login with bearer access tokens
//! - Bus search by station pair
//! - Passenger management and seat booking, scoped to the caller
//! - Coupon and booking history listing
//!
//! Every response is a `{status, message, data}` envelope.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::BookingConfig;
pub use error::{BookingError, BookingResult};
pub use infra::postgres::PgBookingRepository;
pub use presentation::router::{booking_router, user_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
