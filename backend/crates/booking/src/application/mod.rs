//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod service;
pub mod user_service;

// Re-exports
pub use config::BookingConfig;
pub use service::{LoginInput, LoginOutput, RegisterInput, UserService};
pub use user_service::UserServiceImpl;
