//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of vocabulary shared by every
//! booking component:
//! - Common error types and result aliases
//! - The `{status, message, data}` response envelope
//! - Typed integer identifiers
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all endpoints.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod envelope;
pub mod id;
