//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id) behind an injectable strategy
//! - Access token issuance and verification (JWT, HS256)
//! - Bearer credential extraction

pub mod bearer;
pub mod password;
pub mod token;
