//! User Entity
//!
//! Registered account. The password column holds an Argon2id PHC string.

use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, user_role::UserRole};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, lower case
    pub email: Email,
    pub user_name: String,
    pub password: HashedPassword,
    pub role: UserRole,
    pub phone_number: String,
    pub gender: String,
    /// Free-form date of birth, e.g. `"26121998"`
    pub dob: String,
    pub is_locked: bool,
    pub user_wallet: i64,
}

impl User {
    /// Check if user can login
    pub fn can_login(&self) -> bool {
        !self.is_locked
    }
}

/// Account data for registration
///
/// Role, lock flag and wallet take their defaults in the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub user_name: String,
    pub password: HashedPassword,
    pub phone_number: String,
    pub gender: String,
    pub dob: String,
}
