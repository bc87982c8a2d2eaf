//! Passenger Entity
//!
//! A traveller saved under a user's account.

use kernel::id::{PassengerId, UserId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Passenger {
    pub passenger_id: PassengerId,
    pub name: String,
    pub age: i32,
    pub gender: String,
    /// Owning account
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPassenger {
    pub name: String,
    pub age: i32,
    pub gender: String,
}
