//! API DTOs (Data Transfer Objects)
//!
//! Every request field defaults to its empty value, whether it is missing or
//! sent as `null`, so that it reaches the validator instead of failing the
//! decode.

use kernel::id::{BusId, PassengerId, UserId};
use serde::{Deserialize, Deserializer, Serialize};

use crate::application::service::{LoginInput, RegisterInput};
use crate::domain::entity::{
    booking::NewBooking, bus::BusRoute, passenger::NewPassenger, user::User,
};
use crate::domain::value_object::user_role::UserRole;

/// Decode `null` as the field's empty value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Register
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub password: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dob: String,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            user_name: req.user_name,
            password: req.password,
            phone_number: req.phone_number,
            gender: req.gender,
            dob: req.dob,
        }
    }
}

/// Registered account as returned to the client (no password)
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub email: String,
    pub user_name: String,
    pub role: UserRole,
    pub phone_number: String,
    pub gender: String,
    pub dob: String,
    pub is_locked: bool,
    pub user_wallet: i64,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email.into_db(),
            user_name: user.user_name,
            role: user.role,
            phone_number: user.phone_number,
            gender: user.gender,
            dob: user.dob,
            is_locked: user.is_locked,
            user_wallet: user.user_wallet,
        }
    }
}

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

// ============================================================================
// Find Bus
// ============================================================================

/// `GET /user/findbus?departure_station=..&arrival_station=..` or the same
/// fields as a JSON body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FindBusQuery {
    #[serde(deserialize_with = "null_as_default")]
    pub departure_station: String,
    #[serde(deserialize_with = "null_as_default")]
    pub arrival_station: String,
}

impl From<FindBusQuery> for BusRoute {
    fn from(query: FindBusQuery) -> Self {
        Self {
            departure_station: query.departure_station,
            arrival_station: query.arrival_station,
        }
    }
}

// ============================================================================
// Passengers
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddPassengerRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub age: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub gender: String,
}

impl From<AddPassengerRequest> for NewPassenger {
    fn from(req: AddPassengerRequest) -> Self {
        Self {
            name: req.name.trim().to_owned(),
            age: req.age,
            gender: req.gender.trim().to_owned(),
        }
    }
}

// ============================================================================
// Book Seat
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookSeatRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub bus_id: i64,
    /// Passenger ids, one per seat
    #[serde(deserialize_with = "null_as_default")]
    pub passenger_id: Vec<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub seats_reserved: Vec<String>,
    /// e.g. `"01012024"`
    #[serde(deserialize_with = "null_as_default")]
    pub booking_date: String,
}

impl From<BookSeatRequest> for NewBooking {
    fn from(req: BookSeatRequest) -> Self {
        Self {
            bus_id: BusId::new(req.bus_id),
            passenger_ids: req.passenger_id.into_iter().map(PassengerId::new).collect(),
            seats_reserved: req.seats_reserved,
            booking_date: req.booking_date,
        }
    }
}
