//! User Service
//!
//! The use cases behind every `/user/*` endpoint. Handlers depend on the
//! [`UserService`] trait only, so tests can substitute a fake.

use serde::Serialize;

use crate::domain::entity::{
    booking::{Booking, NewBooking},
    bus::{Bus, BusRoute},
    coupon::Coupon,
    passenger::{NewPassenger, Passenger},
    user::User,
};
use crate::domain::value_object::email::Email;
use crate::error::BookingResult;

/// Register input
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email: String,
    pub user_name: String,
    pub password: String,
    pub phone_number: String,
    pub gender: String,
    pub dob: String,
}

/// Login input
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutput {
    pub access_token: String,
}

/// Booking use cases
///
/// `caller` is the email carried by the verified access token.
#[trait_variant::make(UserService: Send)]
pub trait LocalUserService {
    async fn register(&self, input: RegisterInput) -> BookingResult<User>;

    async fn login(&self, input: LoginInput) -> BookingResult<LoginOutput>;

    async fn find_bus(&self, route: BusRoute) -> BookingResult<Vec<Bus>>;

    async fn add_passenger(&self, caller: &Email, passenger: NewPassenger)
    -> BookingResult<Passenger>;

    async fn view_all_passengers(&self, caller: &Email) -> BookingResult<Vec<Passenger>>;

    async fn book_seat(&self, caller: &Email, booking: NewBooking) -> BookingResult<Booking>;

    async fn view_coupons(&self) -> BookingResult<Vec<Coupon>>;

    async fn view_bookings(&self, caller: &Email) -> BookingResult<Vec<Booking>>;
}
