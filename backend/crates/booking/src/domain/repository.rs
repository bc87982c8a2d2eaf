//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Every method is a single statement against the store; operations on
//! passengers and bookings are scoped to the owning account's email.

use crate::domain::entity::{
    booking::{Booking, NewBooking},
    bus::{Bus, BusRoute},
    coupon::Coupon,
    passenger::{NewPassenger, Passenger},
    user::{NewUser, User},
};
use crate::domain::value_object::email::Email;
use crate::error::BookingResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by (normalized) email
    async fn find_user_by_email(&self, email: &Email) -> BookingResult<Option<User>>;

    /// Insert a new user
    ///
    /// Fails with `UserAlreadyExists` if the email is taken.
    async fn create_user(&self, user: &NewUser) -> BookingResult<User>;
}

/// Passenger repository trait
#[trait_variant::make(PassengerRepository: Send)]
pub trait LocalPassengerRepository {
    /// Insert a passenger under the account identified by `owner`
    ///
    /// Fails with `UserNotFound` if no such account exists.
    async fn add_passenger(&self, owner: &Email, passenger: &NewPassenger)
    -> BookingResult<Passenger>;

    /// All passengers of the account, oldest first
    async fn passengers_of(&self, owner: &Email) -> BookingResult<Vec<Passenger>>;
}

/// Bus repository trait
#[trait_variant::make(BusRepository: Send)]
pub trait LocalBusRepository {
    async fn search_buses(&self, route: &BusRoute) -> BookingResult<Vec<Bus>>;
}

/// Booking repository trait
#[trait_variant::make(BookingRepository: Send)]
pub trait LocalBookingRepository {
    /// Insert a booking for the account identified by `owner`
    ///
    /// Inserts only if every referenced passenger belongs to `owner`
    /// (`PassengerNotFound` otherwise). An unknown bus fails with `BusNotFound`.
    async fn create_booking(&self, owner: &Email, booking: &NewBooking) -> BookingResult<Booking>;

    /// All bookings of the account, oldest first
    async fn bookings_of(&self, owner: &Email) -> BookingResult<Vec<Booking>>;
}

/// Coupon repository trait
#[trait_variant::make(CouponRepository: Send)]
pub trait LocalCouponRepository {
    /// Coupons whose `valid_until` is still in the future
    async fn active_coupons(&self) -> BookingResult<Vec<Coupon>>;
}
