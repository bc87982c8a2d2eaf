//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    booking::Booking, bus::Bus, coupon::Coupon, passenger::Passenger, user::User,
};
pub use repository::{
    BookingRepository, BusRepository, CouponRepository, PassengerRepository, UserRepository,
};
