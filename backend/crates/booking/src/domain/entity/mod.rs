//! Entity Module

pub mod booking;
pub mod bus;
pub mod coupon;
pub mod passenger;
pub mod user;
