//! Booking Entity

use kernel::id::{BookingId, BusId, PassengerId, UserId};
use serde::Serialize;

/// Confirmed seat reservation
///
/// `seats_reserved[i]` is the seat of `passenger_id[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub bus_id: BusId,
    pub passenger_id: Vec<PassengerId>,
    pub seats_reserved: Vec<String>,
    /// e.g. `"01012024"`
    pub booking_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub bus_id: BusId,
    pub passenger_ids: Vec<PassengerId>,
    pub seats_reserved: Vec<String>,
    pub booking_date: String,
}

impl NewBooking {
    pub fn raw_passenger_ids(&self) -> Vec<i64> {
        self.passenger_ids.iter().map(PassengerId::get).collect()
    }
}
