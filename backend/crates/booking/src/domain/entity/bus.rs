//! Bus Entity
//!
//! Read-only projection returned by route search.

use kernel::id::BusId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bus {
    pub bus_id: BusId,
    pub bus_number: String,
    pub total_sleeper_seats: i32,
    pub total_push_back_seats: i32,
    pub bus_type_code: String,
}

/// Station pair to search for
///
/// A bus matches when it stops at `departure_station` before
/// `arrival_station`. Station names compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusRoute {
    pub departure_station: String,
    pub arrival_station: String,
}
