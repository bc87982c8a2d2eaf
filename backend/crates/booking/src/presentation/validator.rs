//! Request Validation
//!
//! Mandatory-field checks run by the extractors before a handler body.
//! Rules are checked in order and the first violation wins.

use std::collections::HashSet;
use std::hash::Hash;

use crate::presentation::dto::{
    AddPassengerRequest, BookSeatRequest, FindBusQuery, LoginRequest, RegisterRequest,
};

pub const MISSING_MANDATORY_FIELDS: &str = "Missing mandatory fields.";
pub const EMPTY_PASSWORD: &str = "Password cannot be empty.";
pub const EMPTY_EMAIL: &str = "Email cannot be empty.";
pub const EMPTY_STATIONS: &str = "Stations cannot be empty.";
pub const EMPTY_BOOKING_FIELDS: &str = "Mandatory fields cannot be empty";
pub const SEAT_COUNT_MISMATCH: &str = "Each passenger must have exactly one seat.";

/// A request that knows its own mandatory fields
pub trait Validate {
    fn validate(&self) -> Result<(), &'static str>;
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn has_duplicates<T: Eq + Hash>(items: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    !items.iter().all(|item| seen.insert(item))
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), &'static str> {
        if is_blank(&self.email) || is_blank(&self.user_name) || is_blank(&self.password) {
            return Err(MISSING_MANDATORY_FIELDS);
        }
        Ok(())
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), &'static str> {
        // Password is checked first
        if self.password.is_empty() {
            return Err(EMPTY_PASSWORD);
        }
        if self.email.is_empty() {
            return Err(EMPTY_EMAIL);
        }
        Ok(())
    }
}

impl Validate for FindBusQuery {
    fn validate(&self) -> Result<(), &'static str> {
        if is_blank(&self.departure_station) || is_blank(&self.arrival_station) {
            return Err(EMPTY_STATIONS);
        }
        Ok(())
    }
}

impl Validate for AddPassengerRequest {
    fn validate(&self) -> Result<(), &'static str> {
        if is_blank(&self.name) || is_blank(&self.gender) || self.age <= 0 {
            return Err(MISSING_MANDATORY_FIELDS);
        }
        Ok(())
    }
}

impl Validate for BookSeatRequest {
    fn validate(&self) -> Result<(), &'static str> {
        if self.bus_id <= 0
            || self.passenger_id.is_empty()
            || self.seats_reserved.is_empty()
            || is_blank(&self.booking_date)
            || has_duplicates(&self.passenger_id)
            || has_duplicates(&self.seats_reserved)
        {
            return Err(EMPTY_BOOKING_FIELDS);
        }
        if self.passenger_id.len() != self.seats_reserved.len() {
            return Err(SEAT_COUNT_MISMATCH);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn book_seat() -> BookSeatRequest {
        BookSeatRequest {
            bus_id: 7,
            passenger_id: vec![1, 2],
            seats_reserved: vec!["A1".to_string(), "A2".to_string()],
            booking_date: "01012024".to_string(),
        }
    }

    #[test]
    fn test_register_rules() {
        let valid = RegisterRequest {
            email: "alice@example.com".to_string(),
            user_name: "Alice".to_string(),
            password: "secret".to_string(),
            ..Default::default()
        };
        assert_eq!(valid.validate(), Ok(()));

        let blank_name = RegisterRequest {
            user_name: "   ".to_string(),
            ..valid.clone()
        };
        assert_eq!(blank_name.validate(), Err(MISSING_MANDATORY_FIELDS));
        assert_eq!(
            RegisterRequest::default().validate(),
            Err(MISSING_MANDATORY_FIELDS)
        );
    }

    #[test]
    fn test_login_checks_password_before_email() {
        assert_eq!(login("", "").validate(), Err(EMPTY_PASSWORD));
        assert_eq!(login("alice@example.com", "").validate(), Err(EMPTY_PASSWORD));
        assert_eq!(login("", "secret").validate(), Err(EMPTY_EMAIL));
        assert_eq!(login("alice@example.com", "secret").validate(), Ok(()));
    }

    #[test]
    fn test_find_bus_requires_both_stations() {
        let query = |from: &str, to: &str| FindBusQuery {
            departure_station: from.to_string(),
            arrival_station: to.to_string(),
        };
        assert_eq!(query("", "Mysuru").validate(), Err(EMPTY_STATIONS));
        assert_eq!(query("Bengaluru", "").validate(), Err(EMPTY_STATIONS));
        assert_eq!(query("Bengaluru", " ").validate(), Err(EMPTY_STATIONS));
        assert_eq!(query("Bengaluru", "Mysuru").validate(), Ok(()));
    }

    #[test]
    fn test_add_passenger_rules() {
        let valid = AddPassengerRequest {
            name: "Asha".to_string(),
            age: 31,
            gender: "F".to_string(),
        };
        assert_eq!(valid.validate(), Ok(()));

        for invalid in [
            AddPassengerRequest {
                name: String::new(),
                ..valid.clone()
            },
            AddPassengerRequest {
                gender: String::new(),
                ..valid.clone()
            },
            AddPassengerRequest {
                age: 0,
                ..valid.clone()
            },
        ] {
            assert_eq!(invalid.validate(), Err(MISSING_MANDATORY_FIELDS));
        }
    }

    #[test]
    fn test_book_seat_rules() {
        assert_eq!(book_seat().validate(), Ok(()));

        let missing_date = BookSeatRequest {
            booking_date: String::new(),
            ..book_seat()
        };
        assert_eq!(missing_date.validate(), Err(EMPTY_BOOKING_FIELDS));

        let no_bus = BookSeatRequest {
            bus_id: 0,
            ..book_seat()
        };
        assert_eq!(no_bus.validate(), Err(EMPTY_BOOKING_FIELDS));

        let no_passengers = BookSeatRequest {
            passenger_id: Vec::new(),
            ..book_seat()
        };
        assert_eq!(no_passengers.validate(), Err(EMPTY_BOOKING_FIELDS));

        let repeated_passenger = BookSeatRequest {
            passenger_id: vec![1, 1],
            ..book_seat()
        };
        assert_eq!(repeated_passenger.validate(), Err(EMPTY_BOOKING_FIELDS));

        let repeated_seat = BookSeatRequest {
            seats_reserved: vec!["A1".to_string(), "A1".to_string()],
            ..book_seat()
        };
        assert_eq!(repeated_seat.validate(), Err(EMPTY_BOOKING_FIELDS));

        let mismatch = BookSeatRequest {
            seats_reserved: vec!["A1".to_string()],
            ..book_seat()
        };
        assert_eq!(mismatch.validate(), Err(SEAT_COUNT_MISMATCH));
    }
}
