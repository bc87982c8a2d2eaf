//! PostgreSQL Repository Implementation
//!
//! One statement per method. Inserts rely on the statement's implicit
//! transaction; ownership checks are part of the statement itself.

use chrono::{DateTime, Utc};
use kernel::id::{BookingId, BusId, CouponId, PassengerId, UserId};
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::{
    booking::{Booking, NewBooking},
    bus::{Bus, BusRoute},
    coupon::Coupon,
    passenger::{NewPassenger, Passenger},
    user::{NewUser, User},
};
use crate::domain::repository::{
    BookingRepository, BusRepository, CouponRepository, PassengerRepository, UserRepository,
};
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{BookingError, BookingResult};

/// PostgreSQL-backed booking repository
#[derive(Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgBookingRepository {
    async fn find_user_by_email(&self, email: &Email) -> BookingResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                user_name,
                password,
                role,
                phone_number,
                gender,
                dob,
                is_locked,
                user_wallet
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn create_user(&self, user: &NewUser) -> BookingResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (
                email,
                user_name,
                password,
                role,
                phone_number,
                gender,
                dob,
                is_locked,
                user_wallet
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, 0)
            RETURNING
                user_id,
                email,
                user_name,
                password,
                role,
                phone_number,
                gender,
                dob,
                is_locked,
                user_wallet
            "#,
        )
        .bind(user.email.as_str())
        .bind(&user.user_name)
        .bind(user.password.as_str())
        .bind(UserRole::default().code())
        .bind(&user.phone_number)
        .bind(&user.gender)
        .bind(&user.dob)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BookingError::UserAlreadyExists
            } else {
                BookingError::Database(e)
            }
        })?;

        row.into_user()
    }
}

// ============================================================================
// Passenger Repository Implementation
// ============================================================================

impl PassengerRepository for PgBookingRepository {
    async fn add_passenger(
        &self,
        owner: &Email,
        passenger: &NewPassenger,
    ) -> BookingResult<Passenger> {
        let row = sqlx::query_as::<_, PassengerRow>(
            r#"
            INSERT INTO passengers (name, age, gender, user_id)
            SELECT $2, $3, $4, u.user_id
            FROM users u
            WHERE u.email = $1
            RETURNING passenger_id, name, age, gender, user_id
            "#,
        )
        .bind(owner.as_str())
        .bind(&passenger.name)
        .bind(passenger.age)
        .bind(&passenger.gender)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PassengerRow::into_passenger)
            .ok_or(BookingError::UserNotFound)
    }

    async fn passengers_of(&self, owner: &Email) -> BookingResult<Vec<Passenger>> {
        let rows = sqlx::query_as::<_, PassengerRow>(
            r#"
            SELECT p.passenger_id, p.name, p.age, p.gender, p.user_id
            FROM passengers p
            JOIN users u ON u.user_id = p.user_id
            WHERE u.email = $1
            ORDER BY p.passenger_id
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PassengerRow::into_passenger).collect())
    }
}

// ============================================================================
// Bus Repository Implementation
// ============================================================================

impl BusRepository for PgBookingRepository {
    async fn search_buses(&self, route: &BusRoute) -> BookingResult<Vec<Bus>> {
        let rows = sqlx::query_as::<_, BusRow>(
            r#"
            SELECT
                b.bus_id,
                b.bus_number,
                b.total_sleeper_seats,
                b.total_push_back_seats,
                b.bus_type_code
            FROM buses b
            JOIN bus_stops dep
                ON dep.bus_id = b.bus_id AND lower(dep.station_name) = lower($1)
            JOIN bus_stops arr
                ON arr.bus_id = b.bus_id AND lower(arr.station_name) = lower($2)
            WHERE dep.stop_order < arr.stop_order
            ORDER BY b.bus_id
            "#,
        )
        .bind(route.departure_station.trim())
        .bind(route.arrival_station.trim())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BusRow::into_bus).collect())
    }
}

// ============================================================================
// Booking Repository Implementation
// ============================================================================

impl BookingRepository for PgBookingRepository {
    async fn create_booking(&self, owner: &Email, booking: &NewBooking) -> BookingResult<Booking> {
        // No row is inserted unless every passenger id belongs to the owner
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO bookings (user_id, bus_id, passenger_id, seats_reserved, booking_date)
            SELECT u.user_id, $2, $3, $4, $5
            FROM users u
            WHERE u.email = $1
              AND NOT EXISTS (
                  SELECT 1
                  FROM unnest($3::BIGINT[]) AS requested(passenger_id)
                  WHERE NOT EXISTS (
                      SELECT 1
                      FROM passengers p
                      WHERE p.passenger_id = requested.passenger_id
                        AND p.user_id = u.user_id
                  )
              )
            RETURNING booking_id, user_id, bus_id, passenger_id, seats_reserved, booking_date
            "#,
        )
        .bind(owner.as_str())
        .bind(booking.bus_id.get())
        .bind(booking.raw_passenger_ids())
        .bind(&booking.seats_reserved)
        .bind(&booking.booking_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                BookingError::BusNotFound
            } else {
                BookingError::Database(e)
            }
        })?;

        row.map(BookingRow::into_booking)
            .ok_or(BookingError::PassengerNotFound)
    }

    async fn bookings_of(&self, owner: &Email) -> BookingResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT b.booking_id, b.user_id, b.bus_id, b.passenger_id, b.seats_reserved, b.booking_date
            FROM bookings b
            JOIN users u ON u.user_id = b.user_id
            WHERE u.email = $1
            ORDER BY b.booking_id
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BookingRow::into_booking).collect())
    }
}

// ============================================================================
// Coupon Repository Implementation
// ============================================================================

impl CouponRepository for PgBookingRepository {
    async fn active_coupons(&self) -> BookingResult<Vec<Coupon>> {
        let rows = sqlx::query_as::<_, CouponRow>(
            r#"
            SELECT
                coupon_id,
                coupon_code,
                discount_percent,
                max_discount,
                min_booking_amount,
                valid_until
            FROM coupons
            WHERE valid_until > now()
            ORDER BY valid_until
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CouponRow::into_coupon).collect())
    }
}

// ============================================================================
// Error classification
// ============================================================================

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation())
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    email: String,
    user_name: String,
    password: String,
    role: String,
    phone_number: String,
    gender: String,
    dob: String,
    is_locked: bool,
    user_wallet: i64,
}

impl UserRow {
    fn into_user(self) -> BookingResult<User> {
        let role = UserRole::from_code(&self.role)
            .ok_or_else(|| BookingError::Internal(format!("Invalid role: {}", self.role)))?;

        Ok(User {
            user_id: UserId::new(self.user_id),
            email: Email::from_db(self.email),
            user_name: self.user_name,
            password: HashedPassword::from_db(self.password),
            role,
            phone_number: self.phone_number,
            gender: self.gender,
            dob: self.dob,
            is_locked: self.is_locked,
            user_wallet: self.user_wallet,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PassengerRow {
    passenger_id: i64,
    name: String,
    age: i32,
    gender: String,
    user_id: i64,
}

impl PassengerRow {
    fn into_passenger(self) -> Passenger {
        Passenger {
            passenger_id: PassengerId::new(self.passenger_id),
            name: self.name,
            age: self.age,
            gender: self.gender,
            user_id: UserId::new(self.user_id),
        }
    }
}

#[derive(sqlx::FromRow)]
struct BusRow {
    bus_id: i64,
    bus_number: String,
    total_sleeper_seats: i32,
    total_push_back_seats: i32,
    bus_type_code: String,
}

impl BusRow {
    fn into_bus(self) -> Bus {
        Bus {
            bus_id: BusId::new(self.bus_id),
            bus_number: self.bus_number,
            total_sleeper_seats: self.total_sleeper_seats,
            total_push_back_seats: self.total_push_back_seats,
            bus_type_code: self.bus_type_code,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    booking_id: i64,
    user_id: i64,
    bus_id: i64,
    passenger_id: Vec<i64>,
    seats_reserved: Vec<String>,
    booking_date: String,
}

impl BookingRow {
    fn into_booking(self) -> Booking {
        Booking {
            booking_id: BookingId::new(self.booking_id),
            user_id: UserId::new(self.user_id),
            bus_id: BusId::new(self.bus_id),
            passenger_id: self.passenger_id.into_iter().map(PassengerId::new).collect(),
            seats_reserved: self.seats_reserved,
            booking_date: self.booking_date,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CouponRow {
    coupon_id: i64,
    coupon_code: String,
    discount_percent: i32,
    max_discount: i64,
    min_booking_amount: i64,
    valid_until: DateTime<Utc>,
}

impl CouponRow {
    fn into_coupon(self) -> Coupon {
        Coupon {
            coupon_id: CouponId::new(self.coupon_id),
            coupon_code: self.coupon_code,
            discount_percent: self.discount_percent,
            max_discount: self.max_discount,
            min_booking_amount: self.min_booking_amount,
            valid_until: self.valid_until,
        }
    }
}
