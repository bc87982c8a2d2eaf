//! User Service Implementation
//!
//! Validate-then-single-query use cases over the repository traits, with
//! the password hasher and token issuer injected at construction.

use std::sync::Arc;

use platform::password::{ClearTextPassword, PasswordHasher};
use platform::token::TokenIssuer;

use crate::application::service::{LoginInput, LoginOutput, RegisterInput, UserService};
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
use crate::domain::value_object::email::Email;
use crate::error::{BookingError, BookingResult};

/// Default [`UserService`]
pub struct UserServiceImpl<R, H, T> {
    repo: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R, H, T> UserServiceImpl<R, H, T>
where
    R: UserRepository
        + PassengerRepository
        + BusRepository
        + BookingRepository
        + CouponRepository
        + Send
        + Sync
        + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
{
    pub fn new(repo: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            repo,
            hasher,
            tokens,
        }
    }
}

impl<R, H, T> UserService for UserServiceImpl<R, H, T>
where
    R: UserRepository
        + PassengerRepository
        + BusRepository
        + BookingRepository
        + CouponRepository
        + Send
        + Sync
        + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
{
    async fn register(&self, input: RegisterInput) -> BookingResult<User> {
        let email = Email::new(input.email)?;

        // Checked before hashing so a duplicate costs one lookup
        if self.repo.find_user_by_email(&email).await?.is_some() {
            return Err(BookingError::UserAlreadyExists);
        }

        let password = ClearTextPassword::new(input.password)?;
        let password = self
            .hasher
            .hash(&password)
            .map_err(|e| BookingError::Internal(e.to_string()))?;

        let user = self
            .repo
            .create_user(&NewUser {
                email,
                user_name: input.user_name.trim().to_owned(),
                password,
                phone_number: input.phone_number,
                gender: input.gender,
                dob: input.dob,
            })
            .await?;

        tracing::info!(user_id = %user.user_id, role = %user.role, "User registered");

        Ok(user)
    }

    async fn login(&self, input: LoginInput) -> BookingResult<LoginOutput> {
        let email = Email::normalize(input.email);

        let user = self
            .repo
            .find_user_by_email(&email)
            .await?
            .ok_or(BookingError::InvalidCredentials)?;

        let password = ClearTextPassword::for_verification(input.password);
        if !self.hasher.verify(&password, &user.password) {
            return Err(BookingError::InvalidCredentials);
        }

        if !user.can_login() {
            return Err(BookingError::AccountLocked);
        }

        let access_token = self
            .tokens
            .issue(user.email.as_str(), user.role.code())
            .map_err(|e| BookingError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { access_token })
    }

    async fn find_bus(&self, route: BusRoute) -> BookingResult<Vec<Bus>> {
        self.repo.search_buses(&route).await
    }

    async fn add_passenger(
        &self,
        caller: &Email,
        passenger: NewPassenger,
    ) -> BookingResult<Passenger> {
        self.repo.add_passenger(caller, &passenger).await
    }

    async fn view_all_passengers(&self, caller: &Email) -> BookingResult<Vec<Passenger>> {
        self.repo.passengers_of(caller).await
    }

    async fn book_seat(&self, caller: &Email, booking: NewBooking) -> BookingResult<Booking> {
        let booking = self.repo.create_booking(caller, &booking).await?;

        tracing::info!(
            booking_id = %booking.booking_id,
            bus_id = %booking.bus_id,
            seats = booking.seats_reserved.len(),
            "Seats booked"
        );

        Ok(booking)
    }

    async fn view_coupons(&self) -> BookingResult<Vec<Coupon>> {
        self.repo.active_coupons().await
    }

    async fn view_bookings(&self, caller: &Email) -> BookingResult<Vec<Booking>> {
        self.repo.bookings_of(caller).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{Duration, Utc};
    use kernel::id::{BookingId, BusId, CouponId, PassengerId, UserId};
    use platform::password::{HashedPassword, PasswordHashError};
    use platform::token::{JwtTokenService, TokenIssuer};

    use super::*;
    use crate::domain::value_object::user_role::UserRole;

    // ------------------------------------------------------------------
    // Fakes
    // ------------------------------------------------------------------

    /// Stores `plain$<password>`
    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
            Ok(HashedPassword::from_db(format!("plain${}", password.expose_secret())))
        }

        fn verify(&self, password: &ClearTextPassword, hashed: &HashedPassword) -> bool {
            hashed.as_str() == format!("plain${}", password.expose_secret())
        }
    }

    #[derive(Default)]
    struct Store {
        users: Vec<User>,
        passengers: Vec<Passenger>,
        buses: Vec<(Bus, Vec<&'static str>)>,
        bookings: Vec<Booking>,
        coupons: Vec<Coupon>,
    }

    #[derive(Default)]
    struct InMemoryRepository {
        store: Mutex<Store>,
    }

    impl InMemoryRepository {
        fn user_id_of(store: &Store, owner: &Email) -> Option<UserId> {
            store
                .users
                .iter()
                .find(|u| &u.email == owner)
                .map(|u| u.user_id)
        }

        fn user_count(&self) -> usize {
            self.store.lock().unwrap().users.len()
        }
    }

    impl UserRepository for InMemoryRepository {
        async fn find_user_by_email(&self, email: &Email) -> BookingResult<Option<User>> {
            let store = self.store.lock().unwrap();
            Ok(store.users.iter().find(|u| &u.email == email).cloned())
        }

        async fn create_user(&self, user: &NewUser) -> BookingResult<User> {
            let mut store = self.store.lock().unwrap();
            if store.users.iter().any(|u| u.email == user.email) {
                return Err(BookingError::UserAlreadyExists);
            }
            let created = User {
                user_id: UserId::new(store.users.len() as i64 + 1),
                email: user.email.clone(),
                user_name: user.user_name.clone(),
                password: user.password.clone(),
                role: UserRole::User,
                phone_number: user.phone_number.clone(),
                gender: user.gender.clone(),
                dob: user.dob.clone(),
                is_locked: false,
                user_wallet: 0,
            };
            store.users.push(created.clone());
            Ok(created)
        }
    }

    impl PassengerRepository for InMemoryRepository {
        async fn add_passenger(
            &self,
            owner: &Email,
            passenger: &NewPassenger,
        ) -> BookingResult<Passenger> {
            let mut store = self.store.lock().unwrap();
            let user_id = Self::user_id_of(&store, owner).ok_or(BookingError::UserNotFound)?;
            let created = Passenger {
                passenger_id: PassengerId::new(store.passengers.len() as i64 + 1),
                name: passenger.name.clone(),
                age: passenger.age,
                gender: passenger.gender.clone(),
                user_id,
            };
            store.passengers.push(created.clone());
            Ok(created)
        }

        async fn passengers_of(&self, owner: &Email) -> BookingResult<Vec<Passenger>> {
            let store = self.store.lock().unwrap();
            let user_id = Self::user_id_of(&store, owner);
            Ok(store
                .passengers
                .iter()
                .filter(|p| Some(p.user_id) == user_id)
                .cloned()
                .collect())
        }
    }

    impl BusRepository for InMemoryRepository {
        async fn search_buses(&self, route: &BusRoute) -> BookingResult<Vec<Bus>> {
            let store = self.store.lock().unwrap();
            let position = |stops: &[&str], station: &str| {
                stops.iter().position(|s| s.eq_ignore_ascii_case(station))
            };
            Ok(store
                .buses
                .iter()
                .filter(|(_, stops)| {
                    matches!(
                        (
                            position(stops, &route.departure_station),
                            position(stops, &route.arrival_station)
                        ),
                        (Some(from), Some(to)) if from < to
                    )
                })
                .map(|(bus, _)| bus.clone())
                .collect())
        }
    }

    impl BookingRepository for InMemoryRepository {
        async fn create_booking(
            &self,
            owner: &Email,
            booking: &NewBooking,
        ) -> BookingResult<Booking> {
            let mut store = self.store.lock().unwrap();
            let user_id =
                Self::user_id_of(&store, owner).ok_or(BookingError::PassengerNotFound)?;

            let owns_all = booking.passenger_ids.iter().all(|id| {
                store
                    .passengers
                    .iter()
                    .any(|p| p.passenger_id == *id && p.user_id == user_id)
            });
            if !owns_all {
                return Err(BookingError::PassengerNotFound);
            }
            if !store.buses.iter().any(|(b, _)| b.bus_id == booking.bus_id) {
                return Err(BookingError::BusNotFound);
            }

            let created = Booking {
                booking_id: BookingId::new(store.bookings.len() as i64 + 1),
                user_id,
                bus_id: booking.bus_id,
                passenger_id: booking.passenger_ids.clone(),
                seats_reserved: booking.seats_reserved.clone(),
                booking_date: booking.booking_date.clone(),
            };
            store.bookings.push(created.clone());
            Ok(created)
        }

        async fn bookings_of(&self, owner: &Email) -> BookingResult<Vec<Booking>> {
            let store = self.store.lock().unwrap();
            let user_id = Self::user_id_of(&store, owner);
            Ok(store
                .bookings
                .iter()
                .filter(|b| Some(b.user_id) == user_id)
                .cloned()
                .collect())
        }
    }

    impl CouponRepository for InMemoryRepository {
        async fn active_coupons(&self) -> BookingResult<Vec<Coupon>> {
            let store = self.store.lock().unwrap();
            let now = Utc::now();
            Ok(store
                .coupons
                .iter()
                .filter(|c| c.is_active_at(now))
                .cloned()
                .collect())
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    type TestService = UserServiceImpl<InMemoryRepository, PlainHasher, JwtTokenService>;

    const SECRET: &[u8] = b"user-service-test-secret-0123456789";

    fn service_with(repo: InMemoryRepository) -> (TestService, Arc<InMemoryRepository>) {
        let repo = Arc::new(repo);
        let tokens = Arc::new(JwtTokenService::new(SECRET, Duration::hours(24)));
        (
            UserServiceImpl::new(repo.clone(), Arc::new(PlainHasher), tokens),
            repo,
        )
    }

    fn register_input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            email: email.to_string(),
            user_name: "Alice".to_string(),
            password: password.to_string(),
            phone_number: "9999999999".to_string(),
            gender: "F".to_string(),
            dob: "26121998".to_string(),
        }
    }

    fn login_input(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn bus(id: i64, stops: Vec<&'static str>) -> (Bus, Vec<&'static str>) {
        (
            Bus {
                bus_id: BusId::new(id),
                bus_number: format!("KA-01-{id:04}"),
                total_sleeper_seats: 20,
                total_push_back_seats: 30,
                bus_type_code: "AC-SLEEPER".to_string(),
            },
            stops,
        )
    }

    // ------------------------------------------------------------------
    // Register
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_register_creates_user_with_defaults() {
        let (service, repo) = service_with(InMemoryRepository::default());

        let user = service
            .register(register_input("Alice@Example.com", "correct horse"))
            .await
            .unwrap();

        assert_eq!(user.email.as_str(), "alice@example.com");
        assert_eq!(user.role, UserRole::User);
        assert!(!user.is_locked);
        assert_eq!(user.user_wallet, 0);
        assert_eq!(user.password.as_str(), "plain$correct horse");
        assert_eq!(repo.user_count(), 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_leaves_storage_untouched() {
        let (service, repo) = service_with(InMemoryRepository::default());
        service
            .register(register_input("alice@example.com", "first password"))
            .await
            .unwrap();

        let result = service
            .register(register_input("ALICE@example.com", "second password"))
            .await;

        assert!(matches!(result, Err(BookingError::UserAlreadyExists)));
        assert_eq!(repo.user_count(), 1);

        let stored = repo
            .find_user_by_email(&Email::normalize("alice@example.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.password.as_str(), "plain$first password");
    }

    #[tokio::test]
    async fn test_register_rejects_bad_email() {
        let (service, repo) = service_with(InMemoryRepository::default());
        let result = service
            .register(register_input("not-an-email", "password"))
            .await;

        assert!(matches!(result, Err(BookingError::InvalidEmail)));
        assert_eq!(repo.user_count(), 0);
    }

    // ------------------------------------------------------------------
    // Login
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_login_issues_token_for_email() {
        let (service, _) = service_with(InMemoryRepository::default());
        service
            .register(register_input("alice@example.com", "secret pass"))
            .await
            .unwrap();

        let output = service
            .login(login_input(" Alice@Example.com", "secret pass"))
            .await
            .unwrap();

        assert!(!output.access_token.is_empty());
        let claims = JwtTokenService::new(SECRET, Duration::hours(24))
            .verify(&output.access_token)
            .unwrap();
        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.role, "user");
    }

    #[tokio::test]
    async fn test_login_wrong_password_or_unknown_user() {
        let (service, _) = service_with(InMemoryRepository::default());
        service
            .register(register_input("alice@example.com", "secret pass"))
            .await
            .unwrap();

        let wrong = service
            .login(login_input("alice@example.com", "nope"))
            .await;
        assert!(matches!(wrong, Err(BookingError::InvalidCredentials)));

        let unknown = service
            .login(login_input("bob@example.com", "secret pass"))
            .await;
        assert!(matches!(unknown, Err(BookingError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_locked_account() {
        let (service, repo) = service_with(InMemoryRepository::default());
        service
            .register(register_input("alice@example.com", "secret pass"))
            .await
            .unwrap();
        repo.store.lock().unwrap().users[0].is_locked = true;

        let result = service
            .login(login_input("alice@example.com", "secret pass"))
            .await;
        assert!(matches!(result, Err(BookingError::AccountLocked)));

        // A wrong password on a locked account does not reveal the lock
        let result = service
            .login(login_input("alice@example.com", "wrong"))
            .await;
        assert!(matches!(result, Err(BookingError::InvalidCredentials)));
    }

    // ------------------------------------------------------------------
    // Passengers, buses, bookings, coupons
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_passengers_are_scoped_to_caller() {
        let (service, _) = service_with(InMemoryRepository::default());
        service
            .register(register_input("alice@example.com", "pw"))
            .await
            .unwrap();
        service
            .register(register_input("bob@example.com", "pw"))
            .await
            .unwrap();
        let alice = Email::normalize("alice@example.com");
        let bob = Email::normalize("bob@example.com");

        let added = service
            .add_passenger(
                &alice,
                NewPassenger {
                    name: "Asha".to_string(),
                    age: 31,
                    gender: "F".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(added.name, "Asha");

        assert_eq!(service.view_all_passengers(&alice).await.unwrap(), vec![added]);
        assert!(service.view_all_passengers(&bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_passenger_unknown_caller() {
        let (service, _) = service_with(InMemoryRepository::default());
        let result = service
            .add_passenger(
                &Email::normalize("ghost@example.com"),
                NewPassenger {
                    name: "Asha".to_string(),
                    age: 31,
                    gender: "F".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(BookingError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_find_bus_by_station_order() {
        let repo = InMemoryRepository::default();
        {
            let mut store = repo.store.lock().unwrap();
            store.buses.push(bus(1, vec!["Bengaluru", "Mysuru", "Ooty"]));
            store.buses.push(bus(2, vec!["Ooty", "Mysuru", "Bengaluru"]));
        }
        let (service, _) = service_with(repo);

        let found = service
            .find_bus(BusRoute {
                departure_station: "bengaluru".to_string(),
                arrival_station: "Ooty".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].bus_id, BusId::new(1));
    }

    #[tokio::test]
    async fn test_book_seat_requires_owned_passengers() {
        let repo = InMemoryRepository::default();
        repo.store
            .lock()
            .unwrap()
            .buses
            .push(bus(7, vec!["Pune", "Mumbai"]));
        let (service, repo) = service_with(repo);

        for email in ["alice@example.com", "bob@example.com"] {
            service.register(register_input(email, "pw")).await.unwrap();
        }
        let alice = Email::normalize("alice@example.com");
        let bob = Email::normalize("bob@example.com");
        let new_passenger = || NewPassenger {
            name: "P".to_string(),
            age: 20,
            gender: "M".to_string(),
        };
        let mine = service.add_passenger(&alice, new_passenger()).await.unwrap();
        let theirs = service.add_passenger(&bob, new_passenger()).await.unwrap();

        let request = |ids: Vec<PassengerId>, bus_id: i64| NewBooking {
            bus_id: BusId::new(bus_id),
            seats_reserved: ids.iter().map(|id| format!("S{id}")).collect(),
            passenger_ids: ids,
            booking_date: "01012024".to_string(),
        };

        let stolen = service
            .book_seat(&alice, request(vec![mine.passenger_id, theirs.passenger_id], 7))
            .await;
        assert!(matches!(stolen, Err(BookingError::PassengerNotFound)));
        assert!(repo.store.lock().unwrap().bookings.is_empty());

        let no_bus = service
            .book_seat(&alice, request(vec![mine.passenger_id], 99))
            .await;
        assert!(matches!(no_bus, Err(BookingError::BusNotFound)));

        let booked = service
            .book_seat(&alice, request(vec![mine.passenger_id], 7))
            .await
            .unwrap();
        assert_eq!(booked.passenger_id, vec![mine.passenger_id]);
        assert_eq!(booked.seats_reserved, vec![format!("S{}", mine.passenger_id)]);

        assert_eq!(service.view_bookings(&alice).await.unwrap(), vec![booked]);
        assert!(service.view_bookings(&bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_view_coupons_only_active() {
        let repo = InMemoryRepository::default();
        {
            let mut store = repo.store.lock().unwrap();
            let coupon = |id: i64, valid_until| Coupon {
                coupon_id: CouponId::new(id),
                coupon_code: format!("SAVE{id}"),
                discount_percent: 10,
                max_discount: 100,
                min_booking_amount: 500,
                valid_until,
            };
            store.coupons.push(coupon(1, Utc::now() + Duration::days(3)));
            store.coupons.push(coupon(2, Utc::now() - Duration::days(3)));
        }
        let (service, _) = service_with(repo);

        let coupons = service.view_coupons().await.unwrap();
        assert_eq!(coupons.len(), 1);
        assert_eq!(coupons[0].coupon_code, "SAVE1");
    }
}
