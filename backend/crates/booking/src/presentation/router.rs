//! Booking Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use platform::password::Argon2Hasher;
use platform::token::{JwtTokenService, TokenIssuer};

use crate::application::config::BookingConfig;
use crate::application::service::UserService;
use crate::application::user_service::UserServiceImpl;
use crate::infra::postgres::PgBookingRepository;
use crate::presentation::handlers::{self, UserAppState};
use crate::presentation::middleware::{AccessGuard, require_access_token};

/// Create the booking router with the PostgreSQL repository
pub fn booking_router(repo: PgBookingRepository, config: BookingConfig) -> Router {
    let hasher = match config.pepper() {
        Some(pepper) => Argon2Hasher::with_pepper(pepper),
        None => Argon2Hasher::new(),
    };
    let tokens = Arc::new(JwtTokenService::new(
        &config.token_secret,
        config.access_token_ttl,
    ));

    let service = UserServiceImpl::new(Arc::new(repo), Arc::new(hasher), tokens.clone());

    user_router(service, tokens)
}

/// Create the router for any [`UserService`] implementation
///
/// `register` and `login` are public; every other route requires a bearer
/// token verified by `tokens`.
pub fn user_router<S>(service: S, tokens: Arc<dyn TokenIssuer>) -> Router
where
    S: UserService + Send + Sync + 'static,
{
    let state = UserAppState {
        service: Arc::new(service),
    };
    let guard = AccessGuard { tokens };

    let public = Router::new()
        .route("/user/register", post(handlers::register::<S>))
        .route("/user/login", post(handlers::login::<S>));

    let protected = Router::new()
        .route("/user/findbus", get(handlers::find_bus::<S>))
        .route("/user/addpassenger", post(handlers::add_passenger::<S>))
        .route(
            "/user/viewallpassenger",
            get(handlers::view_all_passengers::<S>),
        )
        .route("/user/bookseat", post(handlers::book_seat::<S>))
        .route("/user/coupon/view", get(handlers::view_coupons::<S>))
        .route("/user/bookings/view", get(handlers::view_bookings::<S>))
        .route_layer(middleware::from_fn_with_state(guard, require_access_token));

    public.merge(protected).with_state(state)
}
