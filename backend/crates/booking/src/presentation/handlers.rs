//! HTTP Handlers
//!
//! Thin adapters: extractors validate, the service does the work, the
//! handler wraps the result in a success envelope with the route's status.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use kernel::envelope::Envelope;

use crate::application::service::{LoginOutput, UserService};
use crate::domain::entity::{booking::Booking, bus::Bus, coupon::Coupon, passenger::Passenger};
use crate::error::BookingResult;
use crate::presentation::dto::{
    AddPassengerRequest, BookSeatRequest, FindBusQuery, LoginRequest, RegisterRequest,
    UserProfile,
};
use crate::presentation::extract::{ValidatedJson, ValidatedQueryOrJson};
use crate::presentation::middleware::AuthUser;

/// Shared state for user handlers
pub struct UserAppState<S> {
    pub service: Arc<S>,
}

// Manual impl: `S` itself need not be `Clone`
impl<S> Clone for UserAppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

type EnvelopeResponse<T> = BookingResult<(StatusCode, Json<Envelope<T>>)>;

fn respond<T>(status: StatusCode, message: &str, data: T) -> EnvelopeResponse<T> {
    Ok((status, Json(Envelope::success(message, data))))
}

// ============================================================================
// Account
// ============================================================================

/// POST /user/register
pub async fn register<S>(
    State(state): State<UserAppState<S>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> EnvelopeResponse<UserProfile>
where
    S: UserService + Send + Sync + 'static,
{
    let user = state.service.register(req.into()).await?;

    respond(
        StatusCode::CREATED,
        "User registered successfully.",
        UserProfile::from(user),
    )
}

/// POST /user/login
pub async fn login<S>(
    State(state): State<UserAppState<S>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> EnvelopeResponse<LoginOutput>
where
    S: UserService + Send + Sync + 'static,
{
    let output = state.service.login(req.into()).await?;

    respond(StatusCode::ACCEPTED, "Login successful.", output)
}

// ============================================================================
// Buses
// ============================================================================

/// GET /user/findbus
///
/// Stations come from the query string, or from a JSON body.
pub async fn find_bus<S>(
    State(state): State<UserAppState<S>>,
    _caller: AuthUser,
    ValidatedQueryOrJson(query): ValidatedQueryOrJson<FindBusQuery>,
) -> EnvelopeResponse<Vec<Bus>>
where
    S: UserService + Send + Sync + 'static,
{
    let buses = state.service.find_bus(query.into()).await?;

    respond(StatusCode::ACCEPTED, "Buses found.", buses)
}

// ============================================================================
// Passengers
// ============================================================================

/// POST /user/addpassenger
pub async fn add_passenger<S>(
    State(state): State<UserAppState<S>>,
    caller: AuthUser,
    ValidatedJson(req): ValidatedJson<AddPassengerRequest>,
) -> EnvelopeResponse<Passenger>
where
    S: UserService + Send + Sync + 'static,
{
    let passenger = state
        .service
        .add_passenger(&caller.email, req.into())
        .await?;

    respond(StatusCode::CREATED, "Passenger added.", passenger)
}

/// GET /user/viewallpassenger
///
/// Answers 302 on success.
pub async fn view_all_passengers<S>(
    State(state): State<UserAppState<S>>,
    caller: AuthUser,
) -> EnvelopeResponse<Vec<Passenger>>
where
    S: UserService + Send + Sync + 'static,
{
    let passengers = state.service.view_all_passengers(&caller.email).await?;

    respond(StatusCode::FOUND, "Passengers fetched.", passengers)
}

// ============================================================================
// Bookings
// ============================================================================

/// POST /user/bookseat
pub async fn book_seat<S>(
    State(state): State<UserAppState<S>>,
    caller: AuthUser,
    ValidatedJson(req): ValidatedJson<BookSeatRequest>,
) -> EnvelopeResponse<Booking>
where
    S: UserService + Send + Sync + 'static,
{
    let booking = state.service.book_seat(&caller.email, req.into()).await?;

    respond(StatusCode::ACCEPTED, "Seats booked.", booking)
}

/// GET /user/bookings/view
pub async fn view_bookings<S>(
    State(state): State<UserAppState<S>>,
    caller: AuthUser,
) -> EnvelopeResponse<Vec<Booking>>
where
    S: UserService + Send + Sync + 'static,
{
    let bookings = state.service.view_bookings(&caller.email).await?;

    respond(StatusCode::ACCEPTED, "Bookings fetched.", bookings)
}

// ============================================================================
// Coupons
// ============================================================================

/// GET /user/coupon/view
pub async fn view_coupons<S>(
    State(state): State<UserAppState<S>>,
    _caller: AuthUser,
) -> EnvelopeResponse<Vec<Coupon>>
where
    S: UserService + Send + Sync + 'static,
{
    let coupons = state.service.view_coupons().await?;

    respond(StatusCode::ACCEPTED, "Coupons fetched.", coupons)
}
