//! Reservation API endpoints.
//!
//! - POST /reservations - Reserve seats
//! - GET /reservations - Event summary
//! - GET /reservations/:id - Look up a reservation
//! - DELETE /reservations/:id - Cancel a reservation

use crate::server::state::AppState;
use crate::types::{EventSummary, PartnerId, Reservation, ReservationId, ReservationStatus};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use ticketboss_web::{AppError, CorrelationId, WebResult};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to reserve seats.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    /// Partner asking for the seats
    pub partner_id: String,
    /// Seats requested. Any JSON number is accepted here so that values
    /// outside `i64` still get a seat-bound rejection.
    pub seats: Number,
}

/// Response after a successful reservation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationResponse {
    /// New reservation id
    pub reservation_id: ReservationId,
    /// Seats held
    pub seats: u32,
    /// Always `confirmed`
    pub status: ReservationStatus,
}

impl From<Reservation> for CreateReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            reservation_id: reservation.reservation_id,
            seats: reservation.seats.value(),
            status: reservation.status,
        }
    }
}

/// Path ids that are not UUIDs cannot name a reservation.
fn parse_reservation_id(raw: &str) -> Result<ReservationId, AppError> {
    raw.parse()
        .map_err(|_| AppError::not_found(format!("Reservation {raw} not found or already cancelled")))
}

/// Whole numbers beyond `i64` saturate; they are out of bounds either way.
#[allow(clippy::cast_possible_truncation)]
fn requested_seats(seats: &Number) -> Result<i64, AppError> {
    if let Some(n) = seats.as_i64() {
        return Ok(n);
    }
    if seats.is_u64() {
        return Ok(i64::MAX);
    }
    match seats.as_f64() {
        Some(n) if n.is_finite() && n.fract().abs() < f64::EPSILON => Ok(n as i64),
        _ => Err(AppError::bad_request(format!(
            "Seats must be a whole number (requested: {seats})"
        ))),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Reserve seats for a partner.
///
/// # Errors
///
/// - 400 if `seats` is outside 1..=10
/// - 409 if not enough seats are left
pub async fn create_reservation(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Json(request): Json<CreateReservationRequest>,
) -> WebResult<(StatusCode, Json<CreateReservationResponse>)> {
    tracing::debug!(
        %correlation_id,
        partner_id = %request.partner_id,
        seats = %request.seats,
        "Reservation requested"
    );

    let seats = requested_seats(&request.seats)?;
    let reservation = state
        .reservations
        .reserve(PartnerId::new(request.partner_id), seats)
        .await?;

    Ok((StatusCode::CREATED, Json(reservation.into())))
}

/// Current event summary.
pub async fn get_summary(State(state): State<AppState>) -> Json<EventSummary> {
    Json(state.reservations.summary().await)
}

/// Look up an active reservation.
///
/// # Errors
///
/// 404 if the id is unknown, already cancelled, or not a UUID.
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<Json<Reservation>> {
    let reservation_id = parse_reservation_id(&id)?;
    let reservation = state.reservations.find(reservation_id).await?;
    Ok(Json(reservation))
}

/// Cancel a reservation, returning its seats.
///
/// # Errors
///
/// 404 if the id is unknown, already cancelled, or not a UUID.
pub async fn cancel_reservation(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    let reservation_id = parse_reservation_id(&id)?;
    tracing::debug!(%correlation_id, %reservation_id, "Cancellation requested");

    state.reservations.cancel(reservation_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
