//! Rejections produced by the ledger.
//!
//! Every variant is a side-effect-free rejection: state is exactly as it was
//! before the call. None is retried by the core.

use crate::types::{MAX_SEATS_PER_RESERVATION, MIN_SEATS_PER_RESERVATION, ReservationId};
use thiserror::Error;

/// Why a ledger operation was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Seat count outside the per-reservation bounds. Decided without
    /// looking at state.
    #[error(
        "Seats must be between {min} and {max} (requested: {requested})",
        min = MIN_SEATS_PER_RESERVATION,
        max = MAX_SEATS_PER_RESERVATION
    )]
    InvalidRequest {
        /// Seat count the caller asked for
        requested: i64,
    },

    /// Another transaction consumed the seats first
    #[error("Not enough seats left (requested: {requested}, available: {available})")]
    InsufficientCapacity {
        /// Seats asked for
        requested: u32,
        /// Seats available when the request was checked
        available: u32,
    },

    /// No active reservation has this id
    #[error("Reservation {reservation_id} not found or already cancelled")]
    NotFound {
        /// Id the caller referred to
        reservation_id: ReservationId,
    },

    /// The id generator handed out an id that an active reservation holds
    #[error("Reservation id {reservation_id} is already in use")]
    DuplicateReservation {
        /// The repeated id
        reservation_id: ReservationId,
    },
}
