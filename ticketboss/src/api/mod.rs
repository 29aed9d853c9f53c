//! HTTP API handlers.
//!
//! Handlers parse the request, call the [`ReservationService`], and turn
//! ledger rejections into [`AppError`] responses.
//!
//! [`ReservationService`]: crate::app::ReservationService

pub mod events;
pub mod reservations;

use crate::error::LedgerError;
use ticketboss_web::AppError;

impl From<LedgerError> for AppError {
    fn from(error: LedgerError) -> Self {
        let message = error.to_string();
        match error {
            LedgerError::InvalidRequest { .. } => Self::bad_request(message),
            LedgerError::InsufficientCapacity { .. } => Self::conflict(message),
            LedgerError::NotFound { .. } => Self::not_found(message),
            LedgerError::DuplicateReservation { .. } => Self::internal(message),
        }
    }
}
