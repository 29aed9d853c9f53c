//! Application state for the HTTP server.

use crate::app::ReservationService;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; the service behind the `Arc` is shared.
#[derive(Clone)]
pub struct AppState {
    /// Reservation operations over the event
    pub reservations: Arc<ReservationService>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub const fn new(reservations: Arc<ReservationService>) -> Self {
        Self { reservations }
    }
}
