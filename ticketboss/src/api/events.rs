//! Event management endpoint.
//!
//! - POST /events/bootstrap - Reset the event to full capacity

use crate::server::state::AppState;
use crate::types::Event;
use axum::{Json, extract::State};
use serde::Serialize;
use ticketboss_web::WebResult;

/// Response after resetting the event.
#[derive(Debug, Serialize)]
pub struct BootstrapResponse {
    /// Confirmation message
    pub message: &'static str,
    /// The event as it stands after the reset
    pub event: Event,
}

/// Reset the event and drop every reservation.
///
/// # Endpoint
///
/// ```text
/// POST /events/bootstrap
/// ```
///
/// # Errors
///
/// Only if the ledger rejects the reset, which it never does.
pub async fn bootstrap_event(State(state): State<AppState>) -> WebResult<Json<BootstrapResponse>> {
    let event = state.reservations.bootstrap().await?;

    Ok(Json(BootstrapResponse {
        message: "Event state reset successfully",
        event,
    }))
}
