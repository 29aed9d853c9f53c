//! Router configuration for TicketBoss.

use super::state::AppState;
use crate::api::{events, reservations};
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use ticketboss_web::correlation_id;
use ticketboss_web::handlers::health_check;
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// `/reservations` is served with and without the trailing slash.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/events/bootstrap", post(events::bootstrap_event))
        .route(
            "/reservations",
            get(reservations::get_summary).post(reservations::create_reservation),
        )
        .route(
            "/reservations/",
            get(reservations::get_summary).post(reservations::create_reservation),
        )
        .route(
            "/reservations/:id",
            get(reservations::get_reservation).delete(reservations::cancel_reservation),
        )
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(correlation_id))
        .with_state(state)
}
