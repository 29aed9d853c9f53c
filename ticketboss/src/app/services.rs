//! Reservation service: the operations callers use.
//!
//! Every write goes through [`Store::send`], so it is one transaction under
//! the ledger's lock. Reads go through [`Store::state`] and see one committed
//! state.

use crate::aggregates::{LedgerAction, LedgerEnvironment, LedgerReducer, LedgerState};
use crate::config::EventConfig;
use crate::error::LedgerError;
use crate::types::{Event, EventId, EventSummary, PartnerId, Reservation, ReservationId, SeatCount};
use ticketboss_core::environment::Clock;
use ticketboss_runtime::Store;

/// Store running the ledger reducer
pub type LedgerStore = Store<LedgerState, LedgerAction, LedgerEnvironment, LedgerReducer>;

/// Reservation operations over a single event
pub struct ReservationService {
    store: LedgerStore,
    event: EventConfig,
}

impl ReservationService {
    /// Creates a service whose ledger is already bootstrapped from `event`
    #[must_use]
    pub fn new(event: EventConfig, env: LedgerEnvironment) -> Self {
        let state = LedgerState::bootstrapped(
            EventId::new(event.event_id.clone()),
            event.name.clone(),
            event.total_seats,
        );

        tracing::info!(
            event_id = %event.event_id,
            total_seats = event.total_seats,
            "Ledger seeded"
        );

        Self {
            store: Store::new(state, LedgerReducer::new(), env),
            event,
        }
    }

    /// Creates a service with the wall clock and random ids
    #[must_use]
    pub fn with_system_environment(event: EventConfig) -> Self {
        Self::new(event, LedgerEnvironment::production())
    }

    /// Resets the event to full capacity and drops every reservation
    ///
    /// # Errors
    ///
    /// None in practice: the ledger accepts every bootstrap.
    pub async fn bootstrap(&self) -> Result<Event, LedgerError> {
        let event = self
            .store
            .send(LedgerAction::Bootstrap {
                event_id: EventId::new(self.event.event_id.clone()),
                name: self.event.name.clone(),
                capacity: self.event.total_seats,
            })
            .await?;

        tracing::info!(event_id = %event.event_id, total_seats = event.total_seats, "Event state reset");
        Ok(event)
    }

    /// Reserves `seats` seats for `partner_id`
    ///
    /// The seat bound is checked, and the id and timestamp drawn, before the
    /// ledger's lock is requested.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidRequest`] if `seats` is outside 1..=10
    /// - [`LedgerError::InsufficientCapacity`] if fewer seats are available
    /// - [`LedgerError::DuplicateReservation`] if the drawn id is already held
    pub async fn reserve(&self, partner_id: PartnerId, seats: i64) -> Result<Reservation, LedgerError> {
        let seats = SeatCount::try_from(seats)?;
        let env = self.store.environment();
        let reservation = Reservation::confirmed(env.next_reservation_id(), partner_id, seats, env.clock.now());

        self.store
            .send(LedgerAction::Reserve {
                reservation: reservation.clone(),
            })
            .await?;

        Ok(reservation)
    }

    /// Cancels a reservation, returning its seats
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if no active reservation has this id,
    /// including one that was already cancelled.
    pub async fn cancel(&self, reservation_id: ReservationId) -> Result<(), LedgerError> {
        let event = self.store.send(LedgerAction::Cancel { reservation_id }).await?;

        tracing::info!(
            %reservation_id,
            available_seats = event.available_seats,
            version = event.version,
            "Reservation cancelled"
        );
        Ok(())
    }

    /// Current event summary
    pub async fn summary(&self) -> EventSummary {
        self.store.state(LedgerState::summary).await
    }

    /// Looks up an active reservation
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if no active reservation has this id.
    pub async fn find(&self, reservation_id: ReservationId) -> Result<Reservation, LedgerError> {
        self.store
            .state(|state| state.registry.get(&reservation_id).cloned())
            .await
            .ok_or(LedgerError::NotFound { reservation_id })
    }

    /// Whether the seat accounting currently balances
    pub async fn is_consistent(&self) -> bool {
        self.store.state(LedgerState::is_consistent).await
    }
}
