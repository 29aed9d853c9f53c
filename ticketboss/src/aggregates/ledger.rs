//! Event Ledger aggregate.
//!
//! Owns the event's capacity, availability and version, together with the
//! reservation registry. Every state change is one reducer transaction, run
//! by the Store under its write lock, so `available_seats`, `version` and the
//! registry always move together.
//!
//! **Concurrency Strategy**: the availability check happens inside the
//! transaction against the committed value. Whoever reaches the lock first
//! gets the seats; later requests see the reduced count and are rejected
//! with `InsufficientCapacity`. `version` is the witness callers can compare
//! across reads.

use crate::aggregates::registry::ReservationRegistry;
use crate::error::LedgerError;
use crate::types::{Event, EventId, EventSummary, Reservation, ReservationId};
use std::sync::Arc;
use ticketboss_core::environment::{Clock, IdGenerator, SystemClock, UuidGenerator};
use ticketboss_core::reducer::Reducer;

// ============================================================================
// State
// ============================================================================

/// Everything the ledger's single lock protects
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerState {
    /// Capacity, availability and version
    pub event: Event,
    /// Active reservations
    pub registry: ReservationRegistry,
}

impl LedgerState {
    /// A freshly bootstrapped ledger: all seats available, no reservations
    #[must_use]
    pub fn bootstrapped(event_id: EventId, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            event: Event::new(event_id, name, capacity),
            registry: ReservationRegistry::new(),
        }
    }

    /// Snapshot for callers
    #[must_use]
    pub fn summary(&self) -> EventSummary {
        EventSummary {
            event_id: self.event.event_id.clone(),
            name: self.event.name.clone(),
            total_seats: self.event.total_seats,
            available_seats: self.event.available_seats,
            reservation_count: self.registry.count(),
            version: self.event.version,
        }
    }

    /// Whether `available + Σ reserved == total` and `available <= total`
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.event.available_seats <= self.event.total_seats
            && u64::from(self.event.available_seats) + self.registry.seats_held()
                == u64::from(self.event.total_seats)
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Transactions the ledger accepts
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerAction {
    /// Reset the event and drop every reservation
    Bootstrap {
        /// Event identifier
        event_id: EventId,
        /// Display name
        name: String,
        /// Total seats
        capacity: u32,
    },

    /// Hold the reservation's seats and record it.
    ///
    /// The reservation is built outside the lock, so its seat count has
    /// already passed the per-reservation bounds.
    Reserve {
        /// Reservation to record
        reservation: Reservation,
    },

    /// Release a reservation's seats
    Cancel {
        /// Reservation to cancel
        reservation_id: ReservationId,
    },
}

// ============================================================================
// Environment
// ============================================================================

/// Environment dependencies for the ledger
#[derive(Clone)]
pub struct LedgerEnvironment {
    /// Clock for reservation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of reservation ids
    pub ids: Arc<dyn IdGenerator>,
}

impl LedgerEnvironment {
    /// Creates a new `LedgerEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// Wall clock and random v4 ids
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }

    /// Next reservation id
    #[must_use]
    pub fn next_reservation_id(&self) -> ReservationId {
        ReservationId::from_uuid(self.ids.next_id())
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Reducer for the ledger.
///
/// Every applied transaction returns the event as it stands after the
/// transaction.
#[derive(Clone, Copy, Debug, Default)]
pub struct LedgerReducer;

impl LedgerReducer {
    /// Creates a new `LedgerReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn bootstrap(state: &mut LedgerState, event_id: EventId, name: String, capacity: u32) {
        let dropped = state.registry.count();
        state.registry.clear();
        state.event = Event::new(event_id, name, capacity);

        tracing::debug!(
            event_id = %state.event.event_id,
            capacity,
            dropped_reservations = dropped,
            "Ledger bootstrapped"
        );
    }

    fn reserve(state: &mut LedgerState, reservation: Reservation) -> Result<(), LedgerError> {
        let reservation_id = reservation.reservation_id;
        if state.registry.contains(&reservation_id) {
            tracing::warn!(%reservation_id, "Reservation rejected: id already in use");
            return Err(LedgerError::DuplicateReservation { reservation_id });
        }

        let requested = reservation.seats.value();
        let available = state.event.available_seats;
        if available < requested {
            tracing::debug!(
                partner_id = %reservation.partner_id,
                requested,
                available,
                "Reservation rejected: insufficient capacity"
            );
            return Err(LedgerError::InsufficientCapacity {
                requested,
                available,
            });
        }

        tracing::debug!(
            %reservation_id,
            partner_id = %reservation.partner_id,
            seats = requested,
            "Seats reserved"
        );

        state.registry.insert(reservation);
        state.event.available_seats -= requested;
        state.event.version += 1;

        Ok(())
    }

    fn cancel(state: &mut LedgerState, reservation_id: ReservationId) -> Result<(), LedgerError> {
        let Some(reservation) = state.registry.remove(&reservation_id) else {
            tracing::debug!(%reservation_id, "Cancellation rejected: reservation not found");
            return Err(LedgerError::NotFound { reservation_id });
        };

        state.event.available_seats += reservation.seats.value();
        state.event.version += 1;

        tracing::debug!(
            %reservation_id,
            seats = reservation.seats.value(),
            available_seats = state.event.available_seats,
            version = state.event.version,
            "Reservation cancelled"
        );

        Ok(())
    }
}

impl Reducer for LedgerReducer {
    type State = LedgerState;
    type Action = LedgerAction;
    type Environment = LedgerEnvironment;
    type Output = Event;
    type Error = LedgerError;

    fn reduce(
        &self,
        state: &mut LedgerState,
        action: LedgerAction,
        _env: &LedgerEnvironment,
    ) -> Result<Event, LedgerError> {
        match action {
            LedgerAction::Bootstrap {
                event_id,
                name,
                capacity,
            } => Self::bootstrap(state, event_id, name, capacity),
            LedgerAction::Reserve { reservation } => Self::reserve(state, reservation)?,
            LedgerAction::Cancel { reservation_id } => Self::cancel(state, reservation_id)?,
        }

        Ok(state.event.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{PartnerId, SeatCount};
    use ticketboss_core::Uuid;
    use ticketboss_testing::reducer_test::assertions::{assert_applied, assert_rejected};
    use ticketboss_testing::{ReducerTest, SequentialIdGenerator, test_clock};

    /// Hands out the same id every time
    struct ConstantIdGenerator;

    impl IdGenerator for ConstantIdGenerator {
        fn next_id(&self) -> Uuid {
            Uuid::nil()
        }
    }

    fn test_env() -> LedgerEnvironment {
        LedgerEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIdGenerator::new()))
    }

    fn fresh(capacity: u32) -> LedgerState {
        LedgerState::bootstrapped(EventId::new("node-meetup-2025"), "Node.js Meet-up", capacity)
    }

    fn reserve(env: &LedgerEnvironment, seats: i64) -> LedgerAction {
        LedgerAction::Reserve {
            reservation: Reservation::confirmed(
                env.next_reservation_id(),
                PartnerId::new("A"),
                SeatCount::try_from(seats).unwrap(),
                env.clock.now(),
            ),
        }
    }

    #[test]
    fn test_reserve_takes_seats_and_bumps_version() {
        let env = test_env();
        let action = reserve(&env, 10);

        ReducerTest::new(LedgerReducer::new())
            .with_env(env)
            .given_state(fresh(500))
            .when_action(action)
            .then_state(|state| {
                assert_eq!(state.event.available_seats, 490);
                assert_eq!(state.event.version, 1);
                assert_eq!(state.registry.count(), 1);
                let id = ReservationId::from_uuid(SequentialIdGenerator::nth(1));
                assert_eq!(state.registry.get(&id).map(|r| r.seats.value()), Some(10));
                assert!(state.is_consistent());
            })
            .then_result(|result| {
                assert_applied(result);
                assert_eq!(result.as_ref().map(|event| event.available_seats), Ok(490));
            })
            .run();
    }

    #[test]
    fn test_insufficient_capacity_leaves_state_untouched() {
        let env = test_env();
        let mut state = fresh(5);
        LedgerReducer::new().reduce(&mut state, reserve(&env, 5), &env).unwrap();
        let before = state.clone();

        let result = LedgerReducer::new().reduce(&mut state, reserve(&env, 1), &env);

        assert_eq!(
            result,
            Err(LedgerError::InsufficientCapacity {
                requested: 1,
                available: 0
            })
        );
        assert_eq!(state, before);
        assert_eq!(state.event.version, 1);
    }

    #[test]
    fn test_repeated_id_is_rejected_without_taking_seats() {
        let env = LedgerEnvironment::new(Arc::new(test_clock()), Arc::new(ConstantIdGenerator));
        let reducer = LedgerReducer::new();
        let mut state = fresh(20);

        reducer.reduce(&mut state, reserve(&env, 5), &env).unwrap();
        let before = state.clone();

        ReducerTest::new(reducer)
            .with_env(env.clone())
            .given_state(before.clone())
            .when_action(reserve(&env, 5))
            .then_state(move |state| {
                assert_eq!(state, &before);
                assert_eq!(state.event.available_seats, 15);
                assert!(state.is_consistent());
            })
            .then_result(|result| {
                assert_rejected(result, |e| {
                    *e == LedgerError::DuplicateReservation {
                        reservation_id: ReservationId::from_uuid(Uuid::nil()),
                    }
                });
            })
            .run();
    }

    #[test]
    fn test_cancel_returns_seats_once() {
        let env = test_env();
        let reducer = LedgerReducer::new();
        let mut state = fresh(500);

        reducer.reduce(&mut state, reserve(&env, 10), &env).unwrap();
        let reservation_id = ReservationId::from_uuid(SequentialIdGenerator::nth(1));

        let event = reducer
            .reduce(&mut state, LedgerAction::Cancel { reservation_id }, &env)
            .unwrap();
        assert_eq!(event.available_seats, 500);
        assert_eq!(event.version, 2);
        assert_eq!(state.registry.count(), 0);

        let again = reducer.reduce(&mut state, LedgerAction::Cancel { reservation_id }, &env);
        assert_eq!(again, Err(LedgerError::NotFound { reservation_id }));
        assert_eq!(state.event.version, 2);
    }

    #[test]
    fn test_bootstrap_resets_everything() {
        let env = test_env();
        let reducer = LedgerReducer::new();
        let mut state = fresh(20);
        for _ in 0..3 {
            reducer.reduce(&mut state, reserve(&env, 4), &env).unwrap();
        }
        assert_eq!(state.event.version, 3);

        ReducerTest::new(reducer)
            .with_env(env)
            .given_state(state)
            .when_action(LedgerAction::Bootstrap {
                event_id: EventId::new("other"),
                name: "Other".to_string(),
                capacity: 7,
            })
            .then_state(|state| {
                assert_eq!(state.event.total_seats, 7);
                assert_eq!(state.event.available_seats, 7);
                assert_eq!(state.event.version, 0);
                assert_eq!(state.registry.count(), 0);
            })
            .then_result(|result| {
                assert_eq!(result, &Ok(Event::new(EventId::new("other"), "Other", 7)));
            })
            .run();
    }

    #[test]
    fn test_summary_reflects_state() {
        let env = test_env();
        let mut state = fresh(50);
        LedgerReducer::new().reduce(&mut state, reserve(&env, 7), &env).unwrap();

        let summary = state.summary();
        assert_eq!(summary.event_id.as_str(), "node-meetup-2025");
        assert_eq!(summary.total_seats, 50);
        assert_eq!(summary.available_seats, 43);
        assert_eq!(summary.reservation_count, 1);
        assert_eq!(summary.version, 1);
    }
}
