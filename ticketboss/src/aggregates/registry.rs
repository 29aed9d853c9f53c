//! Reservation Registry: the active reservations, keyed by id.
//!
//! The registry does no locking and keeps no invariant of its own. It is
//! only ever mutated by the ledger reducer, inside the same transaction that
//! adjusts `available_seats`, so a registry change on its own is never
//! observable.

use crate::types::{Reservation, ReservationId};
use std::collections::HashMap;

/// Active reservations
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReservationRegistry {
    reservations: HashMap<ReservationId, Reservation>,
}

impl ReservationRegistry {
    /// Creates an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a reservation under its own id, returning any record it replaced
    pub fn insert(&mut self, reservation: Reservation) -> Option<Reservation> {
        self.reservations
            .insert(reservation.reservation_id, reservation)
    }

    /// Removes and returns the reservation with this id
    pub fn remove(&mut self, reservation_id: &ReservationId) -> Option<Reservation> {
        self.reservations.remove(reservation_id)
    }

    /// Looks up a reservation
    #[must_use]
    pub fn get(&self, reservation_id: &ReservationId) -> Option<&Reservation> {
        self.reservations.get(reservation_id)
    }

    /// Whether a reservation with this id is active
    #[must_use]
    pub fn contains(&self, reservation_id: &ReservationId) -> bool {
        self.reservations.contains_key(reservation_id)
    }

    /// Number of active reservations
    #[must_use]
    pub fn count(&self) -> usize {
        self.reservations.len()
    }

    /// Sum of seats over all active reservations
    #[must_use]
    pub fn seats_held(&self) -> u64 {
        self.reservations
            .values()
            .map(|r| u64::from(r.seats.value()))
            .sum()
    }

    /// Drops every reservation
    pub fn clear(&mut self) {
        self.reservations.clear();
    }
}
