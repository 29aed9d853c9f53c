//! Domain types for TicketBoss.
//!
//! Value objects and entities for a single event with aggregate seat
//! counting. No individual seats are modelled: a reservation holds a number
//! of seats, not specific ones.

use crate::error::LedgerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Smallest number of seats a single reservation may hold.
pub const MIN_SEATS_PER_RESERVATION: u32 = 1;

/// Largest number of seats a single reservation may hold.
pub const MAX_SEATS_PER_RESERVATION: u32 = 10;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of the event, chosen by the operator (e.g. `node-meetup-2025`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a new `EventId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a reservation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(Uuid);

impl ReservationId {
    /// Create a `ReservationId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReservationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Opaque identifier of the partner placing a reservation
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartnerId(String);

impl PartnerId {
    /// Creates a new `PartnerId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Value Objects
// ============================================================================

/// Number of seats held by one reservation, always within
/// `MIN_SEATS_PER_RESERVATION..=MAX_SEATS_PER_RESERVATION`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SeatCount(u32);

impl SeatCount {
    /// Returns the seat count
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for SeatCount {
    type Error = LedgerError;

    fn try_from(requested: i64) -> Result<Self, Self::Error> {
        u32::try_from(requested)
            .ok()
            .filter(|n| (MIN_SEATS_PER_RESERVATION..=MAX_SEATS_PER_RESERVATION).contains(n))
            .map(Self)
            .ok_or(LedgerError::InvalidRequest { requested })
    }
}

impl fmt::Display for SeatCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reservation status. Reservations are confirmed on creation and stay so
/// until cancelled, at which point they no longer exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Seats are held for the partner
    Confirmed,
}

// ============================================================================
// Entities
// ============================================================================

/// The single event being sold
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event identifier
    pub event_id: EventId,
    /// Display name
    pub name: String,
    /// Fixed capacity
    pub total_seats: u32,
    /// Seats not held by any reservation
    pub available_seats: u32,
    /// Bumped once per successful reserve or cancel
    pub version: u64,
}

impl Event {
    /// A fresh event with every seat available and version 0
    #[must_use]
    pub fn new(event_id: EventId, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            event_id,
            name: name.into(),
            total_seats: capacity,
            available_seats: capacity,
            version: 0,
        }
    }
}

/// An active reservation
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Reservation identifier
    pub reservation_id: ReservationId,
    /// Partner holding the seats
    pub partner_id: PartnerId,
    /// Seats held
    pub seats: SeatCount,
    /// Always `confirmed`
    pub status: ReservationStatus,
    /// When the reservation was created
    pub reserved_at: DateTime<Utc>,
}

impl Reservation {
    /// A confirmed reservation
    #[must_use]
    pub const fn confirmed(
        reservation_id: ReservationId,
        partner_id: PartnerId,
        seats: SeatCount,
        reserved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            reservation_id,
            partner_id,
            seats,
            status: ReservationStatus::Confirmed,
            reserved_at,
        }
    }
}

/// Read-only view of the event for callers
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    /// Event identifier
    pub event_id: EventId,
    /// Display name
    pub name: String,
    /// Fixed capacity
    pub total_seats: u32,
    /// Seats not held by any reservation
    pub available_seats: u32,
    /// Number of active reservations
    pub reservation_count: usize,
    /// Current version
    pub version: u64,
}
